//! iOS build configuration fixer
//!
//! Patches the Xcode project and Info.plist produced by `flutter create`,
//! reinstalls CocoaPods and runs a simulator build to check the result.
//! External tools are advisory: a failing `pod` or `flutter` is reported and
//! the run carries on. Only file edits can fail the run.

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

use crate::config::{Config, IosConfig};
use crate::constants::paths;
use crate::info_plist::update_info_plist_file;
use crate::pbxproj::patch_pbxproj_file;
use crate::tools::{run_tool, ToolOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Updated,
    /// The file to edit does not exist in this project
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixReport {
    pub pbxproj: StepStatus,
    pub pods: ToolOutcome,
    pub info_plist: StepStatus,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FixOptions {
    /// Skip the verification build at the end
    pub skip_build: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixSummary {
    /// Project fixed and the simulator build passed (or was skipped)
    Ready { report: FixReport, build: Option<ToolOutcome> },
    /// Project fixed but the simulator build did not pass
    BuildIssues { report: FixReport, build: ToolOutcome },
    /// A file edit failed; the project may be partially updated
    Aborted { error: String },
}

pub fn fix_pbxproj(project_dir: &Path, config: &IosConfig) -> Result<StepStatus> {
    let path = project_dir.join(paths::PBXPROJ);
    if !path.exists() {
        println!("   {} not found, skipping", paths::PBXPROJ);
        return Ok(StepStatus::Skipped);
    }

    println!("📝 Updating project.pbxproj...");
    let patch = patch_pbxproj_file(&path, config)?;
    if patch.targets_rewritten > 0 {
        println!(
            "   Raised {} deployment target setting(s) to {}",
            patch.targets_rewritten, config.deployment_target
        );
    }
    println!("✅ Updated project.pbxproj");

    Ok(StepStatus::Updated)
}

/// Delete the Pods lock and cache, then run `pod install --repo-update` in `ios/`
pub fn reinstall_pods(project_dir: &Path, config: &IosConfig) -> Result<ToolOutcome> {
    println!("🧹 Cleaning and rebuilding CocoaPods...");

    let ios_dir = project_dir.join(paths::IOS_DIR);
    if !ios_dir.is_dir() {
        bail!("iOS directory not found: {}", ios_dir.display());
    }

    // Cleanup failures leave stale pods behind but do not stop the fixer
    let lock = ios_dir.join(paths::PODFILE_LOCK);
    if lock.exists() {
        if let Err(e) = fs::remove_file(&lock) {
            eprintln!("⚠️  Could not remove {}: {}", lock.display(), e);
        }
    }

    let pods = ios_dir.join(paths::PODS_DIR);
    if pods.exists() {
        if let Err(e) = fs::remove_dir_all(&pods) {
            eprintln!("⚠️  Could not remove {}: {}", pods.display(), e);
        }
    }

    let outcome = run_tool(&config.pod_command, &["install", "--repo-update"], &ios_dir);
    if outcome.is_success() {
        println!("✅ CocoaPods installed successfully");
    } else {
        eprintln!("⚠️  CocoaPods warning: {}", outcome.detail());
    }

    Ok(outcome)
}

pub fn update_info_plist(project_dir: &Path, config: &IosConfig) -> Result<StepStatus> {
    let path = project_dir.join(paths::INFO_PLIST);
    if !path.exists() {
        println!("   {} not found, skipping", paths::INFO_PLIST);
        return Ok(StepStatus::Skipped);
    }

    println!("📱 Updating Info.plist...");
    let update = update_info_plist_file(&path, config)?;
    if update.encryption_key_added {
        println!("   Added ITSAppUsesNonExemptEncryption = false");
    }
    println!("✅ Updated Info.plist");

    Ok(StepStatus::Updated)
}

/// Apply all project fixes in order: pbxproj, pods, Info.plist
pub fn fix_ios_project(project_dir: &Path, config: &IosConfig) -> Result<FixReport> {
    println!("🔧 Fixing iOS project configuration...");

    let pbxproj = fix_pbxproj(project_dir, config)?;
    let pods = reinstall_pods(project_dir, config)?;
    let info_plist = update_info_plist(project_dir, config)?;

    println!("🎉 iOS project configuration completed!");

    Ok(FixReport {
        pbxproj,
        pods,
        info_plist,
    })
}

/// Simulator debug build; the result is advisory only
pub fn verify_build(project_dir: &Path, config: &IosConfig) -> ToolOutcome {
    println!("\n🧪 Testing build...");

    let outcome = run_tool(
        &config.flutter_command,
        &["build", "ios", "--simulator", "--debug"],
        project_dir,
    );

    if outcome.is_success() {
        println!("✅ Simulator build successful!");
    } else {
        eprintln!("❌ Simulator build failed: {}", outcome.detail());
    }

    outcome
}

/// Full fixer run. Never returns an error: failures are folded into the summary
/// and printed with a hint for fixing things by hand.
pub fn run(project_dir: &Path, config: &Config, options: FixOptions) -> FixSummary {
    println!("🚀 Starting iOS build configuration fix...");

    let report = match fix_ios_project(project_dir, &config.ios) {
        Ok(report) => report,
        Err(e) => return abort(e),
    };

    if options.skip_build {
        println!("\n🎉 All fixes applied (build check skipped).");
        return FixSummary::Ready { report, build: None };
    }

    let build = verify_build(project_dir, &config.ios);
    if build.is_success() {
        println!("\n🎉 All fixes applied successfully!");
        println!("📱 Your iOS app is ready for development and testing.");
        FixSummary::Ready {
            report,
            build: Some(build),
        }
    } else {
        print_manual_checklist(&config.ios);
        FixSummary::BuildIssues { report, build }
    }
}

/// Like `run`, loading `taskapp-tools.yaml` from the project first. A config
/// that fails to load aborts the run the same way a failed edit does.
pub fn run_in_project(project_dir: &Path, options: FixOptions) -> FixSummary {
    match Config::load(project_dir) {
        Ok(config) => run(project_dir, &config, options),
        Err(e) => abort(e),
    }
}

fn abort(e: anyhow::Error) -> FixSummary {
    eprintln!("❌ Error during configuration: {:#}", e);
    eprintln!("💡 Please check Xcode project settings manually.");
    FixSummary::Aborted {
        error: format!("{:#}", e),
    }
}

fn print_manual_checklist(config: &IosConfig) {
    println!("\n⚠️  Build still has issues. Manual Xcode configuration may be needed.");
    println!("💡 Try opening ios/Runner.xcworkspace in Xcode and check:");
    println!("   - Signing & Capabilities tab");
    println!("   - Deployment Target (should be {}+)", config.deployment_target);
    println!("   - Bundle Identifier");
}
