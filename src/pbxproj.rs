//! Build-setting fixes for `project.pbxproj`

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::config::IosConfig;

/// Literal (old, new) build-setting substitutions.
///
/// The last two are identity substitutions; Flutter's template already has
/// those settings empty.
pub const SIGNING_REPLACEMENTS: [(&str, &str); 4] = [
    (
        "CODE_SIGN_IDENTITY = \"iPhone Developer\";",
        "CODE_SIGN_IDENTITY = \"\";",
    ),
    (
        "CODE_SIGN_IDENTITY[sdk=iphoneos*] = \"iPhone Developer\";",
        "CODE_SIGN_IDENTITY[sdk=iphoneos*] = \"\";",
    ),
    ("DEVELOPMENT_TEAM = \"\";", "DEVELOPMENT_TEAM = \"\";"),
    (
        "PROVISIONING_PROFILE_SPECIFIER = \"\";",
        "PROVISIONING_PROFILE_SPECIFIER = \"\";",
    ),
];

pub fn deployment_target_setting(version: &str) -> String {
    format!("IPHONEOS_DEPLOYMENT_TARGET = {};", version)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PbxprojPatch {
    pub contents: String,
    /// Substitutions that actually changed the text
    pub replacements_applied: usize,
    /// Legacy deployment-target occurrences rewritten
    pub targets_rewritten: usize,
}

impl PbxprojPatch {
    pub fn changed(&self) -> bool {
        self.replacements_applied > 0 || self.targets_rewritten > 0
    }
}

/// Apply the signing substitutions and lift any legacy deployment target
pub fn patch_pbxproj_contents(contents: &str, config: &IosConfig) -> PbxprojPatch {
    let mut text = contents.to_string();
    let mut replacements_applied = 0;

    for (old, new) in SIGNING_REPLACEMENTS {
        if old != new && text.contains(old) {
            text = text.replace(old, new);
            replacements_applied += 1;
        }
    }

    let target = deployment_target_setting(&config.deployment_target);
    let mut targets_rewritten = 0;
    for legacy in &config.legacy_deployment_targets {
        let old = deployment_target_setting(legacy);
        let count = text.matches(old.as_str()).count();
        if count > 0 {
            text = text.replace(&old, &target);
            targets_rewritten += count;
        }
    }

    PbxprojPatch {
        contents: text,
        replacements_applied,
        targets_rewritten,
    }
}

/// Patch the file at `path` in place
pub fn patch_pbxproj_file(path: &Path, config: &IosConfig) -> Result<PbxprojPatch> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let patch = patch_pbxproj_contents(&contents, config);

    fs::write(path, &patch.contents)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
		97C147061CF9000F007C117D /* Debug */ = {
			buildSettings = {
				CODE_SIGN_IDENTITY = "iPhone Developer";
				"CODE_SIGN_IDENTITY[sdk=iphoneos*]" = "iPhone Developer";
				CODE_SIGN_IDENTITY[sdk=iphoneos*] = "iPhone Developer";
				DEVELOPMENT_TEAM = "";
				IPHONEOS_DEPLOYMENT_TARGET = 12.0;
			};
		};
		97C147071CF9000F007C117D /* Release */ = {
			buildSettings = {
				IPHONEOS_DEPLOYMENT_TARGET = 11.0;
			};
		};
"#;

    #[test]
    fn test_signing_identity_cleared() {
        let patch = patch_pbxproj_contents(SAMPLE, &IosConfig::default());

        assert!(!patch.contents.contains("CODE_SIGN_IDENTITY = \"iPhone Developer\";"));
        assert!(patch.contents.contains("CODE_SIGN_IDENTITY = \"\";"));
        assert!(patch.contents.contains("CODE_SIGN_IDENTITY[sdk=iphoneos*] = \"\";"));
        assert_eq!(patch.replacements_applied, 2);
    }

    #[test]
    fn test_legacy_targets_raised() {
        let patch = patch_pbxproj_contents(SAMPLE, &IosConfig::default());

        assert_eq!(patch.targets_rewritten, 2);
        assert_eq!(patch.contents.matches("IPHONEOS_DEPLOYMENT_TARGET = 13.0;").count(), 2);
        assert!(!patch.contents.contains("IPHONEOS_DEPLOYMENT_TARGET = 12.0;"));
        assert!(!patch.contents.contains("IPHONEOS_DEPLOYMENT_TARGET = 11.0;"));
    }

    #[test]
    fn test_mixed_targets_are_all_raised() {
        let text = "IPHONEOS_DEPLOYMENT_TARGET = 13.0;\nIPHONEOS_DEPLOYMENT_TARGET = 12.0;\n";
        let patch = patch_pbxproj_contents(text, &IosConfig::default());

        assert_eq!(patch.contents.matches("= 13.0;").count(), 2);
        assert_eq!(patch.targets_rewritten, 1);
    }

    #[test]
    fn test_identity_replacements_do_not_count() {
        let text = "DEVELOPMENT_TEAM = \"\";\nPROVISIONING_PROFILE_SPECIFIER = \"\";\n";
        let patch = patch_pbxproj_contents(text, &IosConfig::default());

        assert_eq!(patch.contents, text);
        assert!(!patch.changed());
    }

    #[test]
    fn test_already_fixed_project_is_stable() {
        let once = patch_pbxproj_contents(SAMPLE, &IosConfig::default());
        let twice = patch_pbxproj_contents(&once.contents, &IosConfig::default());

        assert_eq!(once.contents, twice.contents);
        assert!(!twice.changed());
    }

    #[test]
    fn test_custom_target() {
        let config = IosConfig {
            deployment_target: "14.0".to_string(),
            legacy_deployment_targets: vec!["13.0".to_string()],
            ..IosConfig::default()
        };
        let patch = patch_pbxproj_contents("IPHONEOS_DEPLOYMENT_TARGET = 13.0;", &config);
        assert_eq!(patch.contents, "IPHONEOS_DEPLOYMENT_TARGET = 14.0;");
    }
}
