use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use image::RgbImage;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::constants::{icons, paths};
use crate::manifest::{ios_icon_filename, AppIconContents};
use crate::render::render_app_icon;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Ios,
    Android,
}

impl Platform {
    pub fn label(&self) -> &'static str {
        match self {
            Platform::Ios => "iOS",
            Platform::Android => "Android",
        }
    }
}

/// One resized copy of the base icon and where it goes, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconVariant {
    pub platform: Platform,
    pub size: u32,
    pub path: PathBuf,
}

impl IconVariant {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

pub fn ios_variants() -> Vec<IconVariant> {
    icons::IOS_SIZES
        .iter()
        .map(|&size| IconVariant {
            platform: Platform::Ios,
            size,
            path: Path::new(paths::IOS_APPICONSET_DIR).join(ios_icon_filename(size)),
        })
        .collect()
}

pub fn android_variants() -> Vec<IconVariant> {
    icons::ANDROID_DPI_LABELS
        .iter()
        .zip(icons::ANDROID_DPI_SIZES)
        .map(|(label, size)| IconVariant {
            platform: Platform::Android,
            size,
            path: Path::new(paths::ANDROID_RES_DIR)
                .join(format!("mipmap-{}", label))
                .join(paths::ANDROID_ICON_FILENAME),
        })
        .collect()
}

pub fn all_variants() -> Vec<IconVariant> {
    let mut variants = ios_variants();
    variants.extend(android_variants());
    variants
}

/// Files written by one generator run, as absolute (project-joined) paths
#[derive(Debug, Default)]
pub struct IconReport {
    pub variants: Vec<PathBuf>,
    pub manifest: PathBuf,
    pub reference: PathBuf,
}

impl IconReport {
    pub fn files_written(&self) -> usize {
        self.variants.len() + 2
    }
}

/// Render the icon and write every platform variant, the iOS manifest and a
/// full-size reference copy below `project_dir`
pub fn generate_icons(project_dir: &Path, config: &Config) -> Result<IconReport> {
    let contents = AppIconContents::standard();
    let ios_files: Vec<String> = ios_variants().iter().map(|v| v.file_name()).collect();
    contents.check_filenames(&ios_files)?;

    let base = render_app_icon(config.icons.base_size);

    let mut report = IconReport::default();

    for variant in all_variants() {
        let dest = project_dir.join(&variant.path);
        write_variant(&base, variant.size, &dest)?;

        match variant.platform {
            Platform::Ios => println!(
                "Created iOS icon: {} ({}x{})",
                variant.file_name(),
                variant.size,
                variant.size
            ),
            Platform::Android => println!(
                "Created Android icon: {} ({}x{})",
                variant.path.display(),
                variant.size,
                variant.size
            ),
        }
        report.variants.push(dest);
    }

    let manifest_path = project_dir
        .join(paths::IOS_APPICONSET_DIR)
        .join(paths::CONTENTS_JSON);
    contents.write(&manifest_path)?;
    println!("Created {} for iOS", paths::CONTENTS_JSON);
    report.manifest = manifest_path;

    let reference_path = project_dir.join(&config.icons.reference_file);
    ensure_parent(&reference_path)?;
    base.save(&reference_path)
        .with_context(|| format!("Failed to save {}", reference_path.display()))?;
    println!("Created reference icon: {}", config.icons.reference_file);
    report.reference = reference_path;

    Ok(report)
}

/// Load the project's config, generate every icon and print the summary
pub fn run_in_project(project_dir: &Path) -> Result<IconReport> {
    println!("Creating Simple Task Manager app icons...");

    let config = Config::load(project_dir)?;
    let report = generate_icons(project_dir, &config)?;

    println!("\n✅ All app icons created successfully! ({} files)", report.files_written());
    println!("📱 iOS icons: {}/", paths::IOS_APPICONSET_DIR);
    println!("🤖 Android icons: {}/mipmap-*/", paths::ANDROID_RES_DIR);

    Ok(report)
}

fn write_variant(base: &RgbImage, size: u32, dest: &Path) -> Result<()> {
    ensure_parent(dest)?;

    let resized = if size == base.width() {
        base.clone()
    } else {
        imageops::resize(base, size, size, FilterType::Lanczos3)
    };

    resized
        .save(dest)
        .with_context(|| format!("Failed to save {}", dest.display()))?;

    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    Ok(())
}
