//! Xcode asset catalog manifest (`Contents.json`) for the app icon set

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Idiom {
    #[serde(rename = "iphone")]
    Iphone,
    #[serde(rename = "ipad")]
    Ipad,
    #[serde(rename = "ios-marketing")]
    IosMarketing,
}

impl Idiom {
    pub fn as_str(&self) -> &'static str {
        match self {
            Idiom::Iphone => "iphone",
            Idiom::Ipad => "ipad",
            Idiom::IosMarketing => "ios-marketing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestImage {
    /// Logical size in points, e.g. "20x20" or "83.5x83.5"
    pub size: String,
    pub idiom: Idiom,
    pub filename: String,
    /// Scale factor, e.g. "2x"
    pub scale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestInfo {
    pub version: u32,
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppIconContents {
    pub images: Vec<ManifestImage>,
    pub info: ManifestInfo,
}

/// (logical size, idiom, pixel size of the file, scale)
const APP_ICON_SLOTS: [(&str, Idiom, u32, u32); 18] = [
    ("20x20", Idiom::Iphone, 40, 2),
    ("20x20", Idiom::Iphone, 60, 3),
    ("29x29", Idiom::Iphone, 58, 2),
    ("29x29", Idiom::Iphone, 87, 3),
    ("40x40", Idiom::Iphone, 80, 2),
    ("40x40", Idiom::Iphone, 120, 3),
    ("60x60", Idiom::Iphone, 120, 2),
    ("60x60", Idiom::Iphone, 180, 3),
    ("20x20", Idiom::Ipad, 20, 1),
    ("20x20", Idiom::Ipad, 40, 2),
    ("29x29", Idiom::Ipad, 29, 1),
    ("29x29", Idiom::Ipad, 58, 2),
    ("40x40", Idiom::Ipad, 40, 1),
    ("40x40", Idiom::Ipad, 80, 2),
    ("76x76", Idiom::Ipad, 76, 1),
    ("76x76", Idiom::Ipad, 152, 2),
    ("83.5x83.5", Idiom::Ipad, 167, 2),
    ("1024x1024", Idiom::IosMarketing, 1024, 1),
];

/// Filename used for the iOS icon of a given pixel size
pub fn ios_icon_filename(size: u32) -> String {
    format!("Icon-{}.png", size)
}

impl AppIconContents {
    /// The manifest for the Runner app icon set
    pub fn standard() -> Self {
        let images = APP_ICON_SLOTS
            .iter()
            .map(|&(size, idiom, pixels, scale)| ManifestImage {
                size: size.to_string(),
                idiom,
                filename: ios_icon_filename(pixels),
                scale: format!("{}x", scale),
            })
            .collect();

        AppIconContents {
            images,
            info: ManifestInfo {
                version: 1,
                author: "xcode".to_string(),
            },
        }
    }

    /// Fail if any entry names a file that is not in `produced`
    pub fn check_filenames(&self, produced: &[String]) -> Result<()> {
        for image in &self.images {
            if !produced.iter().any(|f| f == &image.filename) {
                bail!(
                    "Contents.json references {} ({} {} @{}) which is not generated",
                    image.filename,
                    image.size,
                    image.idiom.as_str(),
                    image.scale
                );
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize Contents.json")
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::icons::IOS_SIZES;

    fn ios_files() -> Vec<String> {
        IOS_SIZES.iter().map(|&s| ios_icon_filename(s)).collect()
    }

    #[test]
    fn test_standard_manifest_references_generated_files() {
        let contents = AppIconContents::standard();
        assert_eq!(contents.images.len(), 18);
        assert!(contents.check_filenames(&ios_files()).is_ok());
    }

    #[test]
    fn test_every_ios_file_is_referenced() {
        let contents = AppIconContents::standard();
        for file in ios_files() {
            assert!(
                contents.images.iter().any(|i| i.filename == file),
                "{} is never referenced",
                file
            );
        }
    }

    #[test]
    fn test_missing_file_is_reported() {
        let contents = AppIconContents::standard();
        let mut files = ios_files();
        files.retain(|f| f != "Icon-167.png");

        let err = contents.check_filenames(&files).unwrap_err();
        assert!(err.to_string().contains("Icon-167.png"));
    }

    #[test]
    fn test_json_shape() {
        let json = AppIconContents::standard().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["info"]["version"], 1);
        assert_eq!(value["info"]["author"], "xcode");
        assert_eq!(value["images"][0]["size"], "20x20");
        assert_eq!(value["images"][0]["idiom"], "iphone");
        assert_eq!(value["images"][0]["filename"], "Icon-40.png");
        assert_eq!(value["images"][0]["scale"], "2x");
        assert_eq!(value["images"][16]["size"], "83.5x83.5");
        assert_eq!(value["images"][17]["idiom"], "ios-marketing");

        // Two-space indentation like Xcode writes it
        assert!(json.contains("\n  \"images\""));
    }
}
