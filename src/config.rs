use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{icons, ios, paths};

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub icons: IconConfig,
    #[serde(default)]
    pub ios: IosConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IconConfig {
    #[serde(default = "default_base_size")]
    pub base_size: u32,
    #[serde(default = "default_reference_file")]
    pub reference_file: String,
}

fn default_base_size() -> u32 {
    icons::BASE_SIZE
}

fn default_reference_file() -> String {
    icons::REFERENCE_FILE.to_string()
}

impl Default for IconConfig {
    fn default() -> Self {
        IconConfig {
            base_size: default_base_size(),
            reference_file: default_reference_file(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct IosConfig {
    #[serde(default = "default_deployment_target")]
    pub deployment_target: String,
    #[serde(default = "default_legacy_targets")]
    pub legacy_deployment_targets: Vec<String>,
    #[serde(default = "default_pod_command")]
    pub pod_command: String,
    #[serde(default = "default_flutter_command")]
    pub flutter_command: String,
}

fn default_deployment_target() -> String {
    ios::DEPLOYMENT_TARGET.to_string()
}

fn default_legacy_targets() -> Vec<String> {
    ios::LEGACY_DEPLOYMENT_TARGETS.iter().map(|s| s.to_string()).collect()
}

fn default_pod_command() -> String {
    ios::POD_COMMAND.to_string()
}

fn default_flutter_command() -> String {
    ios::FLUTTER_COMMAND.to_string()
}

impl Default for IosConfig {
    fn default() -> Self {
        IosConfig {
            deployment_target: default_deployment_target(),
            legacy_deployment_targets: default_legacy_targets(),
            pod_command: default_pod_command(),
            flutter_command: default_flutter_command(),
        }
    }
}

impl Config {
    pub fn config_path(project_dir: &Path) -> PathBuf {
        project_dir.join(paths::CONFIG_FILE)
    }

    /// Load `taskapp-tools.yaml` from the project directory, falling back to
    /// built-in defaults when the file does not exist
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = Self::config_path(project_dir);

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;
        let config: Config = serde_yaml::from_str(&contents)
            .context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let largest_variant = icons::IOS_SIZES
            .iter()
            .chain(icons::ANDROID_DPI_SIZES.iter())
            .copied()
            .max()
            .unwrap_or(icons::BASE_SIZE);

        if self.icons.base_size < largest_variant {
            bail!("icons.base_size must be >= {} (largest icon variant)", largest_variant);
        }
        if self.icons.base_size > icons::MAX_BASE_SIZE {
            bail!("icons.base_size must be <= {}", icons::MAX_BASE_SIZE);
        }
        if self.icons.reference_file.is_empty() {
            bail!("icons.reference_file cannot be empty");
        }

        if !is_version(&self.ios.deployment_target) {
            bail!(
                "ios.deployment_target must look like <major>.<minor>, got {:?}",
                self.ios.deployment_target
            );
        }
        for legacy in &self.ios.legacy_deployment_targets {
            if !is_version(legacy) {
                bail!("legacy deployment target {:?} must look like <major>.<minor>", legacy);
            }
            if legacy == &self.ios.deployment_target {
                bail!("legacy deployment targets cannot include the deployment target itself");
            }
        }

        if self.ios.pod_command.trim().is_empty() {
            bail!("ios.pod_command cannot be empty");
        }
        if self.ios.flutter_command.trim().is_empty() {
            bail!("ios.flutter_command cannot be empty");
        }

        Ok(())
    }

    pub fn save(&self, project_dir: &Path) -> Result<PathBuf> {
        let config_path = Self::config_path(project_dir);
        let yaml = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        fs::write(&config_path, yaml)
            .with_context(|| format!("Failed to write config file {}", config_path.display()))?;

        Ok(config_path)
    }
}

fn is_version(value: &str) -> bool {
    let mut parts = value.split('.');
    let (Some(major), Some(minor), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    [major, minor]
        .iter()
        .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.icons.base_size, 1024);
        assert_eq!(config.ios.deployment_target, "13.0");
        assert_eq!(config.ios.legacy_deployment_targets, vec!["12.0", "11.0"]);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: Config = serde_yaml::from_str("ios:\n  pod_command: /opt/bin/pod\n").unwrap();
        assert_eq!(config.ios.pod_command, "/opt/bin/pod");
        assert_eq!(config.ios.flutter_command, "./flutter/bin/flutter");
        assert_eq!(config.icons.reference_file, "app_icon_1024.png");
    }

    #[test]
    fn test_rejects_small_base_size() {
        let mut config = Config::default();
        config.icons.base_size = 512;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_target() {
        let mut config = Config::default();
        config.ios.deployment_target = "13".to_string();
        assert!(config.validate().is_err());

        config.ios.deployment_target = "13.0.1".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_target_listed_as_legacy() {
        let mut config = Config::default();
        config.ios.legacy_deployment_targets.push("13.0".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults_and_save_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.ios.pod_command, "pod");

        let mut config = Config::default();
        config.ios.deployment_target = "14.0".to_string();
        let path = config.save(dir.path()).unwrap();
        assert!(path.ends_with("taskapp-tools.yaml"));

        let reloaded = Config::load(dir.path()).unwrap();
        assert_eq!(reloaded.ios.deployment_target, "14.0");
    }

    #[test]
    fn test_version_check() {
        assert!(is_version("13.0"));
        assert!(is_version("9.3"));
        assert!(!is_version("13."));
        assert!(!is_version("a.b"));
        assert!(!is_version(""));
    }
}
