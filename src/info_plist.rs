//! Info.plist updates for App Store compatibility

use anyhow::{Context, Result};
use plist::Value;
use std::fs;
use std::io::Cursor;
use std::path::Path;

use crate::config::IosConfig;
use crate::constants::ios::{MINIMUM_OS_VERSION_KEY, NON_EXEMPT_ENCRYPTION_KEY};

const BINARY_PLIST_MAGIC: &[u8] = b"bplist00";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlistFormat {
    Xml,
    Binary,
}

impl PlistFormat {
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(BINARY_PLIST_MAGIC) {
            PlistFormat::Binary
        } else {
            PlistFormat::Xml
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlistUpdate {
    pub format: PlistFormat,
    /// Previous MinimumOSVersion, if there was one
    pub previous_minimum_os: Option<String>,
    pub encryption_key_added: bool,
}

/// Set the minimum OS version and add the export-compliance flag if missing.
///
/// Returns the re-encoded document in the format it was read in.
pub fn update_info_plist_bytes(bytes: &[u8], config: &IosConfig) -> Result<(Vec<u8>, PlistUpdate)> {
    let format = PlistFormat::detect(bytes);

    let mut value = Value::from_reader(Cursor::new(bytes))
        .context("Failed to parse Info.plist")?;
    let dict = value
        .as_dictionary_mut()
        .context("Info.plist root is not a dictionary")?;

    let previous_minimum_os = dict
        .insert(
            MINIMUM_OS_VERSION_KEY.to_string(),
            Value::String(config.deployment_target.clone()),
        )
        .and_then(|v| v.into_string());

    let encryption_key_added = !dict.contains_key(NON_EXEMPT_ENCRYPTION_KEY);
    if encryption_key_added {
        dict.insert(NON_EXEMPT_ENCRYPTION_KEY.to_string(), Value::Boolean(false));
    }

    let mut out = Vec::new();
    let encoded = match format {
        PlistFormat::Xml => value.to_writer_xml(&mut out),
        PlistFormat::Binary => value.to_writer_binary(&mut out),
    };
    encoded.context("Failed to encode Info.plist")?;

    Ok((
        out,
        PlistUpdate {
            format,
            previous_minimum_os,
            encryption_key_added,
        },
    ))
}

pub fn update_info_plist_file(path: &Path, config: &IosConfig) -> Result<PlistUpdate> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    let (updated, update) = update_info_plist_bytes(&bytes, config)
        .with_context(|| format!("Failed to update {}", path.display()))?;

    fs::write(path, updated).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(update)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INFO_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>CFBundleDisplayName</key>
	<string>Simple Task Manager</string>
	<key>MinimumOSVersion</key>
	<string>11.0</string>
</dict>
</plist>
"#;

    fn parse(bytes: &[u8]) -> plist::Dictionary {
        Value::from_reader(Cursor::new(bytes))
            .unwrap()
            .into_dictionary()
            .unwrap()
    }

    #[test]
    fn test_sets_minimum_os_and_encryption_flag() {
        let (out, update) =
            update_info_plist_bytes(INFO_PLIST.as_bytes(), &IosConfig::default()).unwrap();

        assert_eq!(update.format, PlistFormat::Xml);
        assert_eq!(update.previous_minimum_os.as_deref(), Some("11.0"));
        assert!(update.encryption_key_added);

        let dict = parse(&out);
        assert_eq!(
            dict.get("MinimumOSVersion").and_then(Value::as_string),
            Some("13.0")
        );
        assert_eq!(
            dict.get("ITSAppUsesNonExemptEncryption").and_then(Value::as_boolean),
            Some(false)
        );
        assert_eq!(
            dict.get("CFBundleDisplayName").and_then(Value::as_string),
            Some("Simple Task Manager")
        );
        assert!(String::from_utf8(out).unwrap().starts_with("<?xml"));
    }

    #[test]
    fn test_existing_encryption_flag_is_kept() {
        let mut dict = plist::Dictionary::new();
        dict.insert("ITSAppUsesNonExemptEncryption".to_string(), Value::Boolean(true));
        let mut bytes = Vec::new();
        Value::Dictionary(dict).to_writer_xml(&mut bytes).unwrap();

        let (out, update) = update_info_plist_bytes(&bytes, &IosConfig::default()).unwrap();

        assert!(!update.encryption_key_added);
        assert_eq!(update.previous_minimum_os, None);
        let dict = parse(&out);
        assert_eq!(
            dict.get("ITSAppUsesNonExemptEncryption").and_then(Value::as_boolean),
            Some(true)
        );
    }

    #[test]
    fn test_binary_plist_stays_binary() {
        let mut dict = plist::Dictionary::new();
        dict.insert("CFBundleName".to_string(), Value::String("Runner".to_string()));
        let mut bytes = Vec::new();
        Value::Dictionary(dict).to_writer_binary(&mut bytes).unwrap();

        let (out, update) = update_info_plist_bytes(&bytes, &IosConfig::default()).unwrap();

        assert_eq!(update.format, PlistFormat::Binary);
        assert!(out.starts_with(BINARY_PLIST_MAGIC));
        assert_eq!(
            parse(&out).get("MinimumOSVersion").and_then(Value::as_string),
            Some("13.0")
        );
    }

    #[test]
    fn test_non_dictionary_root_is_an_error() {
        let mut bytes = Vec::new();
        Value::Array(vec![Value::Boolean(true)])
            .to_writer_xml(&mut bytes)
            .unwrap();

        let err = update_info_plist_bytes(&bytes, &IosConfig::default()).unwrap_err();
        assert!(err.to_string().contains("not a dictionary"));
    }

    #[test]
    fn test_garbage_is_an_error() {
        let truncated = b"<?xml version=\"1.0\"?><plist version=\"1.0\"><dict><key>A</key>";
        assert!(update_info_plist_bytes(truncated, &IosConfig::default()).is_err());
    }
}
