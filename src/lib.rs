// Library exports for the binaries and tests
pub mod config;
pub mod constants;
pub mod icons;
pub mod info_plist;
pub mod ios_fix;
pub mod manifest;
pub mod pbxproj;
pub mod render;
pub mod tools;
