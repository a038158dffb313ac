//! Fixed paths, sizes and build settings shared by the icon generator and the iOS fixer

pub mod paths {
    /// iOS asset catalog folder holding the app icon set
    pub const IOS_APPICONSET_DIR: &str = "ios/Runner/Assets.xcassets/AppIcon.appiconset";

    /// Android resource root; launcher icons live in `mipmap-<dpi>` folders below it
    pub const ANDROID_RES_DIR: &str = "android/app/src/main/res";

    pub const ANDROID_ICON_FILENAME: &str = "ic_launcher.png";

    pub const CONTENTS_JSON: &str = "Contents.json";

    pub const IOS_DIR: &str = "ios";
    pub const PBXPROJ: &str = "ios/Runner.xcodeproj/project.pbxproj";
    pub const INFO_PLIST: &str = "ios/Runner/Info.plist";

    /// Relative to `IOS_DIR`
    pub const PODFILE_LOCK: &str = "Podfile.lock";
    /// Relative to `IOS_DIR`
    pub const PODS_DIR: &str = "Pods";

    /// Optional tool configuration, relative to the project directory
    pub const CONFIG_FILE: &str = "taskapp-tools.yaml";
}

pub mod icons {
    /// Size the design is drawn at (App Store marketing icon)
    pub const BASE_SIZE: u32 = 1024;

    /// Upper bound for a configured base size; larger buys nothing but render time
    pub const MAX_BASE_SIZE: u32 = 4096;

    /// Pixel sizes of the iOS icons, saved as `Icon-<size>.png`
    pub const IOS_SIZES: [u32; 13] = [20, 29, 40, 58, 60, 76, 80, 87, 120, 152, 167, 180, 1024];

    pub const ANDROID_DPI_LABELS: [&str; 6] = ["ldpi", "mdpi", "hdpi", "xhdpi", "xxhdpi", "xxxhdpi"];
    pub const ANDROID_DPI_SIZES: [u32; 6] = [36, 48, 72, 96, 144, 192];

    pub const REFERENCE_FILE: &str = "app_icon_1024.png";
}

pub mod ios {
    pub const DEPLOYMENT_TARGET: &str = "13.0";

    /// Targets rewritten to `DEPLOYMENT_TARGET` when found in project.pbxproj
    pub const LEGACY_DEPLOYMENT_TARGETS: [&str; 2] = ["12.0", "11.0"];

    pub const POD_COMMAND: &str = "pod";
    pub const FLUTTER_COMMAND: &str = "./flutter/bin/flutter";

    pub const MINIMUM_OS_VERSION_KEY: &str = "MinimumOSVersion";
    pub const NON_EXEMPT_ENCRYPTION_KEY: &str = "ITSAppUsesNonExemptEncryption";
}
