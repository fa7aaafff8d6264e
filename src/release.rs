//! Structured release records built from raw feed items.

use chrono::{DateTime, Utc};

use crate::data::Item;
use crate::normalize;
use crate::pubdate;

/// Platforms the renderer knows how to group and color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Ios,
    Ipados,
    Macos,
    Watchos,
    Tvos,
    Visionos,
    Other,
}

impl Platform {
    pub const ALL: [Platform; 7] = [
        Platform::Ios,
        Platform::Ipados,
        Platform::Macos,
        Platform::Watchos,
        Platform::Tvos,
        Platform::Visionos,
        Platform::Other,
    ];

    /// Map a title's leading token onto a platform. The token is lowercased
    /// and stripped of spaces first, so "Apple TV" and "appletv" both land on
    /// [`Platform::Tvos`]. Unknown tokens fall into [`Platform::Other`].
    pub fn from_token(token: &str) -> Platform {
        let folded = token.to_lowercase().replace(' ', "");
        match folded.as_str() {
            "ios" | "iphone" => Platform::Ios,
            "ipados" | "ipad" => Platform::Ipados,
            "macos" | "mac" => Platform::Macos,
            "watchos" | "watch" => Platform::Watchos,
            "tvos" | "audioos" | "homepod" | "appletv" => Platform::Tvos,
            "visionos" | "vision" => Platform::Visionos,
            _ => Platform::Other,
        }
    }

    /// Stable lowercase identifier.
    pub fn key(self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Ipados => "ipados",
            Platform::Macos => "macos",
            Platform::Watchos => "watchos",
            Platform::Tvos => "tvos",
            Platform::Visionos => "visionos",
            Platform::Other => "other",
        }
    }

    /// Vendor-cased display name.
    pub fn label(self) -> &'static str {
        match self {
            Platform::Ios => "iOS",
            Platform::Ipados => "iPadOS",
            Platform::Macos => "macOS",
            Platform::Watchos => "watchOS",
            Platform::Tvos => "tvOS",
            Platform::Visionos => "visionOS",
            Platform::Other => "Other",
        }
    }
}

/// One firmware release, normalized and ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct Release {
    pub title: String,
    pub link: String,
    pub guid: String,
    pub published_at: DateTime<Utc>,
    pub description: String,
    pub platform: Platform,
    pub version: String,
    pub build: String,
    pub device: String,
    pub notes: String,
    pub device_or_notes: String,
    pub pre_release: bool,
    pub display_date: String,
    pub display_version: String,
}

impl Release {
    /// Run the full normalization pipeline over one raw feed item.
    pub fn from_item(item: &Item) -> Release {
        let published_at = pubdate::parse_pub_date(&item.pub_date);
        let parts = normalize::normalize_title(&item.title);
        let platform = Platform::from_token(&parts.platform_token);
        let description = normalize::normalize_description(&item.description);
        let notes = normalize::notes_from_description(&description);
        let device_or_notes = combine_device_and_notes(&parts.device, &notes);
        let display_version = compose_version(&parts.version, &parts.build);

        Release {
            title: item.title.clone(),
            link: item.link.clone(),
            guid: item.guid.clone(),
            published_at,
            description,
            platform,
            version: parts.version,
            build: parts.build,
            device: parts.device,
            notes,
            device_or_notes,
            pre_release: parts.pre_release,
            display_date: published_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            display_version,
        }
    }
}

/// Join version and build into the "Version (Build)" cell. Either side may be
/// empty; the parens only appear when both are present.
pub fn compose_version(version: &str, build: &str) -> String {
    let version = version.trim();
    let build = build.trim();
    if version.is_empty() {
        return build.to_string();
    }
    if build.is_empty() {
        return version.to_string();
    }
    format!("{version} ({build})")
}

/// Merge the title's device target with the description's notes into one
/// display cell. A device shorter than four characters is treated as noise
/// and replaced by the notes when notes exist.
pub fn combine_device_and_notes(device: &str, notes: &str) -> String {
    let device = normalize::normalize_space(device);
    let notes = normalize::normalize_space(notes);
    if device.is_empty() && notes.is_empty() {
        return String::new();
    }
    if device.is_empty() {
        return notes;
    }
    if device.chars().count() < 4 && !notes.is_empty() {
        return notes;
    }
    if notes.is_empty() {
        return device;
    }
    format!("{device} - {notes}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(title: &str, pub_date: &str, description: &str) -> Item {
        Item {
            title: title.to_string(),
            link: "https://ipsw.me/example".to_string(),
            pub_date: pub_date.to_string(),
            guid: "https://ipsw.me/example".to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn compose_version_joins_both_sides() {
        assert_eq!("17.5.1 (21F90)", compose_version("17.5.1", "21F90"));
    }

    #[test]
    fn compose_version_with_only_one_side() {
        assert_eq!("17.5.1", compose_version("17.5.1", ""));
        assert_eq!("21F90", compose_version("", "21F90"));
        assert_eq!("", compose_version("", ""));
    }

    #[test]
    fn compose_version_trims_stray_whitespace() {
        assert_eq!("17.5.1 (21F90)", compose_version(" 17.5.1 ", " 21F90 "));
    }

    #[test]
    fn combine_prefers_joining_device_and_notes() {
        assert_eq!(
            "iPhone 15 Pro - Fixes bugs.",
            combine_device_and_notes("iPhone 15 Pro", "Fixes bugs.")
        );
    }

    #[test]
    fn combine_with_one_side_empty() {
        assert_eq!("Fixes bugs.", combine_device_and_notes("", "Fixes bugs."));
        assert_eq!("iPhone 15 Pro", combine_device_and_notes("iPhone 15 Pro", ""));
        assert_eq!("", combine_device_and_notes("", ""));
    }

    #[test]
    fn combine_drops_short_devices_when_notes_exist() {
        assert_eq!("Fixes bugs.", combine_device_and_notes("TV", "Fixes bugs."));
        // But a short device with no notes still shows.
        assert_eq!("TV", combine_device_and_notes("TV", ""));
    }

    #[test]
    fn combine_short_device_threshold_boundary() {
        assert_eq!("Fixes bugs.", combine_device_and_notes("abc", "Fixes bugs."));
        assert_eq!(
            "abcd - Fixes bugs.",
            combine_device_and_notes("abcd", "Fixes bugs.")
        );
    }

    #[test]
    fn combine_counts_characters_not_bytes() {
        // Four characters even though more than four bytes.
        assert_eq!(
            "çihç - Fixes bugs.",
            combine_device_and_notes("çihç", "Fixes bugs.")
        );
    }

    #[test]
    fn combine_collapses_whitespace_on_both_sides() {
        assert_eq!(
            "iPhone 15 Pro - Fixes bugs.",
            combine_device_and_notes("iPhone  15   Pro", "Fixes  bugs.")
        );
    }

    #[test]
    fn platform_aliases_map_to_expected_platforms() {
        assert_eq!(Platform::Ios, Platform::from_token("iOS"));
        assert_eq!(Platform::Ios, Platform::from_token("iPhone"));
        assert_eq!(Platform::Ipados, Platform::from_token("iPadOS"));
        assert_eq!(Platform::Ipados, Platform::from_token("iPad"));
        assert_eq!(Platform::Macos, Platform::from_token("macOS"));
        assert_eq!(Platform::Macos, Platform::from_token("Mac"));
        assert_eq!(Platform::Watchos, Platform::from_token("watchOS"));
        assert_eq!(Platform::Watchos, Platform::from_token("Watch"));
        assert_eq!(Platform::Tvos, Platform::from_token("tvOS"));
        assert_eq!(Platform::Tvos, Platform::from_token("audioOS"));
        assert_eq!(Platform::Tvos, Platform::from_token("HomePod"));
        assert_eq!(Platform::Tvos, Platform::from_token("Apple TV"));
        assert_eq!(Platform::Visionos, Platform::from_token("visionOS"));
        assert_eq!(Platform::Visionos, Platform::from_token("Vision"));
        assert_eq!(Platform::Other, Platform::from_token("bridgeOS"));
        assert_eq!(Platform::Other, Platform::from_token(""));
    }

    #[test]
    fn platform_keys_and_labels_line_up() {
        assert_eq!("ios", Platform::Ios.key());
        assert_eq!("iOS", Platform::Ios.label());
        assert_eq!("ipados", Platform::Ipados.key());
        assert_eq!("iPadOS", Platform::Ipados.label());
        assert_eq!("macos", Platform::Macos.key());
        assert_eq!("macOS", Platform::Macos.label());
        assert_eq!("watchos", Platform::Watchos.key());
        assert_eq!("watchOS", Platform::Watchos.label());
        assert_eq!("tvos", Platform::Tvos.key());
        assert_eq!("tvOS", Platform::Tvos.label());
        assert_eq!("visionos", Platform::Visionos.key());
        assert_eq!("visionOS", Platform::Visionos.label());
        assert_eq!("other", Platform::Other.key());
        assert_eq!("Other", Platform::Other.label());
    }

    #[test]
    fn from_item_builds_a_full_release() {
        let release = Release::from_item(&item(
            "iOS 17.5.1 (21F90) for iPhone 15 Pro has been released.",
            "Mon, 20 May 2024 17:42:00 +0000",
            "<p>iOS 17.5.1 has been released. Fixes bugs.</p>",
        ));

        assert_eq!(Platform::Ios, release.platform);
        assert_eq!("17.5.1", release.version);
        assert_eq!("21F90", release.build);
        assert_eq!("iPhone 15 Pro", release.device);
        assert_eq!("Fixes bugs.", release.notes);
        assert_eq!("iPhone 15 Pro - Fixes bugs.", release.device_or_notes);
        assert_eq!("17.5.1 (21F90)", release.display_version);
        assert_eq!("2024-05-20 17:42 UTC", release.display_date);
        assert_eq!("iOS 17.5.1 has been released. Fixes bugs.", release.description);
        assert!(!release.pre_release);
    }

    #[test]
    fn from_item_flags_beta_builds() {
        let release = Release::from_item(&item(
            "iPadOS 18.0 beta 2 (22A5297f) for iPad Pro has been released",
            "Wed, 21 May 2025 17:00:00 +0000",
            "",
        ));

        assert_eq!(Platform::Ipados, release.platform);
        // The version keeps every post-platform token, pre-release markers
        // included; only the build parenthetical and device are peeled off.
        assert_eq!("18.0 beta 2", release.version);
        assert_eq!("22A5297f", release.build);
        assert_eq!("iPad Pro", release.device);
        assert_eq!("18.0 beta 2 (22A5297f)", release.display_version);
        assert!(release.pre_release);
    }

    #[test]
    fn from_item_without_device_or_description() {
        let release = Release::from_item(&item(
            "macOS 14.5 (23F79) has been released.",
            "Mon, 13 May 2024 17:00:00 +0000",
            "",
        ));

        assert_eq!(Platform::Macos, release.platform);
        assert_eq!("14.5 (23F79)", release.display_version);
        assert_eq!("", release.device);
        assert_eq!("", release.device_or_notes);
    }

    #[test]
    fn from_item_junk_title_still_lands_on_a_platform() {
        let release = Release::from_item(&item("", "", ""));
        assert_eq!(Platform::Other, release.platform);
        assert!(Platform::ALL.contains(&release.platform));
        assert_eq!("", release.display_version);
    }

    #[test]
    fn from_item_epoch_sentinel_formats_cleanly() {
        let release = Release::from_item(&item("iOS 1.0 has been released", "garbage", ""));
        assert_eq!("1970-01-01 00:00 UTC", release.display_date);
    }
}
