//! Value pools for policy document generation.
//!
//! Every pool holds values observed on real desktop browsers, so a document
//! assembled from them describes a machine that could plausibly exist.

/// BCP 47 language tags to pick a primary language from.
pub const LANGUAGES: &[&str] = &[
    "en-US", "en-GB", "zh-CN", "zh-TW", "ja", "ko", "de", "fr", "es", "it", "pt-BR", "ru", "nl",
    "pl", "tr", "ar", "th", "vi", "id", "cs",
];

/// IANA timezone names.
pub const TIMEZONES: &[&str] = &[
    "America/New_York",
    "America/Los_Angeles",
    "America/Chicago",
    "America/Denver",
    "Europe/London",
    "Europe/Paris",
    "Europe/Berlin",
    "Europe/Moscow",
    "Asia/Tokyo",
    "Asia/Shanghai",
    "Asia/Singapore",
    "Asia/Dubai",
    "Australia/Sydney",
    "Pacific/Auckland",
];

/// Common desktop screen resolutions as (width, height).
pub const SCREEN_RESOLUTIONS: &[(u32, u32)] = &[
    (1366, 768),
    (1920, 1080), // Full HD (most common)
    (1536, 864),
    (1440, 900),
    (1600, 900),
    (1280, 720),
    (1600, 1200),
    (2560, 1440), // QHD
    (3840, 2160), // 4K
    (1280, 1024),
    (1680, 1050),
    (2560, 1600),
    (1920, 1200),
    (1360, 768),
    (1024, 768),
];

/// Device scale factors seen in the wild.
pub const SCALE_FACTORS: &[f64] = &[1.0, 1.25, 1.5, 1.75, 2.0, 2.25, 2.5, 3.0];

/// Color depths in bits.
pub const COLOR_DEPTHS: &[u32] = &[24, 30, 32];

/// Touch point counts (0 = non-touch desktop).
pub const TOUCH_POINTS: &[u32] = &[0, 5, 10];

/// Plausible `navigator.hardwareConcurrency` values.
pub const HARDWARE_CONCURRENCY: &[u32] = &[2, 4, 6, 8, 12, 16, 20, 24];

/// Plausible `navigator.deviceMemory` values in GB.
pub const DEVICE_MEMORY: &[u32] = &[4, 8, 16, 32];

/// Current desktop browser User-Agent strings.
pub const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:126.0) Gecko/20100101 Firefox/126.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:126.0) Gecko/20100101 Firefox/126.0",
];

/// Do-Not-Track values browsers actually report.
pub const DO_NOT_TRACK_VALUES: &[&str] = &["1", "0", "unspecified"];

/// Fonts whose text metrics get protected in generated documents.
pub const PROTECTED_FONTS: &[&str] = &["Arial", "Times New Roman", "Courier New"];

/// Derive the available screen area from a full resolution.
///
/// Taskbars and window chrome eat roughly 2% of the width and 5% of the
/// height on common desktops.
pub fn available_area(width: u32, height: u32) -> (u32, u32) {
    // Widen before scaling; u32 would wrap for dimensions near u32::MAX.
    (
        (u64::from(width) * 98 / 100) as u32,
        (u64::from(height) * 95 / 100) as u32,
    )
}
