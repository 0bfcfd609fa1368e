//! Tolerant resolution of fingerprint configuration documents.
//!
//! A configuration document arrives as one untrusted JSON string. Resolution
//! never fails: anything malformed, mistyped, or missing collapses to the
//! compiled-in default for exactly the field it covers, and the rest of the
//! document is still honored. A bad `canvas` section must not cost the user
//! their `timezone` override.
//!
//! Category parameters are only read once the category's `enabled` flag has
//! resolved to true. A disabled category keeps default parameters no matter
//! what its `params` block says.
//!
//! # Usage
//!
//! ```rust
//! use fingerprint_policy::policy::resolver::resolve_document;
//!
//! let policy = resolve_document(
//!     r#"{"settings": {"timezone": {"enabled": true, "params": {"timezone": "Asia/Tokyo"}}}}"#,
//! )
//! .unwrap();
//! assert_eq!(policy.timezone.timezone.as_deref(), Some("Asia/Tokyo"));
//! ```

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::policy::categories::{
    BatteryOverride, CanvasFontOverride, CanvasOverride, ColorDepthOverride, CssFontOverride,
    DeviceMemoryOverride, DisplayZoomOverride, DoNotTrackOverride, FingerprintPolicy,
    GeolocationOverride, HardwareConcurrencyOverride, LanguageOverride, ScreenResolutionOverride,
    ScreenSizeOverride, TimezoneOverride, TouchPointsOverride, UserAgentOverride, WebGlOverride,
    WebRtcOverride,
};

/// Resolve a raw configuration document into a policy snapshot.
///
/// Returns `None` when the document cannot carry any settings at all: it is
/// not valid JSON, its root is not an object, or it has no
/// `settings` object. Callers treat `None` as "keep whatever
/// policy is already active".
pub fn resolve_document(document: &str) -> Option<FingerprintPolicy> {
    let root: Value = match serde_json::from_str(document) {
        Ok(value) => value,
        Err(err) => {
            warn!("Fingerprint configuration is not valid JSON, keeping current policy: {}", err);
            return None;
        }
    };

    let Some(root) = root.as_object() else {
        warn!("Fingerprint configuration root is not a JSON object, keeping current policy");
        return None;
    };

    let Some(settings) = dict(root, "settings") else {
        debug!("Fingerprint configuration has no settings section");
        return None;
    };

    Some(resolve_settings(settings))
}

/// Build a complete policy from a `settings` object.
///
/// Every category resolves independently; the worst a broken section can do
/// is leave its own category at defaults.
fn resolve_settings(settings: &Map<String, Value>) -> FingerprintPolicy {
    FingerprintPolicy {
        language: resolve_language(settings),
        timezone: resolve_timezone(settings),
        geolocation: resolve_geolocation(settings),
        screen_resolution: resolve_screen_resolution(settings),
        display_zoom: resolve_display_zoom(settings),
        screen_size: resolve_screen_size(settings),
        color_depth: resolve_color_depth(settings),
        touch_points: resolve_touch_points(settings),
        canvas: resolve_canvas(settings),
        canvas_font: resolve_canvas_font(settings),
        css_font: resolve_css_font(settings),
        webrtc: resolve_webrtc(settings),
        webgl: resolve_webgl(settings),
        hardware_concurrency: resolve_hardware_concurrency(settings),
        device_memory: resolve_device_memory(settings),
        battery: resolve_battery(settings),
        user_agent: resolve_user_agent(settings),
        port_scan_protection: flag_enabled(settings, "port_scan_protection"),
        console_output_disabled: mode_is_disable(settings, "console_output"),
        do_not_track: resolve_do_not_track(settings),
        webdriver_detection_disabled: mode_is_disable(settings, "webdriver_detection"),
        cdp_protection: flag_enabled(settings, "cdp_protection"),
    }
}

// ============================================================
// Per-category resolution
// ============================================================

fn resolve_language(settings: &Map<String, Value>) -> LanguageOverride {
    let mut language = LanguageOverride::default();
    let Some(category) = dict(settings, "language") else {
        return language;
    };
    language.enabled = bool_or(category, "enabled", false);
    if !language.enabled {
        return language;
    }
    if let Some(params) = dict(category, "params") {
        language.language = string_opt(params, "language");
        if let Some(list) = string_list(params, "languages") {
            language.languages = list;
        }
    }
    language
}

fn resolve_timezone(settings: &Map<String, Value>) -> TimezoneOverride {
    let mut timezone = TimezoneOverride::default();
    let Some(category) = dict(settings, "timezone") else {
        return timezone;
    };
    timezone.enabled = bool_or(category, "enabled", false);
    if !timezone.enabled {
        return timezone;
    }
    if let Some(params) = dict(category, "params") {
        timezone.timezone = string_opt(params, "timezone");
    }
    timezone
}

fn resolve_geolocation(settings: &Map<String, Value>) -> GeolocationOverride {
    let mut geolocation = GeolocationOverride::default();
    let Some(category) = dict(settings, "geolocation") else {
        return geolocation;
    };
    geolocation.enabled = bool_or(category, "enabled", false);
    if !geolocation.enabled {
        return geolocation;
    }
    if let Some(params) = dict(category, "params") {
        geolocation.latitude = f64_or(params, "latitude", geolocation.latitude);
        geolocation.longitude = f64_or(params, "longitude", geolocation.longitude);
        geolocation.accuracy = f64_or(params, "accuracy", geolocation.accuracy);
    }
    geolocation
}

fn resolve_screen_resolution(settings: &Map<String, Value>) -> ScreenResolutionOverride {
    let mut resolution = ScreenResolutionOverride::default();
    let Some(category) = dict(settings, "screen_resolution") else {
        return resolution;
    };
    resolution.enabled = bool_or(category, "enabled", false);
    if !resolution.enabled {
        return resolution;
    }
    if let Some(params) = dict(category, "params") {
        resolution.width = u32_or(params, "width", resolution.width);
        resolution.height = u32_or(params, "height", resolution.height);
    }
    resolution
}

fn resolve_display_zoom(settings: &Map<String, Value>) -> DisplayZoomOverride {
    let mut zoom = DisplayZoomOverride::default();
    let Some(category) = dict(settings, "display_zoom") else {
        return zoom;
    };
    zoom.enabled = bool_or(category, "enabled", false);
    if !zoom.enabled {
        return zoom;
    }
    if let Some(params) = dict(category, "params") {
        zoom.scale_factor = f32_or(params, "scale_factor", zoom.scale_factor);
    }
    zoom
}

fn resolve_screen_size(settings: &Map<String, Value>) -> ScreenSizeOverride {
    let mut size = ScreenSizeOverride::default();
    let Some(category) = dict(settings, "screen_size") else {
        return size;
    };
    size.enabled = bool_or(category, "enabled", false);
    if !size.enabled {
        return size;
    }
    if let Some(params) = dict(category, "params") {
        size.available_width = u32_or(params, "available_width", size.available_width);
        size.available_height = u32_or(params, "available_height", size.available_height);
    }
    size
}

fn resolve_color_depth(settings: &Map<String, Value>) -> ColorDepthOverride {
    let mut depth = ColorDepthOverride::default();
    let Some(category) = dict(settings, "color_depth") else {
        return depth;
    };
    depth.enabled = bool_or(category, "enabled", false);
    if !depth.enabled {
        return depth;
    }
    if let Some(params) = dict(category, "params") {
        depth.depth = u32_or(params, "depth", depth.depth);
    }
    depth
}

fn resolve_touch_points(settings: &Map<String, Value>) -> TouchPointsOverride {
    let mut touch = TouchPointsOverride::default();
    let Some(category) = dict(settings, "touch_points") else {
        return touch;
    };
    touch.enabled = bool_or(category, "enabled", false);
    if !touch.enabled {
        return touch;
    }
    if let Some(params) = dict(category, "params") {
        touch.max_touch_points = u32_or(params, "max_touch_points", touch.max_touch_points);
    }
    touch
}

fn resolve_canvas(settings: &Map<String, Value>) -> CanvasOverride {
    let mut canvas = CanvasOverride::default();
    let Some(category) = dict(settings, "canvas") else {
        return canvas;
    };
    canvas.enabled = bool_or(category, "enabled", false);
    if !canvas.enabled {
        return canvas;
    }
    // The noise mode sits next to `enabled`, not inside `params`.
    canvas.noise_mode = string_opt(category, "mode");
    if let Some(params) = dict(category, "params") {
        canvas.noise_seed = string_opt(params, "noise_seed");
        canvas.noise_level = f32_or(params, "noise_level", canvas.noise_level);
    }
    canvas
}

fn resolve_canvas_font(settings: &Map<String, Value>) -> CanvasFontOverride {
    let mut font = CanvasFontOverride::default();
    let Some(category) = dict(settings, "canvas_font") else {
        return font;
    };
    font.enabled = bool_or(category, "enabled", false);
    if !font.enabled {
        return font;
    }
    if let Some(params) = dict(category, "params") {
        if let Some(list) = string_list(params, "protected_fonts") {
            font.protected_fonts = list;
        }
    }
    font
}

fn resolve_css_font(settings: &Map<String, Value>) -> CssFontOverride {
    let mut font = CssFontOverride::default();
    let Some(category) = dict(settings, "css_font") else {
        return font;
    };
    font.enabled = bool_or(category, "enabled", false);
    if !font.enabled {
        return font;
    }
    if let Some(params) = dict(category, "params") {
        font.noise_level = f32_or(params, "noise_level", font.noise_level);
    }
    font
}

fn resolve_webrtc(settings: &Map<String, Value>) -> WebRtcOverride {
    let mut webrtc = WebRtcOverride::default();
    let Some(category) = dict(settings, "webrtc") else {
        return webrtc;
    };
    webrtc.enabled = bool_or(category, "enabled", false);
    if !webrtc.enabled {
        return webrtc;
    }
    // Mode lives at the category level; webrtc carries no params block.
    webrtc.mode = string_opt(category, "mode");
    webrtc
}

fn resolve_webgl(settings: &Map<String, Value>) -> WebGlOverride {
    let mut webgl = WebGlOverride::default();
    let Some(category) = dict(settings, "webgl") else {
        return webgl;
    };
    webgl.enabled = bool_or(category, "enabled", false);
    if !webgl.enabled {
        return webgl;
    }
    if let Some(params) = dict(category, "params") {
        webgl.noise_seed = string_opt(params, "noise_seed");
        webgl.noise_level = f32_or(params, "noise_level", webgl.noise_level);
    }
    webgl
}

fn resolve_hardware_concurrency(settings: &Map<String, Value>) -> HardwareConcurrencyOverride {
    let mut hardware = HardwareConcurrencyOverride::default();
    let Some(category) = dict(settings, "hardware_concurrency") else {
        return hardware;
    };
    hardware.enabled = bool_or(category, "enabled", false);
    if !hardware.enabled {
        return hardware;
    }
    if let Some(params) = dict(category, "params") {
        hardware.cores = u32_or(params, "cores", hardware.cores);
    }
    hardware
}

fn resolve_device_memory(settings: &Map<String, Value>) -> DeviceMemoryOverride {
    let mut memory = DeviceMemoryOverride::default();
    let Some(category) = dict(settings, "device_memory") else {
        return memory;
    };
    memory.enabled = bool_or(category, "enabled", false);
    if !memory.enabled {
        return memory;
    }
    if let Some(params) = dict(category, "params") {
        memory.memory_gb = u32_or(params, "memory_gb", memory.memory_gb);
    }
    memory
}

fn resolve_battery(settings: &Map<String, Value>) -> BatteryOverride {
    let mut battery = BatteryOverride::default();
    let Some(category) = dict(settings, "battery") else {
        return battery;
    };
    battery.enabled = bool_or(category, "enabled", false);
    if !battery.enabled {
        return battery;
    }
    if let Some(params) = dict(category, "params") {
        battery.charging = bool_or(params, "charging", battery.charging);
        battery.level = f32_or(params, "level", battery.level);
    }
    battery
}

fn resolve_user_agent(settings: &Map<String, Value>) -> UserAgentOverride {
    let mut agent = UserAgentOverride::default();
    let Some(category) = dict(settings, "user_agent") else {
        return agent;
    };
    agent.enabled = bool_or(category, "enabled", false);
    if !agent.enabled {
        return agent;
    }
    if let Some(params) = dict(category, "params") {
        agent.user_agent = string_opt(params, "user_agent");
    }
    agent
}

fn resolve_do_not_track(settings: &Map<String, Value>) -> DoNotTrackOverride {
    let mut dnt = DoNotTrackOverride::default();
    let Some(category) = dict(settings, "do_not_track") else {
        return dnt;
    };
    dnt.enabled = bool_or(category, "enabled", false);
    if !dnt.enabled {
        return dnt;
    }
    if let Some(params) = dict(category, "params") {
        dnt.value = string_opt(params, "value");
    }
    dnt
}

/// Categories that are a bare enabled flag with no parameters.
fn flag_enabled(settings: &Map<String, Value>, key: &str) -> bool {
    dict(settings, key)
        .map(|category| bool_or(category, "enabled", false))
        .unwrap_or(false)
}

/// Categories that activate on `mode == "disable"` with no enabled gate.
fn mode_is_disable(settings: &Map<String, Value>, key: &str) -> bool {
    dict(settings, key)
        .and_then(|category| category.get("mode"))
        .and_then(Value::as_str)
        .map(|mode| mode == "disable")
        .unwrap_or(false)
}

// ============================================================
// Field accessors
// ============================================================

fn dict<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    map.get(key).and_then(Value::as_object)
}

fn bool_or(map: &Map<String, Value>, key: &str, default: bool) -> bool {
    map.get(key).and_then(Value::as_bool).unwrap_or(default)
}

/// Unsigned integer field. Negative numbers, floats, and non-numbers all
/// fall back to the default.
fn u32_or(map: &Map<String, Value>, key: &str, default: u32) -> u32 {
    map.get(key)
        .and_then(Value::as_u64)
        .and_then(|value| u32::try_from(value).ok())
        .unwrap_or(default)
}

/// Float field. JSON integers are accepted and widened.
fn f32_or(map: &Map<String, Value>, key: &str, default: f32) -> f32 {
    map.get(key)
        .and_then(Value::as_f64)
        .map(|value| value as f32)
        .unwrap_or(default)
}

fn f64_or(map: &Map<String, Value>, key: &str, default: f64) -> f64 {
    map.get(key).and_then(Value::as_f64).unwrap_or(default)
}

/// String field, kept verbatim (empty strings included).
fn string_opt(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// String-list field. `Some` means the stored list is replaced wholesale,
/// even by an empty array. Non-string elements are skipped.
fn string_list(map: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    let list = map.get(key).and_then(Value::as_array)?;
    Some(
        list.iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(document: &str) -> FingerprintPolicy {
        resolve_document(document).expect("document should resolve to a policy")
    }

    #[test]
    fn test_invalid_json_yields_none() {
        assert!(resolve_document("not json at all").is_none());
        assert!(resolve_document("{\"settings\": ").is_none());
        assert!(resolve_document("").is_none());
    }

    #[test]
    fn test_non_object_root_yields_none() {
        assert!(resolve_document("[1, 2, 3]").is_none());
        assert!(resolve_document("\"settings\"").is_none());
        assert!(resolve_document("42").is_none());
        assert!(resolve_document("null").is_none());
    }

    #[test]
    fn test_missing_settings_yields_none() {
        assert!(resolve_document("{}").is_none());
        assert!(resolve_document(r#"{"other_key": {}}"#).is_none());
        // Settings present but not an object counts as absent.
        assert!(resolve_document(r#"{"settings": []}"#).is_none());
        assert!(resolve_document(r#"{"settings": "yes"}"#).is_none());
    }

    #[test]
    fn test_empty_settings_resolves_to_defaults() {
        let policy = resolve(r#"{"settings": {}}"#);
        assert_eq!(policy, FingerprintPolicy::default());
    }

    #[test]
    fn test_unknown_categories_are_ignored() {
        let policy = resolve(
            r#"{"settings": {
                "quantum_entropy": {"enabled": true},
                "timezone": {"enabled": true, "params": {"timezone": "Europe/Berlin"}}
            }}"#,
        );
        assert_eq!(policy.timezone.timezone.as_deref(), Some("Europe/Berlin"));
        assert_eq!(policy.active_categories(), vec!["timezone"]);
    }

    #[test]
    fn test_language_override() {
        let policy = resolve(
            r#"{"settings": {"language": {
                "enabled": true,
                "params": {"language": "de-DE", "languages": ["de-DE", "de", "en"]}
            }}}"#,
        );
        assert!(policy.language.enabled);
        assert_eq!(policy.language.language.as_deref(), Some("de-DE"));
        assert_eq!(policy.language.languages, vec!["de-DE", "de", "en"]);
    }

    #[test]
    fn test_language_list_replaced_wholesale() {
        // An empty array is an explicit "no languages", not "keep default".
        let policy = resolve(
            r#"{"settings": {"language": {
                "enabled": true,
                "params": {"languages": []}
            }}}"#,
        );
        assert!(policy.language.languages.is_empty());

        // Non-string entries are dropped, the rest survive.
        let policy = resolve(
            r#"{"settings": {"language": {
                "enabled": true,
                "params": {"languages": ["en-US", 7, null, "en"]}
            }}}"#,
        );
        assert_eq!(policy.language.languages, vec!["en-US", "en"]);
    }

    #[test]
    fn test_disabled_category_ignores_params() {
        let policy = resolve(
            r#"{"settings": {"geolocation": {
                "enabled": false,
                "params": {"latitude": 48.1, "longitude": 11.5, "accuracy": 10.0}
            }}}"#,
        );
        assert!(!policy.geolocation.enabled);
        assert_eq!(policy.geolocation.latitude, 0.0);
        assert_eq!(policy.geolocation.longitude, 0.0);
        assert_eq!(policy.geolocation.accuracy, 100.0);
    }

    #[test]
    fn test_missing_enabled_means_disabled() {
        let policy = resolve(
            r#"{"settings": {"timezone": {
                "params": {"timezone": "Asia/Tokyo"}
            }}}"#,
        );
        assert!(!policy.timezone.enabled);
        assert_eq!(policy.timezone.timezone, None);
    }

    #[test]
    fn test_mistyped_enabled_means_disabled() {
        for value in ["\"true\"", "1", "[true]", "null"] {
            let document = format!(
                r#"{{"settings": {{"timezone": {{"enabled": {value}, "params": {{"timezone": "UTC"}}}}}}}}"#
            );
            let policy = resolve(&document);
            assert!(!policy.timezone.enabled, "enabled = {value}");
        }
    }

    #[test]
    fn test_geolocation_accepts_integer_coordinates() {
        let policy = resolve(
            r#"{"settings": {"geolocation": {
                "enabled": true,
                "params": {"latitude": 48, "longitude": -120, "accuracy": 250}
            }}}"#,
        );
        assert_eq!(policy.geolocation.latitude, 48.0);
        assert_eq!(policy.geolocation.longitude, -120.0);
        assert_eq!(policy.geolocation.accuracy, 250.0);
    }

    #[test]
    fn test_partial_params_keep_field_defaults() {
        let policy = resolve(
            r#"{"settings": {"screen_resolution": {
                "enabled": true,
                "params": {"width": 2560}
            }}}"#,
        );
        assert!(policy.screen_resolution.enabled);
        assert_eq!(policy.screen_resolution.width, 2560);
        assert_eq!(policy.screen_resolution.height, 1080);
    }

    #[test]
    fn test_negative_and_float_integers_fall_back() {
        let policy = resolve(
            r#"{"settings": {
                "screen_resolution": {"enabled": true, "params": {"width": -640, "height": 1080.5}},
                "hardware_concurrency": {"enabled": true, "params": {"cores": "16"}}
            }}"#,
        );
        assert_eq!(policy.screen_resolution.width, 1920);
        assert_eq!(policy.screen_resolution.height, 1080);
        assert_eq!(policy.hardware_concurrency.cores, 8);
    }

    #[test]
    fn test_params_wrong_type_keeps_defaults() {
        let policy = resolve(
            r#"{"settings": {"battery": {
                "enabled": true,
                "params": "not an object"
            }}}"#,
        );
        assert!(policy.battery.enabled);
        assert!(policy.battery.charging);
        assert_eq!(policy.battery.level, 0.8);
    }

    #[test]
    fn test_category_wrong_type_keeps_defaults() {
        let policy = resolve(
            r#"{"settings": {
                "battery": [1, 2],
                "timezone": {"enabled": true, "params": {"timezone": "UTC"}}
            }}"#,
        );
        assert!(!policy.battery.enabled);
        assert!(policy.timezone.enabled);
    }

    #[test]
    fn test_battery_defaults_survive_partial_params() {
        let policy = resolve(
            r#"{"settings": {"battery": {
                "enabled": true,
                "params": {"level": 0.33}
            }}}"#,
        );
        assert!(policy.battery.enabled);
        assert!(policy.battery.charging);
        assert!((policy.battery.level - 0.33).abs() < f32::EPSILON);
    }

    #[test]
    fn test_canvas_mode_read_from_category_level() {
        let policy = resolve(
            r#"{"settings": {"canvas": {
                "enabled": true,
                "mode": "noise",
                "params": {"noise_seed": "abc123", "noise_level": 0.25, "mode": "ignored"}
            }}}"#,
        );
        assert!(policy.canvas.enabled);
        assert_eq!(policy.canvas.noise_mode.as_deref(), Some("noise"));
        assert_eq!(policy.canvas.noise_seed.as_deref(), Some("abc123"));
        assert!((policy.canvas.noise_level - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_webrtc_mode_read_from_category_level() {
        let policy = resolve(
            r#"{"settings": {"webrtc": {"enabled": true, "mode": "auto_replace"}}}"#,
        );
        assert!(policy.webrtc.enabled);
        assert_eq!(policy.webrtc.mode.as_deref(), Some("auto_replace"));
    }

    #[test]
    fn test_console_output_inverted_flag() {
        let policy =
            resolve(r#"{"settings": {"console_output": {"mode": "disable"}}}"#);
        assert!(policy.console_output_disabled);

        let policy = resolve(r#"{"settings": {"console_output": {"mode": "enable"}}}"#);
        assert!(!policy.console_output_disabled);

        // No enabled gate: an enabled flag alone changes nothing.
        let policy =
            resolve(r#"{"settings": {"console_output": {"enabled": true}}}"#);
        assert!(!policy.console_output_disabled);
    }

    #[test]
    fn test_webdriver_detection_inverted_flag() {
        let policy = resolve(
            r#"{"settings": {"webdriver_detection": {"enabled": false, "mode": "disable"}}}"#,
        );
        assert!(policy.webdriver_detection_disabled);

        let policy = resolve(
            r#"{"settings": {"webdriver_detection": {"mode": "DISABLE"}}}"#,
        );
        assert!(!policy.webdriver_detection_disabled, "mode comparison is case sensitive");
    }

    #[test]
    fn test_flag_only_categories() {
        let policy = resolve(
            r#"{"settings": {
                "port_scan_protection": {"enabled": true},
                "cdp_protection": {"enabled": true, "params": {"whatever": 1}}
            }}"#,
        );
        assert!(policy.port_scan_protection);
        assert!(policy.cdp_protection);

        let policy = resolve(
            r#"{"settings": {
                "port_scan_protection": {"enabled": "yes"},
                "cdp_protection": {}
            }}"#,
        );
        assert!(!policy.port_scan_protection);
        assert!(!policy.cdp_protection);
    }

    #[test]
    fn test_empty_string_values_kept_verbatim() {
        let policy = resolve(
            r#"{"settings": {
                "user_agent": {"enabled": true, "params": {"user_agent": ""}},
                "do_not_track": {"enabled": true, "params": {"value": "unspecified"}}
            }}"#,
        );
        assert_eq!(policy.user_agent.user_agent.as_deref(), Some(""));
        assert_eq!(policy.do_not_track.value.as_deref(), Some("unspecified"));
    }

    #[test]
    fn test_one_bad_category_does_not_poison_others() {
        let policy = resolve(
            r#"{"settings": {
                "canvas": {"enabled": "broken", "mode": 3, "params": null},
                "webgl": {"enabled": true, "params": {"noise_seed": "s", "noise_level": 0.1}},
                "device_memory": {"enabled": true, "params": {"memory_gb": 16}}
            }}"#,
        );
        assert!(!policy.canvas.enabled);
        assert_eq!(policy.canvas.noise_mode, None);
        assert!(policy.webgl.enabled);
        assert_eq!(policy.webgl.noise_seed.as_deref(), Some("s"));
        assert_eq!(policy.device_memory.memory_gb, 16);
    }

    #[test]
    fn test_full_document_round_trip() {
        let policy = resolve(
            r#"{
                "fingerprint_mode": "custom",
                "fingerprint_id": "11111111-2222-3333-4444-555555555555",
                "settings": {
                    "language": {"enabled": true, "params": {"language": "fr-FR", "languages": ["fr-FR", "fr"]}},
                    "timezone": {"enabled": true, "params": {"timezone": "Europe/Paris"}},
                    "geolocation": {"enabled": true, "params": {"latitude": 48.8566, "longitude": 2.3522, "accuracy": 120.5}},
                    "screen_resolution": {"enabled": true, "params": {"width": 2560, "height": 1440}},
                    "display_zoom": {"enabled": true, "params": {"scale_factor": 1.25}},
                    "screen_size": {"enabled": true, "params": {"available_width": 2508, "available_height": 1368}},
                    "color_depth": {"enabled": true, "params": {"depth": 30}},
                    "touch_points": {"enabled": true, "params": {"max_touch_points": 5}},
                    "canvas": {"enabled": true, "mode": "noise", "params": {"noise_seed": "seed-1", "noise_level": 0.31}},
                    "canvas_font": {"enabled": true, "params": {"protected_fonts": ["Arial", "Courier New"]}},
                    "css_font": {"enabled": true, "params": {"noise_level": 0.22}},
                    "webrtc": {"enabled": true, "mode": "auto_replace"},
                    "webgl": {"enabled": true, "params": {"noise_seed": "seed-2", "noise_level": 0.13}},
                    "hardware_concurrency": {"enabled": true, "params": {"cores": 12}},
                    "device_memory": {"enabled": true, "params": {"memory_gb": 32}},
                    "battery": {"enabled": true, "params": {"charging": false, "level": 0.42}},
                    "user_agent": {"enabled": true, "params": {"user_agent": "Mozilla/5.0 Test"}},
                    "port_scan_protection": {"enabled": true},
                    "console_output": {"mode": "disable"},
                    "do_not_track": {"enabled": true, "params": {"value": "1"}},
                    "webdriver_detection": {"mode": "disable"},
                    "cdp_protection": {"enabled": true}
                }
            }"#,
        );

        assert_eq!(policy.active_categories().len(), 22);
        assert_eq!(policy.language.languages, vec!["fr-FR", "fr"]);
        assert_eq!(policy.geolocation.longitude, 2.3522);
        assert_eq!(policy.screen_size.available_width, 2508);
        assert_eq!(policy.color_depth.depth, 30);
        assert_eq!(policy.touch_points.max_touch_points, 5);
        assert!((policy.display_zoom.scale_factor - 1.25).abs() < f32::EPSILON);
        assert_eq!(policy.canvas.noise_mode.as_deref(), Some("noise"));
        assert_eq!(policy.canvas_font.protected_fonts.len(), 2);
        assert!(!policy.battery.charging);
        assert_eq!(policy.user_agent.user_agent.as_deref(), Some("Mozilla/5.0 Test"));
        assert!(policy.console_output_disabled);
        assert!(policy.webdriver_detection_disabled);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let document = r#"{"settings": {
            "canvas": {"enabled": true, "mode": "noise", "params": {"noise_level": 0.2}},
            "battery": {"enabled": true, "params": {"charging": false}}
        }}"#;
        let first = resolve(document);
        let second = resolve(document);
        assert_eq!(first, second);
    }
}
