//! Override category data model.
//!
//! Each spoofable browser signal is one *override category*: an `enabled`
//! flag plus the typed parameters a rendering subsystem needs to report the
//! spoofed value. Every field carries a compiled-in default so that a store
//! which was never initialized, or a category the configuration document
//! left out, is always in a well-defined state.
//!
//! Parameters are only meaningful while `enabled` is true; consumers must
//! check the flag before applying a value. The defaults stay well-formed
//! either way.

use serde::Serialize;

/// Spoofed `navigator.language` / `navigator.languages`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LanguageOverride {
    pub enabled: bool,
    /// Primary language tag reported to pages (e.g. "en-US").
    pub language: Option<String>,
    /// Full accepted-language list, in preference order.
    pub languages: Vec<String>,
}

/// Spoofed IANA timezone (e.g. "Asia/Shanghai").
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimezoneOverride {
    pub enabled: bool,
    pub timezone: Option<String>,
}

/// Coordinates handed to the geolocation API instead of the real position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeolocationOverride {
    pub enabled: bool,
    pub latitude: f64,
    pub longitude: f64,
    /// Reported accuracy radius in meters.
    pub accuracy: f64,
}

impl Default for GeolocationOverride {
    fn default() -> Self {
        Self {
            enabled: false,
            latitude: 0.0,
            longitude: 0.0,
            accuracy: 100.0,
        }
    }
}

/// Spoofed `screen.width` / `screen.height`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenResolutionOverride {
    pub enabled: bool,
    pub width: u32,
    pub height: u32,
}

impl Default for ScreenResolutionOverride {
    fn default() -> Self {
        Self {
            enabled: false,
            width: 1920,
            height: 1080,
        }
    }
}

/// Spoofed device scale factor (`window.devicePixelRatio`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayZoomOverride {
    pub enabled: bool,
    pub scale_factor: f32,
}

impl Default for DisplayZoomOverride {
    fn default() -> Self {
        Self {
            enabled: false,
            scale_factor: 1.0,
        }
    }
}

/// Spoofed available screen area (`screen.availWidth` / `screen.availHeight`),
/// i.e. the desktop minus taskbars and window chrome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenSizeOverride {
    pub enabled: bool,
    pub available_width: u32,
    pub available_height: u32,
}

impl Default for ScreenSizeOverride {
    fn default() -> Self {
        Self {
            enabled: false,
            available_width: 1880,
            available_height: 1040,
        }
    }
}

/// Spoofed `screen.colorDepth` in bits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorDepthOverride {
    pub enabled: bool,
    pub depth: u32,
}

impl Default for ColorDepthOverride {
    fn default() -> Self {
        Self {
            enabled: false,
            depth: 24,
        }
    }
}

/// Spoofed `navigator.maxTouchPoints` (0 for non-touch devices).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TouchPointsOverride {
    pub enabled: bool,
    pub max_touch_points: u32,
}

/// Canvas readback noise configuration.
///
/// The noise itself is injected by the canvas subsystem; this only carries
/// how it was asked to behave.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CanvasOverride {
    pub enabled: bool,
    /// Noise strategy name from the category-level `mode` key.
    pub noise_mode: Option<String>,
    /// Opaque seed; identical seeds reproduce identical noise.
    pub noise_seed: Option<String>,
    pub noise_level: f32,
}

/// Fonts whose canvas text metrics must not leak.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CanvasFontOverride {
    pub enabled: bool,
    pub protected_fonts: Vec<String>,
}

/// Noise applied to CSS font measurement probes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CssFontOverride {
    pub enabled: bool,
    pub noise_level: f32,
}

/// WebRTC address handling policy (mode string interpreted by the WebRTC
/// subsystem, e.g. "auto_replace").
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WebRtcOverride {
    pub enabled: bool,
    pub mode: Option<String>,
}

/// WebGL readback noise configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WebGlOverride {
    pub enabled: bool,
    pub noise_seed: Option<String>,
    pub noise_level: f32,
}

/// Spoofed `navigator.hardwareConcurrency`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HardwareConcurrencyOverride {
    pub enabled: bool,
    pub cores: u32,
}

impl Default for HardwareConcurrencyOverride {
    fn default() -> Self {
        Self {
            enabled: false,
            cores: 8,
        }
    }
}

/// Spoofed `navigator.deviceMemory` in gigabytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceMemoryOverride {
    pub enabled: bool,
    pub memory_gb: u32,
}

impl Default for DeviceMemoryOverride {
    fn default() -> Self {
        Self {
            enabled: false,
            memory_gb: 8,
        }
    }
}

/// Battery state reported by the Battery Status API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatteryOverride {
    pub enabled: bool,
    pub charging: bool,
    /// Charge level in `[0.0, 1.0]`.
    pub level: f32,
}

impl Default for BatteryOverride {
    fn default() -> Self {
        Self {
            enabled: false,
            charging: true,
            level: 0.8,
        }
    }
}

/// Replacement User-Agent string.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserAgentOverride {
    pub enabled: bool,
    pub user_agent: Option<String>,
}

/// Forced Do-Not-Track header/property value ("1", "0", "unspecified", ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DoNotTrackOverride {
    pub enabled: bool,
    pub value: Option<String>,
}

/// The fully resolved override policy: one immutable snapshot of every
/// category.
///
/// `Default` is the compiled-in safe state: nothing enabled, every parameter
/// at the value documented on its category struct. The resolver produces new
/// instances; nothing mutates a published one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FingerprintPolicy {
    pub language: LanguageOverride,
    pub timezone: TimezoneOverride,
    pub geolocation: GeolocationOverride,
    pub screen_resolution: ScreenResolutionOverride,
    pub display_zoom: DisplayZoomOverride,
    pub screen_size: ScreenSizeOverride,
    pub color_depth: ColorDepthOverride,
    pub touch_points: TouchPointsOverride,
    pub canvas: CanvasOverride,
    pub canvas_font: CanvasFontOverride,
    pub css_font: CssFontOverride,
    pub webrtc: WebRtcOverride,
    pub webgl: WebGlOverride,
    pub hardware_concurrency: HardwareConcurrencyOverride,
    pub device_memory: DeviceMemoryOverride,
    pub battery: BatteryOverride,
    pub user_agent: UserAgentOverride,
    /// Blocks pages from probing localhost ports. Flag only.
    pub port_scan_protection: bool,
    /// True when the document asked for console output to be swallowed
    /// (`console_output.mode == "disable"`).
    pub console_output_disabled: bool,
    pub do_not_track: DoNotTrackOverride,
    /// True when webdriver detection surfaces are suppressed
    /// (`webdriver_detection.mode == "disable"`).
    pub webdriver_detection_disabled: bool,
    /// Hides DevTools-protocol attachment from page scripts. Flag only.
    pub cdp_protection: bool,
}

impl FingerprintPolicy {
    /// Names of the categories whose override is active in this snapshot,
    /// including the two inverted ("disabled iff") categories.
    pub fn active_categories(&self) -> Vec<&'static str> {
        let mut active = Vec::new();
        if self.language.enabled {
            active.push("language");
        }
        if self.timezone.enabled {
            active.push("timezone");
        }
        if self.geolocation.enabled {
            active.push("geolocation");
        }
        if self.screen_resolution.enabled {
            active.push("screen_resolution");
        }
        if self.display_zoom.enabled {
            active.push("display_zoom");
        }
        if self.screen_size.enabled {
            active.push("screen_size");
        }
        if self.color_depth.enabled {
            active.push("color_depth");
        }
        if self.touch_points.enabled {
            active.push("touch_points");
        }
        if self.canvas.enabled {
            active.push("canvas");
        }
        if self.canvas_font.enabled {
            active.push("canvas_font");
        }
        if self.css_font.enabled {
            active.push("css_font");
        }
        if self.webrtc.enabled {
            active.push("webrtc");
        }
        if self.webgl.enabled {
            active.push("webgl");
        }
        if self.hardware_concurrency.enabled {
            active.push("hardware_concurrency");
        }
        if self.device_memory.enabled {
            active.push("device_memory");
        }
        if self.battery.enabled {
            active.push("battery");
        }
        if self.user_agent.enabled {
            active.push("user_agent");
        }
        if self.port_scan_protection {
            active.push("port_scan_protection");
        }
        if self.console_output_disabled {
            active.push("console_output");
        }
        if self.do_not_track.enabled {
            active.push("do_not_track");
        }
        if self.webdriver_detection_disabled {
            active.push("webdriver_detection");
        }
        if self.cdp_protection {
            active.push("cdp_protection");
        }
        active
    }
}
