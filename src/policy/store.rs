//! Shared policy store queried by rendering subsystems.
//!
//! The store holds one immutable [`FingerprintPolicy`] snapshot behind a
//! read-write lock. Publishing a new policy swaps the `Arc` atomically;
//! readers either see the complete old snapshot or the complete new one,
//! never a mix. A snapshot handed out once stays valid for as long as the
//! caller holds it, regardless of later updates.
//!
//! Subsystems that read a single value can use the per-signal accessors.
//! Anything that needs several values from the same generation should take
//! one [`PolicyStore::snapshot`] and read all of them from it.
//!
//! # Usage
//!
//! ```rust
//! use fingerprint_policy::policy::store::PolicyStore;
//!
//! let store = PolicyStore::new();
//! store.apply(
//!     r#"{"settings": {"timezone": {"enabled": true, "params": {"timezone": "UTC"}}}}"#,
//! );
//!
//! assert!(store.is_timezone_enabled());
//! assert_eq!(store.timezone().as_deref(), Some("UTC"));
//! ```

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::policy::categories::FingerprintPolicy;
use crate::policy::resolver;

static GLOBAL_STORE: Lazy<PolicyStore> = Lazy::new(PolicyStore::new);

/// Thread-safe holder of the active fingerprint policy.
pub struct PolicyStore {
    active: RwLock<Arc<FingerprintPolicy>>,
}

impl PolicyStore {
    /// Create a store holding the compiled-in default policy.
    pub fn new() -> Self {
        Self {
            active: RwLock::new(Arc::new(FingerprintPolicy::default())),
        }
    }

    /// The process-wide store most embedders use.
    pub fn global() -> &'static PolicyStore {
        &GLOBAL_STORE
    }

    /// Resolve a configuration document and publish the result.
    ///
    /// Returns `true` when a new policy was published. When the document is
    /// unusable as a whole (empty, invalid JSON, non-object root, no
    /// `settings` object), the previously active policy stays in place and
    /// `false` is returned.
    pub fn apply(&self, document: &str) -> bool {
        // Startup without a configuration hands in an empty string.
        if document.is_empty() {
            return false;
        }
        match resolver::resolve_document(document) {
            Some(policy) => {
                let active = policy.active_categories();
                info!(
                    "Fingerprint policy applied with {} active categories",
                    active.len()
                );
                if !active.is_empty() {
                    debug!("Active fingerprint categories: {}", active.join(", "));
                }
                self.publish(policy);
                true
            }
            None => {
                debug!("Fingerprint configuration unusable, keeping current policy");
                false
            }
        }
    }

    /// Atomically replace the active policy.
    pub fn publish(&self, policy: FingerprintPolicy) {
        *self.active.write() = Arc::new(policy);
    }

    /// Cheap handle to the currently active snapshot.
    pub fn snapshot(&self) -> Arc<FingerprintPolicy> {
        self.active.read().clone()
    }

    // ============================================================
    // Per-signal accessors
    // ============================================================
    //
    // Each call reads one consistent snapshot. Two consecutive calls may
    // straddle an update.

    pub fn is_language_enabled(&self) -> bool {
        self.snapshot().language.enabled
    }

    pub fn language(&self) -> Option<String> {
        self.snapshot().language.language.clone()
    }

    pub fn languages(&self) -> Vec<String> {
        self.snapshot().language.languages.clone()
    }

    pub fn is_timezone_enabled(&self) -> bool {
        self.snapshot().timezone.enabled
    }

    pub fn timezone(&self) -> Option<String> {
        self.snapshot().timezone.timezone.clone()
    }

    pub fn is_geolocation_enabled(&self) -> bool {
        self.snapshot().geolocation.enabled
    }

    pub fn latitude(&self) -> f64 {
        self.snapshot().geolocation.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.snapshot().geolocation.longitude
    }

    pub fn geolocation_accuracy(&self) -> f64 {
        self.snapshot().geolocation.accuracy
    }

    pub fn is_screen_resolution_enabled(&self) -> bool {
        self.snapshot().screen_resolution.enabled
    }

    pub fn screen_width(&self) -> u32 {
        self.snapshot().screen_resolution.width
    }

    pub fn screen_height(&self) -> u32 {
        self.snapshot().screen_resolution.height
    }

    pub fn is_display_zoom_enabled(&self) -> bool {
        self.snapshot().display_zoom.enabled
    }

    pub fn scale_factor(&self) -> f32 {
        self.snapshot().display_zoom.scale_factor
    }

    pub fn is_screen_size_enabled(&self) -> bool {
        self.snapshot().screen_size.enabled
    }

    pub fn available_width(&self) -> u32 {
        self.snapshot().screen_size.available_width
    }

    pub fn available_height(&self) -> u32 {
        self.snapshot().screen_size.available_height
    }

    pub fn is_color_depth_enabled(&self) -> bool {
        self.snapshot().color_depth.enabled
    }

    pub fn color_depth(&self) -> u32 {
        self.snapshot().color_depth.depth
    }

    pub fn is_touch_points_enabled(&self) -> bool {
        self.snapshot().touch_points.enabled
    }

    pub fn max_touch_points(&self) -> u32 {
        self.snapshot().touch_points.max_touch_points
    }

    pub fn is_canvas_enabled(&self) -> bool {
        self.snapshot().canvas.enabled
    }

    pub fn canvas_noise_mode(&self) -> Option<String> {
        self.snapshot().canvas.noise_mode.clone()
    }

    pub fn canvas_noise_seed(&self) -> Option<String> {
        self.snapshot().canvas.noise_seed.clone()
    }

    pub fn canvas_noise_level(&self) -> f32 {
        self.snapshot().canvas.noise_level
    }

    pub fn is_canvas_font_enabled(&self) -> bool {
        self.snapshot().canvas_font.enabled
    }

    pub fn protected_fonts(&self) -> Vec<String> {
        self.snapshot().canvas_font.protected_fonts.clone()
    }

    pub fn is_css_font_enabled(&self) -> bool {
        self.snapshot().css_font.enabled
    }

    pub fn css_font_noise_level(&self) -> f32 {
        self.snapshot().css_font.noise_level
    }

    pub fn is_webrtc_enabled(&self) -> bool {
        self.snapshot().webrtc.enabled
    }

    pub fn webrtc_mode(&self) -> Option<String> {
        self.snapshot().webrtc.mode.clone()
    }

    pub fn is_webgl_enabled(&self) -> bool {
        self.snapshot().webgl.enabled
    }

    pub fn webgl_noise_seed(&self) -> Option<String> {
        self.snapshot().webgl.noise_seed.clone()
    }

    pub fn webgl_noise_level(&self) -> f32 {
        self.snapshot().webgl.noise_level
    }

    pub fn is_hardware_concurrency_enabled(&self) -> bool {
        self.snapshot().hardware_concurrency.enabled
    }

    pub fn hardware_concurrency(&self) -> u32 {
        self.snapshot().hardware_concurrency.cores
    }

    pub fn is_device_memory_enabled(&self) -> bool {
        self.snapshot().device_memory.enabled
    }

    pub fn device_memory_gb(&self) -> u32 {
        self.snapshot().device_memory.memory_gb
    }

    pub fn is_battery_enabled(&self) -> bool {
        self.snapshot().battery.enabled
    }

    pub fn battery_charging(&self) -> bool {
        self.snapshot().battery.charging
    }

    pub fn battery_level(&self) -> f32 {
        self.snapshot().battery.level
    }

    pub fn is_user_agent_enabled(&self) -> bool {
        self.snapshot().user_agent.enabled
    }

    pub fn user_agent(&self) -> Option<String> {
        self.snapshot().user_agent.user_agent.clone()
    }

    pub fn is_port_scan_protection_enabled(&self) -> bool {
        self.snapshot().port_scan_protection
    }

    pub fn is_console_output_disabled(&self) -> bool {
        self.snapshot().console_output_disabled
    }

    pub fn is_do_not_track_enabled(&self) -> bool {
        self.snapshot().do_not_track.enabled
    }

    pub fn do_not_track_value(&self) -> Option<String> {
        self.snapshot().do_not_track.value.clone()
    }

    pub fn is_webdriver_detection_disabled(&self) -> bool {
        self.snapshot().webdriver_detection_disabled
    }

    pub fn is_cdp_protection_enabled(&self) -> bool {
        self.snapshot().cdp_protection
    }
}

impl Default for PolicyStore {
    fn default() -> Self {
        Self::new()
    }
}
