//! # Fingerprint Policy
//!
//! A fail-soft fingerprint override policy engine for browser-grade runtimes.
//!
//! One untrusted JSON document describes which browser signals to spoof
//! (timezone, screen geometry, canvas noise, battery state, ...). This crate
//! resolves that document into an immutable policy snapshot that rendering
//! subsystems query from any thread, and can also generate such documents.
//!
//! ## Features
//!
//! - **Tolerant Resolution**: malformed input degrades to safe defaults per
//!   field, never to an error
//! - **Atomic Publication**: readers see complete policy snapshots, never a
//!   mix of two generations
//! - **Full Category Catalogue**: 22 override categories, from language and
//!   geolocation to WebGL noise and DevTools-protocol hiding
//! - **Document Generation**: random, seed-reproducible, and template-based
//!   policy documents that resolve back loss-free
//!
//! ## Quick Start
//!
//! ```rust
//! use fingerprint_policy::{PolicyGenerator, PolicyStore};
//!
//! // Generate a complete policy document.
//! let document = PolicyGenerator::new().consistent("session-1");
//!
//! // Resolve it into the store rendering subsystems query.
//! let store = PolicyStore::new();
//! store.apply(&document.to_string());
//!
//! assert!(store.is_canvas_enabled());
//! assert!(store.is_webdriver_detection_disabled());
//! ```
//!
//! ## Module Overview
//!
//! - [`policy`]: Override categories, tolerant resolver, snapshot store
//! - [`generator`]: Policy document generation and templates
//!
//! ## Architecture
//!
//! ```text
//! configuration document (JSON text)
//!              │
//!              ▼
//!     ┌─────────────────┐      ┌──────────────────┐
//!     │ Policy Resolver │ ───▶ │   Policy Store   │ ◀── signal consumers
//!     └─────────────────┘      │ (atomic snapshot)│     (readers, any thread)
//!              ▲               └──────────────────┘
//!              │
//!     ┌─────────────────┐
//!     │ Policy Generator│  (random / seeded / template)
//!     └─────────────────┘
//! ```
//!
//! A document that cannot be used at all leaves the store untouched; a
//! partially broken document degrades only the affected categories. The safe
//! state is always "report the real value".

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Full version string with name
pub const FULL_VERSION: &str = concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Module Exports
// ============================================================================

/// Override categories, tolerant document resolution, and the policy store.
pub mod policy;

/// Generation of random, seeded, and template-based policy documents.
pub mod generator;

// ============================================================================
// Re-exports for Convenience
// ============================================================================

// Policy types
pub use policy::categories::{
    BatteryOverride, CanvasFontOverride, CanvasOverride, ColorDepthOverride, CssFontOverride,
    DeviceMemoryOverride, DisplayZoomOverride, DoNotTrackOverride, FingerprintPolicy,
    GeolocationOverride, HardwareConcurrencyOverride, LanguageOverride, ScreenResolutionOverride,
    ScreenSizeOverride, TimezoneOverride, TouchPointsOverride, UserAgentOverride, WebGlOverride,
    WebRtcOverride,
};
pub use policy::resolver::resolve_document;
pub use policy::store::PolicyStore;

// Generator types
pub use generator::{
    expand_language, load_template, save_document, GeneratorError, GeneratorOptions,
    PolicyGenerator,
};

// ============================================================================
// Prelude Module
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```rust
/// use fingerprint_policy::prelude::*;
/// ```
pub mod prelude {
    pub use crate::generator::{GeneratorOptions, PolicyGenerator};
    pub use crate::policy::{resolve_document, FingerprintPolicy, PolicyStore};
    pub use crate::{FULL_VERSION, NAME, VERSION};
}
