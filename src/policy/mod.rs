//! Fingerprint Override Policy
//!
//! This module turns one untrusted JSON configuration document into an
//! immutable, shareable policy that rendering subsystems query before
//! reporting any fingerprintable browser signal.
//!
//! # Modules
//!
//! - `categories` - Typed override categories and the aggregate policy
//! - `resolver` - Tolerant per-field resolution of configuration documents
//! - `store` - Atomic snapshot publication and per-signal accessors
//!
//! # Fail-Soft Guarantee
//!
//! Resolution never errors out. An unusable document leaves the previously
//! active policy untouched; a malformed category or field falls back to its
//! compiled-in default without affecting any other category. The safe state
//! is always "no overrides".
//!
//! # Example
//!
//! ```rust
//! use fingerprint_policy::policy::store::PolicyStore;
//!
//! let store = PolicyStore::new();
//! store.apply(
//!     r#"{
//!         "settings": {
//!             "hardware_concurrency": {"enabled": true, "params": {"cores": 12}},
//!             "webdriver_detection": {"mode": "disable"}
//!         }
//!     }"#,
//! );
//!
//! // Single values come from per-signal accessors.
//! assert_eq!(store.hardware_concurrency(), 12);
//!
//! // Related values should be read from one snapshot.
//! let policy = store.snapshot();
//! assert!(policy.hardware_concurrency.enabled);
//! assert!(policy.webdriver_detection_disabled);
//! ```

pub mod categories;
pub mod resolver;
pub mod store;

// Re-export commonly used types for convenience
pub use categories::FingerprintPolicy;
pub use resolver::resolve_document;
pub use store::PolicyStore;
