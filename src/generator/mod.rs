//! Policy Document Generation
//!
//! Everything the resolver consumes can also be produced here: random
//! fingerprint documents, seed-reproducible documents, and documents derived
//! from existing templates. Generated documents always cover the full
//! category catalogue, so resolving one activates every override.
//!
//! # Modules
//!
//! - `pools` - Constant value pools the generator draws from
//! - `generator` - Document assembly, options, template handling
//!
//! # Example
//!
//! ```rust
//! use fingerprint_policy::generator::PolicyGenerator;
//! use fingerprint_policy::policy::resolver::resolve_document;
//!
//! let document = PolicyGenerator::new().random();
//! let policy = resolve_document(&document.to_string()).unwrap();
//! assert!(policy.user_agent.enabled);
//! ```

pub mod generator;
pub mod pools;

// Re-export commonly used types for convenience
pub use generator::{
    expand_language, load_template, save_document, GeneratorError, GeneratorOptions,
    PolicyGenerator,
};
