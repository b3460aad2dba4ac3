//! # Falx
//!
//! A multi-language suffix-stripping stemmer for full-text search pipelines.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - English, French, and German rule cascades
//! - Region-gated suffix rewriting with exception dictionaries
//! - Language dispatch by tag, defaulting to English
//! - Token filter integration for analysis pipelines
//!
//! ## Examples
//!
//! ```
//! use falx::analysis::token_filter::stem::stem;
//!
//! assert_eq!(stem("running", "en"), "run");
//! assert_eq!(stem("continuellement", "fr"), "continuel");
//! assert_eq!(stem("automatisierung", "de"), "automatisier");
//! ```

pub mod analysis;
pub mod error;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
