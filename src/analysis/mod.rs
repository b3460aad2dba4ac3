//! Text analysis module for Falx.
//!
//! This module provides the token model and the stemming token filter.
//! Tokenization and full analysis pipelines are the caller's concern;
//! the types here are the integration boundary a pipeline plugs into.

pub mod token;
pub mod token_filter;

// Re-export commonly used types
pub use token::*;
pub use token_filter::*;
