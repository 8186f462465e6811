//! Labelgate Core
//!
//! Core types and utilities shared across labelgate components.
//!
//! This crate provides:
//! - Feature vectors and posterior mappings exchanged with classifiers
//! - Confidence extraction from posteriors
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{argmax, bag_of_words, features, Features, Posterior, PosteriorSelection};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{Features, Posterior, PosteriorSelection};
}
