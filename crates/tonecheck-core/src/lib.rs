//! tonecheck Core
//!
//! Types shared across the tonecheck crates.
//!
//! This crate provides:
//! - The error taxonomy used by classifiers and the tone validator
//! - The `Result` alias every public operation returns

pub mod error;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
}
