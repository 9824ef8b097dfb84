//! Shared foundation for the e-commerce dataset explorer.
//!
//! Holds the normalized table model, field coercion helpers, the error type,
//! command-line settings and display formatting used by every other crate.

pub mod data_processors;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{ExplorerError, Result};
