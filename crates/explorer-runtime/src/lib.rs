//! Runtime layer for the e-commerce dataset explorer.
//!
//! Owns the single lazily loaded dataset and the interactive selection
//! state the dashboard renders from.

pub mod dashboard;
pub mod data_provider;

pub use explorer_core as core;
pub use explorer_data as data;
