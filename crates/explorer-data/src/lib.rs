//! Data layer for the e-commerce dataset explorer.
//!
//! Reads the zipped CSV export, normalizes it into a typed table, checks
//! which aggregates the table supports and computes the per-view bundles.

pub mod aggregator;
pub mod analysis;
pub mod capabilities;
pub mod normalizer;
pub mod reader;
pub mod views;

pub use explorer_core as core;
