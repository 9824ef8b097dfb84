//! Terminal UI layer for the e-commerce dataset explorer.
//!
//! Provides themes, the header, KPI and bar chart components, one view per
//! dashboard tab, and the application event loop built on top of
//! [`ratatui`].

pub mod app;
pub mod components;
pub mod heatmap_view;
pub mod notes_view;
pub mod overview_view;
pub mod themes;
pub mod visual_view;

pub use explorer_core as core;
