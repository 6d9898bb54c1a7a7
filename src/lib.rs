//! Wirescope: wiring reports for dependency-injection containers.
//!
//! This crate provides the analysis engine, re-exporting core primitives
//! from `wirescope-core` and organizing the declaration model, container
//! seam, analysis passes and report rendering.

pub use wirescope_core::{format_error_with_help, BindingKey, Qualifier, WireError, WireResult};

/// Core module re-exported from wirescope-core.
pub mod core {
    pub use wirescope_core::core::*;
}

/// Configuration management.
pub mod config;

/// Declaration model.
pub mod model;

/// Container SPI elements and parser.
pub mod spi;

/// Live container seam and snapshots.
pub mod container;

/// Analysis passes: index, overrides, filtering, implicit bindings, chains.
pub mod analysis;

/// Report rendering.
pub mod report;
