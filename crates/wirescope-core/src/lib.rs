//! Core primitives shared by the Wirescope engine and CLI.

pub mod core;

pub use core::error::{WireError, WireResult};
pub use core::error_help::format_error_with_help;
pub use core::key::{BindingKey, Qualifier};
