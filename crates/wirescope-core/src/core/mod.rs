pub mod error;
pub mod error_help;
pub mod key;
pub mod path;

pub use error::{WireError, WireResult};
