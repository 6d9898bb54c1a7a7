//! Container SPI: raw binding elements and their parsing into the declaration model.

pub mod element;
pub mod parser;

pub use element::{BindingTarget, Element, ElementSource, RawBinding};
pub use parser::ModelParser;
