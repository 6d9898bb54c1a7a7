//! Report rendering: module trees, undeclared bindings and binding chains.

pub mod bindings;
pub mod json;
pub mod render;
pub mod tree;

pub use bindings::{BindingsReport, ReportInput, ReportSection, SectionFailure};
pub use json::{to_json_report, JsonReport};
pub use render::{abbreviate, declaration_line, module_line, render_element, undeclared_line};
pub use tree::TreeNode;
