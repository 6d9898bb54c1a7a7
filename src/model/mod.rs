//! Declaration model: the structured, navigable form of a container's wiring.
//!
//! A parse pass produces a forest of [`ModuleDeclaration`]s, each owning its
//! [`BindingDeclaration`]s. The only mutable part after parsing is the marker
//! set carried by both node types; analysis passes attach their findings there.

pub mod declaration;
pub mod marker;
pub mod module;

pub use declaration::{BindingDeclaration, DeclarationKind, SpecialKind};
pub use marker::{Marker, Markers};
pub use module::{
    module_types, visit_bindings, visit_bindings_mut, visit_modules, ModuleDeclaration, JIT_MODULE,
};
