//! Analysis passes over parsed declaration sets.
//!
//! Pipeline: filter, index, mark (extensions, overrides, disablement), merge,
//! detect implicit bindings, resolve chains.

pub mod chains;
pub mod extensions;
pub mod filter;
pub mod implicit;
pub mod index;
pub mod overrides;

pub use chains::{BindingChain, ChainEnd, ChainHop, ChainResolver, HopKind};
pub use extensions::{mark_disabled, mark_extensions};
pub use filter::DeclarationFilter;
pub use implicit::{detect_implicit, ImplicitDetector};
pub use index::{BindingIndex, DeclarationPath, DeclarationSet, KeyIndex};
pub use overrides::mark_overrides;
