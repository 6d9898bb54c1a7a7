//! Trait definitions for live container access

use crate::spi::RawBinding;
use std::collections::{HashMap, HashSet};
use wirescope_core::BindingKey;

/// Read-only view of a started container.
///
/// Implementations should be thread-safe (Send + Sync): a single view may be
/// shared by report runs, each of which builds its own model from scratch.
#[cfg_attr(test, mockall::automock)]
pub trait ContainerView: Send + Sync {
    /// Every binding the container can currently produce, explicit or not
    fn all_bindings(&self) -> HashMap<BindingKey, RawBinding>;

    /// Keys the container itself considers explicitly bound
    fn explicit_keys(&self) -> HashSet<BindingKey>;

    /// Live lookup of a single key
    fn existing_binding(&self, key: &BindingKey) -> Option<RawBinding>;
}
