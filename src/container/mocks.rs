//! In-memory container view for testing

use super::traits::ContainerView;
use crate::spi::RawBinding;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use wirescope_core::BindingKey;

/// Mock container holding live bindings in memory.
///
/// Bindings flagged `just_in_time` are live but not explicit. Every
/// single-key lookup is recorded so tests can assert on fallback behavior.
///
/// # Example
///
/// ```
/// use wirescope::container::mocks::MockContainer;
/// use wirescope::container::ContainerView;
/// use wirescope::spi::{BindingTarget, RawBinding};
/// use wirescope::BindingKey;
///
/// let key = BindingKey::new("com.app.Service");
/// let container = MockContainer::new()
///     .with_binding(RawBinding::new(key.clone(), BindingTarget::Instance));
///
/// assert!(container.explicit_keys().contains(&key));
/// container.existing_binding(&key);
/// assert_eq!(container.lookups(), vec![key]);
/// ```
#[derive(Clone, Default)]
pub struct MockContainer {
    bindings: HashMap<BindingKey, RawBinding>,
    lookups: Arc<Mutex<Vec<BindingKey>>>,
}

impl MockContainer {
    /// Create an empty mock container
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a live binding (replaces any binding with the same key)
    pub fn with_binding(mut self, binding: RawBinding) -> Self {
        self.bindings.insert(binding.key.clone(), binding);
        self
    }

    /// Add several live bindings
    pub fn with_bindings<I>(self, bindings: I) -> Self
    where
        I: IntoIterator<Item = RawBinding>,
    {
        bindings.into_iter().fold(self, |c, b| c.with_binding(b))
    }

    /// Keys passed to `existing_binding`, in call order
    pub fn lookups(&self) -> Vec<BindingKey> {
        self.lookups.lock().unwrap().clone()
    }
}

impl ContainerView for MockContainer {
    fn all_bindings(&self) -> HashMap<BindingKey, RawBinding> {
        self.bindings.clone()
    }

    fn explicit_keys(&self) -> HashSet<BindingKey> {
        self.bindings
            .values()
            .filter(|b| !b.just_in_time)
            .map(|b| b.key.clone())
            .collect()
    }

    fn existing_binding(&self, key: &BindingKey) -> Option<RawBinding> {
        self.lookups.lock().unwrap().push(key.clone());
        self.bindings.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spi::BindingTarget;

    #[test]
    fn test_just_in_time_not_explicit() {
        let explicit = BindingKey::new("com.app.Service");
        let implicit = BindingKey::new("com.app.Clock");
        let container = MockContainer::new().with_bindings([
            RawBinding::new(explicit.clone(), BindingTarget::Instance),
            RawBinding::new(implicit.clone(), BindingTarget::Constructor).just_in_time(),
        ]);

        assert_eq!(container.all_bindings().len(), 2);
        let keys = container.explicit_keys();
        assert!(keys.contains(&explicit));
        assert!(!keys.contains(&implicit));
    }

    #[test]
    fn test_lookups_recorded() {
        let container = MockContainer::new();
        let key = BindingKey::new("com.app.Missing");
        assert!(container.existing_binding(&key).is_none());
        assert_eq!(container.lookups(), vec![key]);
    }
}
