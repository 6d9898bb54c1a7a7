//! Implicit (undeclared) binding detection.
//!
//! The live container knows every key it can produce. Removing the keys the
//! container considers explicit, every declared key, every link target and
//! every extension type leaves the bindings nobody declared.

use crate::analysis::filter::DeclarationFilter;
use crate::analysis::index::BindingIndex;
use crate::container::ContainerView;
use crate::model::ModuleDeclaration;
use crate::spi::{ModelParser, RawBinding};
use std::collections::{HashMap, HashSet};
use wirescope_core::{BindingKey, WireError, WireResult};

/// Live bindings that are neither declared nor a consequence of a declaration.
///
/// Pure: the same inputs always produce the same (key ordered) result.
pub fn detect_implicit(
    live: &HashMap<BindingKey, RawBinding>,
    explicit: &HashSet<BindingKey>,
    declared: &BindingIndex,
    extensions: &[String],
) -> Vec<RawBinding> {
    let mut resolvable: HashSet<&BindingKey> = explicit.iter().collect();
    for dec in declared.values() {
        resolvable.extend(dec.key());
        // bind(A).to(B) makes B resolvable without declaring it
        resolvable.extend(dec.target());
    }
    let extension_types: HashSet<&str> = extensions.iter().map(String::as_str).collect();

    let mut res: Vec<RawBinding> = live
        .iter()
        .filter(|(key, _)| !resolvable.contains(key))
        .filter(|(key, _)| !extension_types.contains(key.raw_type()))
        .map(|(_, binding)| binding.clone())
        .collect();
    res.sort_by(|a, b| a.key.cmp(&b.key));
    res
}

/// Builds the synthetic module of undeclared bindings.
pub struct ImplicitDetector<'c> {
    container: &'c dyn ContainerView,
    parser: ModelParser<'c>,
}

impl<'c> ImplicitDetector<'c> {
    pub fn new(container: &'c dyn ContainerView) -> Self {
        Self {
            container,
            parser: ModelParser::new(container),
        }
    }

    /// Implicit bindings of the container against the merged declared index
    pub fn detect(&self, declared: &BindingIndex, extensions: &[String]) -> Vec<RawBinding> {
        detect_implicit(
            &self.container.all_bindings(),
            &self.container.explicit_keys(),
            declared,
            extensions,
        )
    }

    /// Parse and filter the implicit bindings into the synthetic module, and
    /// register its keyed declarations in `declared` so chains ending in an
    /// implicit binding terminate normally. Synthetic provider bindings are
    /// registered but not kept in the module.
    ///
    /// `Ok(None)` when nothing implicit survives. More than one resulting
    /// module is an invariant violation.
    pub fn resolve(
        &self,
        declared: &mut BindingIndex,
        filter: &DeclarationFilter,
        extensions: &[String],
    ) -> WireResult<Option<ModuleDeclaration>> {
        let implicit = self.detect(declared, extensions);
        if implicit.is_empty() {
            return Ok(None);
        }
        tracing::debug!(count = implicit.len(), "Detected implicit bindings");

        let mut modules = self.parser.parse_bindings(implicit)?;
        filter.apply(&mut modules);
        if modules.is_empty() {
            return Ok(None);
        }
        if modules.len() != 1 {
            return Err(WireError::Invariant(format!(
                "One module expected, but got {}",
                modules.len()
            )));
        }

        let mut module = modules.swap_remove(0);
        for dec in &module.declarations {
            // converted constants, for example, take part in chains
            declared.insert(dec.clone());
        }
        module.declarations.retain(|dec| !dec.is_synthetic());
        if module.declarations.is_empty() {
            return Ok(None);
        }
        Ok(Some(module))
    }
}
