use crate::model::{Marker, ModuleDeclaration};
use std::collections::HashSet;

/// Removes ignored content from module trees before indexing.
///
/// - modules whose type is ignored, or (real modules only) whose type starts
///   with an ignored package, are dropped with their subtree;
/// - disabled modules keep their node, marked `REMOVED`, with the subtree cleared;
/// - declarations whose key raw type starts with an ignored package are dropped.
///
/// Filtering only removes; the order of what remains is unchanged.
#[derive(Debug, Clone, Default)]
pub struct DeclarationFilter {
    ignore_modules: HashSet<String>,
    ignore_packages: Vec<String>,
    disabled_modules: HashSet<String>,
}

impl DeclarationFilter {
    /// Create a filter from ignored module types and package prefixes
    pub fn new<M, P>(ignore_modules: M, ignore_packages: P) -> Self
    where
        M: IntoIterator<Item = String>,
        P: IntoIterator<Item = String>,
    {
        Self {
            ignore_modules: ignore_modules.into_iter().collect(),
            ignore_packages: ignore_packages.into_iter().collect(),
            disabled_modules: HashSet::new(),
        }
    }

    /// Modules removed from the container at startup
    pub fn with_disabled_modules<D>(mut self, disabled: D) -> Self
    where
        D: IntoIterator<Item = String>,
    {
        self.disabled_modules = disabled.into_iter().collect();
        self
    }

    /// Check if a type name starts with one of the ignored packages
    pub fn ignores_type(&self, type_name: &str) -> bool {
        self.ignore_packages
            .iter()
            .any(|pkg| type_name.starts_with(pkg.as_str()))
    }

    /// Check if a module (with its subtree) is dropped entirely
    pub fn ignores_module(&self, module: &ModuleDeclaration) -> bool {
        self.ignore_modules.contains(&module.type_name)
            || (!module.jit_module && self.ignores_type(&module.type_name))
    }

    pub fn is_disabled(&self, module: &ModuleDeclaration) -> bool {
        self.disabled_modules.contains(&module.type_name)
    }

    /// Filter a module forest in place
    pub fn apply(&self, modules: &mut Vec<ModuleDeclaration>) {
        modules.retain(|module| !self.ignores_module(module));
        for module in modules.iter_mut() {
            if self.is_disabled(module) {
                module.clear();
                module.markers.insert(Marker::Removed);
            } else {
                module.declarations.retain(|dec| {
                    !dec
                        .key()
                        .is_some_and(|key| self.ignores_type(key.raw_type()))
                });
            }
            self.apply(&mut module.children);
        }
    }
}
