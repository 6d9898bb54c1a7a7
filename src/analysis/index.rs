//! Key indices over declaration sets.
//!
//! [`KeyIndex`] points into one module forest and is owned, together with the
//! forest, by a [`DeclarationSet`]. Structural changes to the forest go
//! through the set, which rebuilds the index afterwards. [`BindingIndex`] is
//! the merged, owning index used for cross-set queries once marking is done.

use crate::model::{module_types, BindingDeclaration, ModuleDeclaration};
use std::collections::HashMap;
use wirescope_core::BindingKey;

/// Location of a declaration: child positions from a root module, then the
/// declaration position inside the last module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationPath {
    modules: Vec<usize>,
    position: usize,
}

impl DeclarationPath {
    fn resolve<'a>(&self, modules: &'a [ModuleDeclaration]) -> Option<&'a BindingDeclaration> {
        let (first, rest) = self.modules.split_first()?;
        let mut module = modules.get(*first)?;
        for &child in rest {
            module = module.children.get(child)?;
        }
        module.declarations.get(self.position)
    }

    fn resolve_mut<'a>(
        &self,
        modules: &'a mut [ModuleDeclaration],
    ) -> Option<&'a mut BindingDeclaration> {
        let (first, rest) = self.modules.split_first()?;
        let mut module = modules.get_mut(*first)?;
        for &child in rest {
            module = module.children.get_mut(child)?;
        }
        module.declarations.get_mut(self.position)
    }
}

/// Key to declaration mapping for one module forest.
///
/// Keyless declarations are skipped. When a key occurs twice (a private module
/// binding and its exposure), the declaration with a target wins.
#[derive(Debug, Clone, Default)]
pub struct KeyIndex {
    entries: HashMap<BindingKey, DeclarationPath>,
}

impl KeyIndex {
    pub fn build(modules: &[ModuleDeclaration]) -> Self {
        let mut index = Self::default();
        let mut path = Vec::new();
        for (pos, module) in modules.iter().enumerate() {
            path.push(pos);
            index.collect(module, &mut path);
            path.pop();
        }
        index
    }

    fn collect(&mut self, module: &ModuleDeclaration, path: &mut Vec<usize>) {
        for (position, dec) in module.declarations.iter().enumerate() {
            let Some(key) = dec.key() else {
                continue;
            };
            if !self.entries.contains_key(key) || dec.target().is_some() {
                self.entries.insert(
                    key.clone(),
                    DeclarationPath {
                        modules: path.clone(),
                        position,
                    },
                );
            }
        }
        for (pos, child) in module.children.iter().enumerate() {
            path.push(pos);
            self.collect(child, path);
            path.pop();
        }
    }

    /// Declaration for `key` in the forest this index was built from
    pub fn get<'a>(
        &self,
        modules: &'a [ModuleDeclaration],
        key: &BindingKey,
    ) -> Option<&'a BindingDeclaration> {
        self.entries.get(key)?.resolve(modules)
    }

    pub fn get_mut<'a>(
        &self,
        modules: &'a mut [ModuleDeclaration],
        key: &BindingKey,
    ) -> Option<&'a mut BindingDeclaration> {
        self.entries.get(key)?.resolve_mut(modules)
    }

    pub fn contains_key(&self, key: &BindingKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &BindingKey> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A parsed module forest with its key index.
#[derive(Debug, Clone, Default)]
pub struct DeclarationSet {
    modules: Vec<ModuleDeclaration>,
    index: KeyIndex,
}

impl DeclarationSet {
    pub fn new(modules: Vec<ModuleDeclaration>) -> Self {
        let index = KeyIndex::build(&modules);
        Self { modules, index }
    }

    pub fn modules(&self) -> &[ModuleDeclaration] {
        &self.modules
    }

    pub fn index(&self) -> &KeyIndex {
        &self.index
    }

    pub fn get(&self, key: &BindingKey) -> Option<&BindingDeclaration> {
        self.index.get(&self.modules, key)
    }

    /// Mutable access for marker passes; the structure stays untouched.
    pub fn get_mut(&mut self, key: &BindingKey) -> Option<&mut BindingDeclaration> {
        self.index.get_mut(&mut self.modules, key)
    }

    /// Visit every declaration for marking
    pub fn mark_each<F>(&mut self, visitor: &mut F)
    where
        F: FnMut(&mut BindingDeclaration),
    {
        crate::model::visit_bindings_mut(&mut self.modules, visitor);
    }

    /// Number of real modules (the synthetic module excluded)
    pub fn module_count(&self) -> usize {
        module_types(&self.modules).len()
    }

    /// Number of indexed bindings shown in the report (synthetic ones excluded)
    pub fn binding_count(&self) -> usize {
        self.index
            .keys()
            .filter(|key| self.get(key).is_some_and(|dec| !dec.is_synthetic()))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Owning copy of the indexed declarations
    pub fn to_binding_index(&self) -> BindingIndex {
        let mut res = BindingIndex::default();
        for key in self.index.keys() {
            if let Some(dec) = self.get(key) {
                res.bindings.insert(key.clone(), dec.clone());
            }
        }
        res
    }
}

/// Merged key index across declaration sets, owning its declarations.
#[derive(Debug, Clone, Default)]
pub struct BindingIndex {
    bindings: HashMap<BindingKey, BindingDeclaration>,
}

impl BindingIndex {
    /// Put all entries of `other`, replacing entries with the same key.
    ///
    /// Merge only after override marking: replaced primary entries would
    /// otherwise never receive their markers.
    pub fn merge(&mut self, other: BindingIndex) {
        self.bindings.extend(other.bindings);
    }

    /// Insert a keyed declaration; keyless declarations are ignored.
    pub fn insert(&mut self, dec: BindingDeclaration) -> bool {
        match dec.key().cloned() {
            Some(key) => {
                self.bindings.insert(key, dec);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, key: &BindingKey) -> Option<&BindingDeclaration> {
        self.bindings.get(key)
    }

    pub fn contains_key(&self, key: &BindingKey) -> bool {
        self.bindings.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &BindingKey> {
        self.bindings.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &BindingDeclaration> {
        self.bindings.values()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl FromIterator<BindingDeclaration> for BindingIndex {
    fn from_iter<I: IntoIterator<Item = BindingDeclaration>>(iter: I) -> Self {
        let mut index = Self::default();
        for dec in iter {
            index.insert(dec);
        }
        index
    }
}
