//! SPI parser: raw element stream to declaration model.
//!
//! Elements are grouped by their module chain (innermost module first) into a
//! flat module index, which is then assembled into a sorted forest. Private
//! modules are parsed into their own index and merged, keeping modules that
//! are already known from the enclosing stream.

use crate::container::ContainerView;
use crate::model::{
    visit_bindings_mut, BindingDeclaration, DeclarationKind, Marker, ModuleDeclaration,
    SpecialKind, JIT_MODULE,
};
use crate::spi::element::{BindingTarget, Element, ElementSource, RawBinding};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use wirescope_core::core::key::{render_key, simple_name};
use wirescope_core::{BindingKey, WireError, WireResult};

/// Qualifier of multibinder set/map entries
const MULTIBINDING_ELEMENT: &str = "com.google.inject.internal.Element";
/// Qualifier prefix of optional binder internals
const OPTIONAL_BINDER: &str = "com.google.inject.internal.RealOptionalBinder";
/// Qualifier prefix of container-internal instance bindings
const UNIQUE_ANNOTATIONS: &str = "com.google.inject.internal.UniqueAnnotations";

const EAGER_SINGLETON: &str = "EagerSingleton";
const SINGLETON: &str = "jakarta.inject.Singleton";

/// Converts raw elements into [`ModuleDeclaration`] trees.
///
/// The container view is used to read the actually configured scope of each
/// binding and to resolve bindings exposed from private modules.
pub struct ModelParser<'c> {
    container: &'c dyn ContainerView,
    web_modules: HashSet<String>,
}

impl<'c> ModelParser<'c> {
    pub fn new(container: &'c dyn ContainerView) -> Self {
        Self {
            container,
            web_modules: HashSet::new(),
        }
    }

    /// Module types the exporter flagged as servlet modules; marked `WEB`
    pub fn with_web_modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.web_modules.extend(modules.into_iter().map(Into::into));
        self
    }

    /// Parse an element stream into a module forest.
    ///
    /// Unknown element shapes never fail the parse. A module reached through
    /// two different parents is an invariant violation.
    pub fn parse(&self, elements: &[Element]) -> WireResult<Vec<ModuleDeclaration>> {
        let mut index = ModuleIndex::default();
        self.index_elements(&mut index, elements)?;
        if !self.web_modules.is_empty() {
            for module in index.modules.iter_mut() {
                if self.web_modules.contains(&module.type_name) {
                    module.markers.insert(Marker::Web);
                }
            }
        }
        let modules = index.into_tree();
        tracing::debug!(
            elements = elements.len(),
            roots = modules.len(),
            "Parsed element stream"
        );
        Ok(modules)
    }

    /// Parse live bindings (as returned by the container) into a module forest.
    pub fn parse_bindings<I>(&self, bindings: I) -> WireResult<Vec<ModuleDeclaration>>
    where
        I: IntoIterator<Item = RawBinding>,
    {
        let elements: Vec<Element> = bindings.into_iter().map(Element::Binding).collect();
        self.parse(&elements)
    }

    /// Parse a single element. `None` for elements that carry no structure
    /// (requests, lookups, messages, options, private module containers) and
    /// for container-internal bindings.
    pub fn parse_element(&self, element: &Element) -> Option<BindingDeclaration> {
        let mut dec = match element {
            Element::Binding(binding) => classify(binding)?,
            Element::Interceptor { interceptors, .. } => {
                BindingDeclaration::special(SpecialKind::Aop, interceptors.clone())
            }
            Element::Scope { annotation, .. } => {
                BindingDeclaration::special(SpecialKind::Scope, Vec::new())
                    .with_scope(annotation.clone())
            }
            Element::TypeListener { listener, .. } => {
                BindingDeclaration::special(SpecialKind::TypeListener, vec![listener.clone()])
            }
            Element::ProvisionListener { listeners, .. } => {
                BindingDeclaration::special(SpecialKind::ProvisionListener, listeners.clone())
            }
            Element::TypeConverter { converter, .. } => {
                BindingDeclaration::special(SpecialKind::TypeConverter, vec![converter.clone()])
            }
            Element::Other { description, .. } => {
                BindingDeclaration::special(SpecialKind::Unknown, vec![description.clone()])
            }
            Element::Unrecognized => {
                tracing::warn!("Unrecognized element kept as unknown declaration");
                BindingDeclaration::special(SpecialKind::Unknown, Vec::new())
            }
            Element::PrivateModule { .. }
            | Element::InjectionRequest { .. }
            | Element::ProviderLookup { .. }
            | Element::Message { .. }
            | Element::ContainerOption { .. } => return None,
        };

        self.fill_declaration(&mut dec, element);
        fill_source(&mut dec, element);
        dec.module = Some(module_path(element).swap_remove(0));

        let annotation = dec.key().and_then(|k| k.qualifier()).map(|q| q.annotation.clone());
        if let Some(annotation) = annotation {
            if annotation == MULTIBINDING_ELEMENT {
                dec.special = vec!["multibinding".to_string()];
            }
            if annotation.starts_with(OPTIONAL_BINDER) {
                dec.special = vec!["optional binding".to_string()];
            }
        }
        Some(dec)
    }

    /// Parse a single live binding
    pub fn parse_binding(&self, binding: &RawBinding) -> Option<BindingDeclaration> {
        self.parse_element(&Element::Binding(binding.clone()))
    }

    fn index_elements(&self, index: &mut ModuleIndex, elements: &[Element]) -> WireResult<()> {
        for element in elements {
            if let Element::PrivateModule {
                source,
                elements,
                exposed,
            } = element
            {
                self.index_private(index, source, elements, exposed)?;
                continue;
            }
            let Some(dec) = self.parse_element(element) else {
                continue;
            };
            // entire chain is registered: modules may only install other modules
            let pos = index.init_modules(&module_path(element))?;
            index.modules[pos].declarations.push(dec);
        }
        Ok(())
    }

    fn index_private(
        &self,
        index: &mut ModuleIndex,
        source: &ElementSource,
        elements: &[Element],
        exposed: &[BindingKey],
    ) -> WireResult<()> {
        let declaring = source
            .modules
            .first()
            .map(String::as_str)
            .unwrap_or(JIT_MODULE);
        let mut private = ModuleIndex::default();
        self.index_elements(&mut private, elements)?;
        let exposed_keys: HashSet<&BindingKey> = exposed.iter().collect();

        for mut module in private.modules {
            if index.contains(&module.type_name) {
                continue;
            }
            if module.type_name == declaring {
                module.private_module = true;
                module.markers.insert(Marker::Private);
            }
            visit_bindings_mut(std::slice::from_mut(&mut module), &mut |dec| {
                if dec.key().is_some_and(|k| exposed_keys.contains(k)) {
                    dec.markers.insert(Marker::Exposed);
                }
            });
            index.push(module);
        }

        // exposed bindings are only visible in the container, not in module elements
        for key in exposed {
            // only the first private level is exposed to the container
            let Some(binding) = self.container.existing_binding(key) else {
                tracing::debug!(key = %key, "Exposed key not bound in container");
                continue;
            };
            if let Some(dec) = self.parse_binding(&binding) {
                let module = dec.module.clone().unwrap_or_else(|| JIT_MODULE.to_string());
                let pos = index.module(&module);
                index.modules[pos].declarations.push(dec);
            }
        }
        Ok(())
    }

    /// Scope and AOP come from the live binding: module elements do not carry
    /// the effective scope.
    fn fill_declaration(&self, dec: &mut BindingDeclaration, element: &Element) {
        let Some(key) = dec.key() else {
            return;
        };
        let existing = match (self.container.existing_binding(key), element) {
            (Some(binding), _) => binding,
            (None, Element::Binding(binding)) => binding.clone(),
            (None, _) => return,
        };

        dec.scope = existing.scope.map(|scope| {
            if simple_name(&scope) == EAGER_SINGLETON {
                SINGLETON.to_string()
            } else {
                scope
            }
        });
        if existing.target == BindingTarget::Constructor && !existing.interceptors.is_empty() {
            dec.markers.insert(Marker::Aop);
        }
    }
}

/// Kind decision for a binding; `None` for internal instance bindings.
fn classify(binding: &RawBinding) -> Option<BindingDeclaration> {
    let key = binding.key.clone();
    let dec = match &binding.target {
        BindingTarget::Instance => {
            let internal = key
                .qualifier()
                .is_some_and(|q| q.annotation.starts_with(UNIQUE_ANNOTATIONS));
            if internal {
                return None;
            }
            BindingDeclaration::new(DeclarationKind::Instance, Some(key))
        }
        BindingTarget::ProviderInstance { provider } => {
            BindingDeclaration::new(DeclarationKind::ProviderInstance, Some(key))
                .with_provided_by(provider.clone())
        }
        BindingTarget::ProviderKey { provider } => {
            BindingDeclaration::new(DeclarationKind::ProviderKey, Some(key))
                .with_provided_by(provider.render())
        }
        BindingTarget::LinkedKey { linked } => BindingDeclaration::linked(key, linked.clone()),
        BindingTarget::Untargetted => {
            BindingDeclaration::new(DeclarationKind::Untargetted, Some(key))
        }
        BindingTarget::Constructor => {
            BindingDeclaration::new(DeclarationKind::Constructor, Some(key))
        }
        BindingTarget::ConvertedConstant {
            source_key,
            converter,
        } => BindingDeclaration::converted(key, source_key.clone(), converter),
        BindingTarget::Exposed => BindingDeclaration::new(DeclarationKind::Exposed, Some(key)),
        BindingTarget::Provider { provided } => {
            BindingDeclaration::new(DeclarationKind::Synthetic, Some(key))
                .with_provided_by(provided.render())
        }
        // mappings are declared under the filter or servlet type, not the internal key
        BindingTarget::FilterKey { pattern, filter } => {
            BindingDeclaration::web(DeclarationKind::FilterKey, filter.clone(), pattern.as_str())
        }
        BindingTarget::FilterInstance { pattern, filter } => BindingDeclaration::web(
            DeclarationKind::FilterInstance,
            BindingKey::new(filter.as_str()),
            pattern.as_str(),
        ),
        BindingTarget::ServletKey { pattern, servlet } => {
            BindingDeclaration::web(DeclarationKind::ServletKey, servlet.clone(), pattern.as_str())
        }
        BindingTarget::ServletInstance { pattern, servlet } => BindingDeclaration::web(
            DeclarationKind::ServletInstance,
            BindingKey::new(servlet.as_str()),
            pattern.as_str(),
        ),
    };
    Some(dec)
}

fn fill_source(dec: &mut BindingDeclaration, element: &Element) {
    let source = element.source();
    if let Some(declaring) = source.and_then(|s| s.declaring.as_deref()) {
        dec.source = Some(declaring.to_string());
        dec.source_line = source.map(ElementSource::source_line).unwrap_or(0);
        return;
    }
    if !element.modules().is_empty() {
        // module element without declaration point
        return;
    }
    match element {
        // created on demand: the bound type is the only source
        Element::Binding(binding) => dec.source = Some(binding.key.raw_type().to_string()),
        _ => tracing::warn!("Unknown element '{}' source", dec),
    }
}

/// Module chain of an element; module-less elements belong to the synthetic module.
fn module_path(element: &Element) -> Vec<String> {
    match element.modules() {
        [] => vec![JIT_MODULE.to_string()],
        modules => modules.to_vec(),
    }
}

/// Flat module registry, in first-seen order.
#[derive(Default)]
struct ModuleIndex {
    modules: Vec<ModuleDeclaration>,
    positions: HashMap<String, usize>,
}

impl ModuleIndex {
    fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    fn push(&mut self, module: ModuleDeclaration) -> usize {
        let pos = self.modules.len();
        self.positions.insert(module.type_name.clone(), pos);
        self.modules.push(module);
        pos
    }

    /// Position of the named module, registering it when new
    fn module(&mut self, name: &str) -> usize {
        if let Some(&pos) = self.positions.get(name) {
            return pos;
        }
        let module = if name == JIT_MODULE {
            ModuleDeclaration::jit()
        } else {
            ModuleDeclaration::new(name)
        };
        self.push(module)
    }

    /// Register every module of the chain and return the innermost one.
    fn init_modules(&mut self, path: &[String]) -> WireResult<usize> {
        let mut innermost = None;
        for (i, name) in path.iter().enumerate() {
            let parent = path.get(i + 1);
            let known = self.contains(name);
            let pos = self.module(name);
            let module = &mut self.modules[pos];
            if known && module.parent.as_ref() != parent {
                return Err(WireError::Invariant(format!(
                    "Parents don't match for module {}: '{}' and '{}' in path ({})",
                    name,
                    module.parent.as_deref().unwrap_or("-"),
                    parent.map(String::as_str).unwrap_or("-"),
                    path.join("-")
                )));
            }
            module.parent = parent.cloned();
            innermost.get_or_insert(pos);
        }
        innermost.ok_or_else(|| WireError::Invariant("Empty module path".to_string()))
    }

    /// Assemble the forest: children under their parents, declarations in
    /// declaration order, modules by name with the synthetic module last.
    fn into_tree(self) -> Vec<ModuleDeclaration> {
        let ModuleIndex { modules, positions } = self;
        let mut children: HashMap<String, Vec<String>> = HashMap::new();
        let mut roots = Vec::new();
        let mut by_name = HashMap::new();

        for mut module in modules {
            module.declarations.sort_by(compare_declarations);
            match module.parent.clone().filter(|p| positions.contains_key(p)) {
                Some(parent) => children.entry(parent).or_default().push(module.type_name.clone()),
                None => roots.push(module.type_name.clone()),
            }
            by_name.insert(module.type_name.clone(), module);
        }

        let mut tree: Vec<ModuleDeclaration> = roots
            .iter()
            .filter_map(|name| assemble(name, &mut by_name, &mut children))
            .collect();
        tree.sort_by(compare_modules);
        tree
    }
}

fn assemble(
    name: &str,
    by_name: &mut HashMap<String, ModuleDeclaration>,
    children: &mut HashMap<String, Vec<String>>,
) -> Option<ModuleDeclaration> {
    let mut module = by_name.remove(name)?;
    if let Some(names) = children.remove(name) {
        module.children = names
            .iter()
            .filter_map(|child| assemble(child, by_name, children))
            .collect();
        module.children.sort_by(compare_modules);
    }
    Some(module)
}

fn compare_modules(a: &ModuleDeclaration, b: &ModuleDeclaration) -> Ordering {
    a.jit_module
        .cmp(&b.jit_module)
        .then_with(|| a.type_name.cmp(&b.type_name))
}

fn compare_declarations(a: &BindingDeclaration, b: &BindingDeclaration) -> Ordering {
    a.source_line
        .cmp(&b.source_line)
        .then_with(|| a.kind().cmp(&b.kind()))
        .then_with(|| a.scope_name().unwrap_or("").cmp(b.scope_name().unwrap_or("")))
        .then_with(|| render_key(a.key()).cmp(&render_key(b.key())))
}
