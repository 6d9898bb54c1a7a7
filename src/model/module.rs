use crate::model::declaration::BindingDeclaration;
use crate::model::marker::Markers;
use serde::Serialize;
use wirescope_core::core::key::simple_name;

/// Type name of the synthetic module holding bindings declared outside any module.
pub const JIT_MODULE: &str = "<just-in-time>";

/// One configuration module (possibly private or nested).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleDeclaration {
    /// Module type name
    pub type_name: String,
    pub declarations: Vec<BindingDeclaration>,
    pub children: Vec<ModuleDeclaration>,
    pub markers: Markers,
    /// Synthetic module for bindings discovered outside any real module
    pub jit_module: bool,
    pub private_module: bool,
    #[serde(skip)]
    pub(crate) parent: Option<String>,
}

impl ModuleDeclaration {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            declarations: Vec::new(),
            children: Vec::new(),
            markers: Markers::new(),
            jit_module: false,
            private_module: false,
            parent: None,
        }
    }

    /// Synthetic module for implicit bindings
    pub fn jit() -> Self {
        Self {
            jit_module: true,
            ..Self::new(JIT_MODULE)
        }
    }

    pub fn with_declaration(mut self, declaration: BindingDeclaration) -> Self {
        self.declarations.push(declaration);
        self
    }

    pub fn with_child(mut self, child: ModuleDeclaration) -> Self {
        self.children.push(child);
        self
    }

    pub fn simple_name(&self) -> &str {
        simple_name(&self.type_name)
    }

    /// Module package (declaring class for inner modules)
    pub fn package(&self) -> &str {
        let name = &self.type_name;
        if let Some(pos) = name.rfind('$') {
            return &name[..pos];
        }
        match name.rfind('.') {
            Some(pos) => &name[..pos],
            None => name,
        }
    }

    /// Drop the whole subtree content, keeping the node itself
    pub fn clear(&mut self) {
        self.declarations.clear();
        self.children.clear();
    }
}

/// Apply `visitor` to every module in the forest, depth-first, parents first.
pub fn visit_modules<'a, F>(modules: &'a [ModuleDeclaration], visitor: &mut F)
where
    F: FnMut(&'a ModuleDeclaration),
{
    for module in modules {
        visitor(module);
        visit_modules(&module.children, visitor);
    }
}

/// Apply `visitor` to every declaration in the forest.
pub fn visit_bindings<'a, F>(modules: &'a [ModuleDeclaration], visitor: &mut F)
where
    F: FnMut(&'a BindingDeclaration),
{
    visit_modules(modules, &mut |module: &'a ModuleDeclaration| {
        module.declarations.iter().for_each(&mut *visitor)
    });
}

/// Mutable variant of [`visit_bindings`], used by marker passes.
pub fn visit_bindings_mut<F>(modules: &mut [ModuleDeclaration], visitor: &mut F)
where
    F: FnMut(&mut BindingDeclaration),
{
    for module in modules {
        module.declarations.iter_mut().for_each(&mut *visitor);
        visit_bindings_mut(&mut module.children, visitor);
    }
}

/// Type names of all real modules in the forest (the synthetic module excluded)
pub fn module_types(modules: &[ModuleDeclaration]) -> Vec<&str> {
    let mut res = Vec::new();
    visit_modules(modules, &mut |module| {
        if !module.jit_module {
            res.push(module.type_name.as_str());
        }
    });
    res
}
