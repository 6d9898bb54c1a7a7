use crate::model::marker::Markers;
use serde::Serialize;
use std::fmt;
use wirescope_core::core::key::{render_key, simple_name, BindingKey};

/// Configuration-time registrations that are not bindings of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialKind {
    /// Scope annotation registration
    Scope,
    /// Method interceptor registration
    Aop,
    TypeListener,
    ProvisionListener,
    TypeConverter,
    /// Element shape the parser does not know
    Unknown,
}

/// Binding declaration variant, decided once at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    /// `bind(A).toInstance(a)`
    Instance,
    /// `bind(A).toProvider(providerInstance)`
    ProviderInstance,
    /// `bind(A).to(B)`
    LinkedKey,
    /// `bind(A).toProvider(ProviderType)`
    ProviderKey,
    /// `bind(A)` (module analysis only)
    Untargetted,
    /// Type instantiated by the container itself (live bindings only)
    Constructor,
    /// Value converted from a bound string constant
    ConvertedConstant,
    /// Binding exposed from a private module
    Exposed,
    /// Web filter mapped by type; the key is the filter type
    FilterKey,
    /// Web filter mapped by instance; the key is the instance class
    FilterInstance,
    ServletKey,
    ServletInstance,
    /// Right-hand side artifact of another declaration. Indexed, never rendered.
    Synthetic,
    Special(SpecialKind),
}

impl DeclarationKind {
    /// True for bindings that exist in the running container, false for
    /// configuration-time registrations (scopes, listeners, interceptors,
    /// servlet and filter mappings).
    pub fn is_runtime_binding(&self) -> bool {
        !matches!(self, DeclarationKind::Special(_)) && !self.is_web()
    }

    /// Servlet or filter mapping; the url pattern is kept in `special`
    pub fn is_web(&self) -> bool {
        matches!(
            self,
            DeclarationKind::FilterKey
                | DeclarationKind::FilterInstance
                | DeclarationKind::ServletKey
                | DeclarationKind::ServletInstance
        )
    }

    /// Kinds that delegate to another key
    pub fn has_target(&self) -> bool {
        matches!(
            self,
            DeclarationKind::LinkedKey | DeclarationKind::ConvertedConstant
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            DeclarationKind::Instance => "instance",
            DeclarationKind::ProviderInstance => "providerinstance",
            DeclarationKind::LinkedKey => "linkedkey",
            DeclarationKind::ProviderKey => "providerkey",
            DeclarationKind::Untargetted => "untargetted",
            DeclarationKind::Constructor => "binding",
            DeclarationKind::ConvertedConstant => "convertedconstant",
            DeclarationKind::Exposed => "exposed",
            DeclarationKind::FilterKey => "filterkey",
            DeclarationKind::FilterInstance => "filterinstance",
            DeclarationKind::ServletKey => "servletkey",
            DeclarationKind::ServletInstance => "servletinstance",
            DeclarationKind::Synthetic => "synthetic",
            DeclarationKind::Special(SpecialKind::Scope) => "scope",
            DeclarationKind::Special(SpecialKind::Aop) => "aop",
            DeclarationKind::Special(SpecialKind::TypeListener) => "typelistener",
            DeclarationKind::Special(SpecialKind::ProvisionListener) => "provisionlistener",
            DeclarationKind::Special(SpecialKind::TypeConverter) => "typeconverter",
            DeclarationKind::Special(SpecialKind::Unknown) => "unknown",
        }
    }

    /// Report label: runtime bindings plain, registrations in angle brackets.
    pub fn label(&self) -> String {
        if self.is_runtime_binding() {
            self.name().to_string()
        } else {
            format!("<{}>", self.name())
        }
    }
}

/// One binding statement.
///
/// `target` is present iff the kind is [`DeclarationKind::LinkedKey`] or
/// [`DeclarationKind::ConvertedConstant`]; use [`BindingDeclaration::linked`]
/// and [`BindingDeclaration::converted`] to build those.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BindingDeclaration {
    kind: DeclarationKind,
    key: Option<BindingKey>,
    target: Option<BindingKey>,
    /// Rendered provider (instance description or provider key)
    pub provided_by: Option<String>,
    /// Scope annotation type name
    pub scope: Option<String>,
    /// Declaration source (stack trace element convention)
    pub source: Option<String>,
    #[serde(skip)]
    pub source_line: u32,
    /// Auxiliary data (listeners, interceptors, converter, multibinding hints)
    pub special: Vec<String>,
    pub markers: Markers,
    /// Owning module type name
    pub module: Option<String>,
}

impl BindingDeclaration {
    /// Declaration of a kind without target
    pub fn new(kind: DeclarationKind, key: Option<BindingKey>) -> Self {
        debug_assert!(!kind.has_target(), "{} requires a target", kind.name());
        Self {
            kind,
            key,
            target: None,
            provided_by: None,
            scope: None,
            source: None,
            source_line: 0,
            special: Vec::new(),
            markers: Markers::new(),
            module: None,
        }
    }

    pub fn linked(key: BindingKey, target: BindingKey) -> Self {
        Self {
            kind: DeclarationKind::LinkedKey,
            target: Some(target),
            ..Self::new(DeclarationKind::Instance, Some(key))
        }
    }

    pub fn converted(key: BindingKey, source_key: BindingKey, converter: &str) -> Self {
        Self {
            kind: DeclarationKind::ConvertedConstant,
            target: Some(source_key),
            special: vec![format!("converted by {}", converter)],
            ..Self::new(DeclarationKind::Instance, Some(key))
        }
    }

    /// Keyless registration (scope, listener, interceptor, unknown element)
    pub fn special(kind: SpecialKind, special: Vec<String>) -> Self {
        Self {
            special,
            ..Self::new(DeclarationKind::Special(kind), None)
        }
    }

    /// Servlet or filter mapping of `key` under a url pattern
    pub fn web(kind: DeclarationKind, key: BindingKey, pattern: impl Into<String>) -> Self {
        debug_assert!(kind.is_web(), "{} is not a web mapping", kind.name());
        Self {
            special: vec![pattern.into()],
            ..Self::new(kind, Some(key))
        }
    }

    pub fn with_provided_by(mut self, provided_by: impl Into<String>) -> Self {
        self.provided_by = Some(provided_by.into());
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>, line: u32) -> Self {
        self.source = Some(source.into());
        self.source_line = line;
        self
    }

    pub fn kind(&self) -> DeclarationKind {
        self.kind
    }

    pub fn key(&self) -> Option<&BindingKey> {
        self.key.as_ref()
    }

    pub fn target(&self) -> Option<&BindingKey> {
        self.target.as_ref()
    }

    /// Scope annotation simple name
    pub fn scope_name(&self) -> Option<&str> {
        self.scope.as_deref().map(simple_name)
    }

    pub fn is_synthetic(&self) -> bool {
        self.kind == DeclarationKind::Synthetic
    }
}

impl fmt::Display for BindingDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.name(), render_key(self.key.as_ref()))?;
        if let Some(ref module) = self.module {
            write!(f, " (from module {})", module)?;
        }
        Ok(())
    }
}
