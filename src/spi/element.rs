//! Raw, low-level elements as exposed by a container's SPI.
//!
//! These are plain serde types so a container integration can export them
//! into a snapshot file (see [`crate::container::ContainerSnapshot`]).

use serde::{Deserialize, Serialize};
use wirescope_core::BindingKey;

/// Where an element was declared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSource {
    /// Declaration point in stack trace element form,
    /// e.g. `com.app.AppModule.configure(AppModule.java:42)`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaring: Option<String>,

    /// Explicit line; derived from `declaring` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    /// Module chain, innermost module first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<String>,
}

impl ElementSource {
    pub fn new<I, S>(declaring: impl Into<String>, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            declaring: Some(declaring.into()),
            line: None,
            modules: modules.into_iter().map(Into::into).collect(),
        }
    }

    /// Source line: explicit value, or the number in a trailing `(File.java:42)`
    pub fn source_line(&self) -> u32 {
        self.line
            .or_else(|| {
                let declaring = self.declaring.as_deref()?;
                let inner = declaring.strip_suffix(')')?;
                let (_, number) = inner.rsplit_once(':')?;
                number.parse().ok()
            })
            .unwrap_or(0)
    }
}

/// What a binding resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BindingTarget {
    Instance,
    ProviderInstance { provider: String },
    ProviderKey { provider: BindingKey },
    LinkedKey { linked: BindingKey },
    Untargetted,
    Constructor,
    ConvertedConstant { source_key: BindingKey, converter: String },
    Exposed,
    /// Synthetic provider binding created for the right-hand side of another binding
    Provider { provided: BindingKey },
    /// `filter(pattern).through(FilterType)`
    FilterKey { pattern: String, filter: BindingKey },
    /// `filter(pattern).through(filterInstance)`; `filter` is the instance class
    FilterInstance { pattern: String, filter: String },
    /// `serve(pattern).with(ServletType)`
    ServletKey { pattern: String, servlet: BindingKey },
    /// `serve(pattern).with(servletInstance)`; `servlet` is the instance class
    ServletInstance { pattern: String, servlet: String },
}

/// A single binding as seen by the container (module element or live binding).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBinding {
    pub key: BindingKey,
    pub target: BindingTarget,

    #[serde(default)]
    pub source: ElementSource,

    /// Scope annotation type name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    /// Interceptors applied to a container-constructed instance
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interceptors: Vec<String>,

    /// Created on demand by the container, never declared
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub just_in_time: bool,
}

impl RawBinding {
    pub fn new(key: BindingKey, target: BindingTarget) -> Self {
        Self {
            key,
            target,
            source: ElementSource::default(),
            scope: None,
            interceptors: Vec::new(),
            just_in_time: false,
        }
    }

    pub fn linked(key: BindingKey, linked: BindingKey) -> Self {
        Self::new(key, BindingTarget::LinkedKey { linked })
    }

    pub fn at(mut self, source: ElementSource) -> Self {
        self.source = source;
        self
    }

    pub fn in_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    pub fn intercepted_by(mut self, interceptor: impl Into<String>) -> Self {
        self.interceptors.push(interceptor.into());
        self
    }

    pub fn just_in_time(mut self) -> Self {
        self.just_in_time = true;
        self
    }

    /// Key this binding delegates to, if it is a link
    pub fn linked_key(&self) -> Option<&BindingKey> {
        match &self.target {
            BindingTarget::LinkedKey { linked } => Some(linked),
            BindingTarget::ConvertedConstant { source_key, .. } => Some(source_key),
            _ => None,
        }
    }
}

/// One element of a container's configuration stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "element", rename_all = "snake_case")]
pub enum Element {
    Binding(RawBinding),
    Interceptor {
        #[serde(default)]
        source: ElementSource,
        interceptors: Vec<String>,
    },
    Scope {
        #[serde(default)]
        source: ElementSource,
        annotation: String,
    },
    TypeListener {
        #[serde(default)]
        source: ElementSource,
        listener: String,
    },
    ProvisionListener {
        #[serde(default)]
        source: ElementSource,
        listeners: Vec<String>,
    },
    TypeConverter {
        #[serde(default)]
        source: ElementSource,
        converter: String,
    },
    /// Elements of a private module and the keys it exposes
    PrivateModule {
        #[serde(default)]
        source: ElementSource,
        elements: Vec<Element>,
        #[serde(default)]
        exposed: Vec<BindingKey>,
    },
    InjectionRequest {
        #[serde(default)]
        source: ElementSource,
    },
    ProviderLookup {
        #[serde(default)]
        source: ElementSource,
        key: BindingKey,
    },
    Message {
        #[serde(default)]
        source: ElementSource,
        message: String,
    },
    ContainerOption {
        #[serde(default)]
        source: ElementSource,
        name: String,
    },
    /// Exotic element the exporter could only describe
    Other {
        #[serde(default)]
        source: ElementSource,
        description: String,
    },
    #[serde(other)]
    Unrecognized,
}

impl Element {
    pub fn source(&self) -> Option<&ElementSource> {
        match self {
            Element::Binding(binding) => Some(&binding.source),
            Element::Interceptor { source, .. }
            | Element::Scope { source, .. }
            | Element::TypeListener { source, .. }
            | Element::ProvisionListener { source, .. }
            | Element::TypeConverter { source, .. }
            | Element::PrivateModule { source, .. }
            | Element::InjectionRequest { source }
            | Element::ProviderLookup { source, .. }
            | Element::Message { source, .. }
            | Element::ContainerOption { source, .. }
            | Element::Other { source, .. } => Some(source),
            Element::Unrecognized => None,
        }
    }

    /// Module chain of the element (innermost first), empty for module-less elements
    pub fn modules(&self) -> &[String] {
        self.source().map(|s| s.modules.as_slice()).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_line_from_declaring() {
        let source = ElementSource::new(
            "com.app.AppModule.configure(AppModule.java:42)",
            ["com.app.AppModule"],
        );
        assert_eq!(source.source_line(), 42);
    }

    #[test]
    fn test_source_line_explicit_wins() {
        let mut source = ElementSource::new(
            "com.app.AppModule.configure(AppModule.java:42)",
            ["com.app.AppModule"],
        );
        source.line = Some(7);
        assert_eq!(source.source_line(), 7);
        assert_eq!(ElementSource::default().source_line(), 0);
    }

    #[test]
    fn test_deserialize_elements() {
        let yaml = r#"
- element: binding
  key: com.app.Service
  target: { kind: linked_key, linked: com.app.ServiceImpl }
  source:
    declaring: com.app.AppModule.configure(AppModule.java:12)
    modules: [com.app.AppModule]
- element: scope
  annotation: com.app.RequestScoped
- element: something_new
"#;
        let elements: Vec<Element> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(elements.len(), 3);

        match &elements[0] {
            Element::Binding(binding) => {
                assert_eq!(binding.linked_key(), Some(&BindingKey::new("com.app.ServiceImpl")));
                assert_eq!(binding.source.source_line(), 12);
                assert!(!binding.just_in_time);
            }
            other => panic!("unexpected element {:?}", other),
        }
        assert!(matches!(elements[1], Element::Scope { .. }));
        assert_eq!(elements[2], Element::Unrecognized);
        assert!(elements[2].modules().is_empty());
    }
}
