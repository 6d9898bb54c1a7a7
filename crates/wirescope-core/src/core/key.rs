//! Binding keys: the identity of a dependency inside a container.

use crate::core::error::{WireError, WireResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Annotation-like discriminator attached to a key (e.g. `@Named("db")`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Qualifier {
    /// Fully qualified annotation type name
    pub annotation: String,
    /// Optional string value of the annotation
    pub value: Option<String>,
}

impl Qualifier {
    pub fn new(annotation: impl Into<String>) -> Self {
        Self {
            annotation: annotation.into(),
            value: None,
        }
    }

    pub fn with_value(annotation: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            annotation: annotation.into(),
            value: Some(value.into()),
        }
    }

    /// Annotation simple name (without package)
    pub fn simple_name(&self) -> &str {
        simple_name(&self.annotation)
    }

    fn write(&self, f: &mut fmt::Formatter<'_>, annotation: &str) -> fmt::Result {
        write!(f, "@{}", annotation)?;
        if let Some(value) = self.value.as_deref().filter(|v| !v.is_empty()) {
            write!(f, "(\"{}\")", value)?;
        }
        Ok(())
    }
}

/// Identity of a binding: raw type + optional qualifier + generic arguments.
///
/// Two keys are equal iff all three parts are equal. The canonical text form is
/// `[@<annotation>[("<value>")] ]<raw.Type>[<Arg, ...>]`, which is also the
/// serialized form in snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BindingKey {
    type_name: String,
    qualifier: Option<Qualifier>,
    type_args: Vec<String>,
}

impl BindingKey {
    /// Unqualified, non-generic key for a raw type
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            qualifier: None,
            type_args: Vec::new(),
        }
    }

    pub fn with_qualifier(mut self, qualifier: Qualifier) -> Self {
        self.qualifier = Some(qualifier);
        self
    }

    pub fn with_type_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.type_args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Parse the canonical text form (e.g. `@a.Named("x") com.app.Repo<java.lang.String>`)
    pub fn parse(s: &str) -> WireResult<Self> {
        let s = s.trim();
        let re = Regex::new(
            r#"^(?:@(?P<ann>[\w.$]+)(?:\("(?P<val>[^"]*)"\))?\s+)?(?P<ty>[\w.$]+)(?:<(?P<args>.+)>)?$"#,
        )
        .map_err(|e| WireError::Key(format!("Invalid key pattern: {}", e)))?;

        let caps = re
            .captures(s)
            .ok_or_else(|| WireError::Key(format!("'{}' is not a binding key", s)))?;

        let qualifier = caps.name("ann").map(|ann| Qualifier {
            annotation: ann.as_str().to_string(),
            value: caps.name("val").map(|v| v.as_str().to_string()),
        });

        let type_args = match caps.name("args") {
            Some(args) => split_type_args(args.as_str())
                .ok_or_else(|| WireError::Key(format!("Unbalanced generics in '{}'", s)))?,
            None => Vec::new(),
        };

        Ok(Self {
            type_name: caps["ty"].to_string(),
            qualifier,
            type_args,
        })
    }

    /// Fully qualified raw type name (no generics, no qualifier)
    pub fn raw_type(&self) -> &str {
        &self.type_name
    }

    pub fn qualifier(&self) -> Option<&Qualifier> {
        self.qualifier.as_ref()
    }

    pub fn type_args(&self) -> &[String] {
        &self.type_args
    }

    /// Raw type simple name
    pub fn simple_name(&self) -> &str {
        simple_name(&self.type_name)
    }

    /// Package of the raw type. For inner classes (`Outer$Inner`) the declaring
    /// class is returned instead, for types without package the full name.
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

    /// Report form of the key: simple type names everywhere.
    pub fn render(&self) -> String {
        RenderedKey(self).to_string()
    }
}

/// Report form for an optional key: `-` when absent.
pub fn render_key(key: Option<&BindingKey>) -> String {
    key.map(BindingKey::render).unwrap_or_else(|| "-".to_string())
}

impl fmt::Display for BindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref qualifier) = self.qualifier {
            qualifier.write(f, &qualifier.annotation)?;
            f.write_str(" ")?;
        }
        f.write_str(&self.type_name)?;
        if !self.type_args.is_empty() {
            write!(f, "<{}>", self.type_args.join(", "))?;
        }
        Ok(())
    }
}

struct RenderedKey<'a>(&'a BindingKey);

impl fmt::Display for RenderedKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = self.0;
        if let Some(ref qualifier) = key.qualifier {
            qualifier.write(f, qualifier.simple_name())?;
            f.write_str(" ")?;
        }
        f.write_str(key.simple_name())?;
        if !key.type_args.is_empty() {
            let args: Vec<String> = key.type_args.iter().map(|a| simplify_type(a)).collect();
            write!(f, "<{}>", args.join(", "))?;
        }
        Ok(())
    }
}

impl FromStr for BindingKey {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for BindingKey {
    type Error = WireError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<BindingKey> for String {
    fn from(key: BindingKey) -> Self {
        key.to_string()
    }
}

/// Last segment of a dotted name
pub fn simple_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

/// Replace every dotted name in a type expression with its simple name:
/// `java.util.List<java.lang.String>` -> `List<String>`.
pub fn simplify_type(expr: &str) -> String {
    let mut out = String::with_capacity(expr.len());
    let mut token = String::new();
    for c in expr.chars() {
        if c.is_alphanumeric() || c == '_' || c == '$' || c == '.' {
            token.push(c);
        } else {
            out.push_str(simple_name(&token));
            token.clear();
            out.push(c);
        }
    }
    out.push_str(simple_name(&token));
    out
}

/// Split generic arguments on top-level commas. `None` when brackets are unbalanced.
fn split_type_args(args: &str) -> Option<Vec<String>> {
    let mut result = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();

    for c in args.chars() {
        match c {
            '<' => {
                depth += 1;
                current.push(c);
            }
            '>' => {
                depth = depth.checked_sub(1)?;
                current.push(c);
            }
            ',' if depth == 0 => {
                result.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(c),
        }
    }

    if depth != 0 || current.trim().is_empty() {
        return None;
    }
    result.push(current.trim().to_string());

    if result.iter().any(|a| a.is_empty()) {
        return None;
    }
    Some(result)
}
