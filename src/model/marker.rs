use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Finding attached to a declaration or module by an analysis pass.
///
/// Spelling is part of the report contract (IDE tooling matches on it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Marker {
    /// Binding of a known extension type
    Extension,
    /// Extension or module disabled, binding(s) removed
    Removed,
    /// Instance affected by method interception
    Aop,
    /// Primary binding replaced by an overriding module
    Overridden,
    /// Overriding binding that replaces a primary one
    Override,
    /// Private module registration point
    Private,
    /// Binding exposed from a private module
    Exposed,
    /// Module registering servlets and filters
    Web,
}

impl Marker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Marker::Extension => "EXTENSION",
            Marker::Removed => "REMOVED",
            Marker::Aop => "AOP",
            Marker::Overridden => "OVERRIDDEN",
            Marker::Override => "OVERRIDE",
            Marker::Private => "PRIVATE",
            Marker::Exposed => "EXPOSED",
            Marker::Web => "WEB",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// De-duplicated marker set with a stable iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Markers(BTreeSet<Marker>);

impl Markers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a marker; returns false if it was already present
    pub fn insert(&mut self, marker: Marker) -> bool {
        self.0.insert(marker)
    }

    pub fn contains(&self, marker: Marker) -> bool {
        self.0.contains(&marker)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = Marker> + '_ {
        self.0.iter().copied()
    }
}

/// Renders as `*A, B`; empty set renders as an empty string.
impl fmt::Display for Markers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        let names: Vec<&str> = self.0.iter().map(Marker::as_str).collect();
        write!(f, "*{}", names.join(", "))
    }
}

impl<const N: usize> From<[Marker; N]> for Markers {
    fn from(markers: [Marker; N]) -> Self {
        Self(markers.into_iter().collect())
    }
}
