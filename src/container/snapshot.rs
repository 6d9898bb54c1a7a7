//! File-backed container view exported from a running application.

use crate::container::traits::ContainerView;
use crate::spi::{Element, RawBinding};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use wirescope_core::{BindingKey, WireError, WireResult};

/// Facts about the application the container was started for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerContext {
    /// Whether module analysis ran at startup. When it did not, nothing was
    /// removed from the container, so extension and disablement marking is skipped.
    #[serde(default = "default_true")]
    pub analysis_enabled: bool,

    /// Extension types (raw type names)
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Disabled extension types
    #[serde(default)]
    pub disabled_extensions: Vec<String>,

    /// Disabled module types
    #[serde(default)]
    pub disabled_modules: Vec<String>,

    /// Module types that register servlets and filters
    #[serde(default)]
    pub web_modules: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl Default for ContainerContext {
    fn default() -> Self {
        Self {
            analysis_enabled: true,
            extensions: Vec::new(),
            disabled_extensions: Vec::new(),
            disabled_modules: Vec::new(),
            web_modules: Vec::new(),
        }
    }
}

/// Everything a report needs, captured from one container start.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerSnapshot {
    /// Element stream of the primary modules
    #[serde(default)]
    pub modules: Vec<Element>,

    /// Element stream of the overriding modules
    #[serde(default)]
    pub overriding_modules: Vec<Element>,

    /// Live bindings (explicit and just-in-time)
    #[serde(default)]
    pub bindings: Vec<RawBinding>,

    #[serde(default)]
    pub context: ContainerContext,
}

impl ContainerSnapshot {
    /// Load a snapshot; `.json` files are read as JSON, anything else as YAML.
    pub fn load(path: &Path) -> WireResult<Self> {
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let snapshot = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };
        tracing::debug!(
            path = %path.display(),
            elements = snapshot.modules.len(),
            overriding = snapshot.overriding_modules.len(),
            bindings = snapshot.bindings.len(),
            "Loaded container snapshot"
        );
        Ok(snapshot)
    }

    pub fn from_yaml_str(content: &str) -> WireResult<Self> {
        let snapshot: Self = serde_yaml::from_str(content)
            .map_err(|e| WireError::Snapshot(format!("Failed to parse snapshot: {}", e)))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn from_json_str(content: &str) -> WireResult<Self> {
        let snapshot: Self = serde_json::from_str(content)
            .map_err(|e| WireError::Snapshot(format!("Failed to parse snapshot: {}", e)))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// A container never holds two live bindings for the same key.
    pub fn validate(&self) -> WireResult<()> {
        let mut seen = HashSet::new();
        for binding in &self.bindings {
            if !seen.insert(&binding.key) {
                return Err(WireError::Snapshot(format!(
                    "Duplicate live binding for key {}",
                    binding.key
                )));
            }
        }
        Ok(())
    }
}

impl ContainerView for ContainerSnapshot {
    fn all_bindings(&self) -> HashMap<BindingKey, RawBinding> {
        self.bindings
            .iter()
            .map(|b| (b.key.clone(), b.clone()))
            .collect()
    }

    fn explicit_keys(&self) -> HashSet<BindingKey> {
        self.bindings
            .iter()
            .filter(|b| !b.just_in_time)
            .map(|b| b.key.clone())
            .collect()
    }

    fn existing_binding(&self, key: &BindingKey) -> Option<RawBinding> {
        self.bindings.iter().find(|b| &b.key == key).cloned()
    }
}
