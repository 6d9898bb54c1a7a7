use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use wirescope_core::core::path::{config_file, ensure_dir};
use wirescope_core::{WireError, WireResult};

/// User-level report configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Module types removed from the report together with their subtree
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore_modules: Vec<String>,

    /// Package prefixes hidden from the report
    ///
    /// Applies to module types (except the just-in-time module) and to the raw
    /// type of every binding key. Example: ["org.glassfish", "io.dropwizard"]
    #[serde(default = "default_ignore_packages")]
    pub ignore_packages: Vec<String>,

    /// Whether to render bindings the container created without declaration
    #[serde(default = "default_true")]
    pub show_undeclared: bool,

    /// Whether to render binding chains
    #[serde(default = "default_true")]
    pub show_chains: bool,
}

fn default_ignore_packages() -> Vec<String> {
    Vec::new()
}

fn default_true() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            ignore_modules: Vec::new(),
            ignore_packages: default_ignore_packages(),
            show_undeclared: true,
            show_chains: true,
        }
    }
}

impl ReportConfig {
    /// Load config from the platform-specific config directory; defaults when
    /// no config file exists yet.
    ///
    /// Config locations:
    /// - Windows: %APPDATA%\wirescope\config.yaml
    /// - Linux: ~/.config/wirescope/config.yaml
    /// - macOS: ~/Library/Application Support/wirescope/config.yaml
    pub fn load() -> WireResult<Self> {
        let config_path = config_file()?;
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&config_path)
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> WireResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: ReportConfig = serde_yaml::from_str(&content)
            .map_err(|e| WireError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Save config to the platform-specific config directory
    pub fn save(&self) -> WireResult<()> {
        self.save_to(&config_file()?)
    }

    /// Save config to an explicit path, creating parent directories
    pub fn save_to(&self, path: &Path) -> WireResult<()> {
        let config_dir = path
            .parent()
            .ok_or_else(|| WireError::Path("Invalid config path".to_string()))?;
        ensure_dir(config_dir)?;

        let content = serde_yaml::to_string(self)
            .map_err(|e| WireError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = ReportConfig::default();
        assert!(config.ignore_modules.is_empty());
        assert!(config.ignore_packages.is_empty());
        assert!(config.show_undeclared);
        assert!(config.show_chains);
    }

    #[test]
    fn test_config_save_and_load() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("nested").join("config.yaml");

        let config = ReportConfig {
            ignore_packages: vec!["org.glassfish".to_string()],
            show_chains: false,
            ..Default::default()
        };
        config.save_to(&config_path).unwrap();

        let loaded = ReportConfig::load_from(&config_path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_partial_yaml_uses_defaults() {
        let yaml = "ignore_modules:\n  - com.app.LegacyModule\n";
        let config: ReportConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.ignore_modules, vec!["com.app.LegacyModule"]);
        assert!(config.show_undeclared);
        assert!(config.show_chains);
    }

    #[test]
    fn test_config_invalid_yaml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("config.yaml");
        std::fs::write(&config_path, "show_chains: [not, a, bool]").unwrap();

        let result = ReportConfig::load_from(&config_path);
        assert!(matches!(result, Err(WireError::Config(_))));
    }
}
