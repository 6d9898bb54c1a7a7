use std::path::{Path, PathBuf};
use wirescope::config::ReportConfig;
use wirescope::core::path::config_file;
use wirescope::{WireError, WireResult};

fn resolve_path(path: Option<PathBuf>) -> WireResult<PathBuf> {
    match path {
        Some(path) => Ok(path),
        None => config_file(),
    }
}

pub fn show(path: Option<PathBuf>) -> WireResult<()> {
    let path = resolve_path(path)?;
    println!("{}", render_config(&path)?);
    Ok(())
}

/// Effective config as YAML, headed by where it was read from
pub fn render_config(path: &Path) -> WireResult<String> {
    let (config, origin) = if path.exists() {
        (ReportConfig::load_from(path)?, path.display().to_string())
    } else {
        (ReportConfig::default(), "defaults".to_string())
    };
    let content = serde_yaml::to_string(&config)
        .map_err(|e| WireError::Config(format!("Failed to serialize config: {}", e)))?;
    Ok(format!("# {}\n{}", origin, content))
}

pub fn init(path: Option<PathBuf>, force: bool) -> WireResult<()> {
    let path = resolve_path(path)?;
    init_at(&path, force)?;
    println!("✓ Wrote default config to {}", path.display());
    Ok(())
}

pub fn init_at(path: &Path, force: bool) -> WireResult<()> {
    if path.exists() && !force {
        return Err(WireError::Config(format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        )));
    }
    ReportConfig::default().save_to(path)
}
