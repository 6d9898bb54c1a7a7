use std::env;
use std::path::{Path, PathBuf};
use wirescope::config::ReportConfig;
use wirescope::container::ContainerSnapshot;
use wirescope::core::path::find_snapshot;
use wirescope::report::BindingsReport;
use wirescope::{WireError, WireResult};

pub fn run(snapshot: Option<PathBuf>, config: Option<PathBuf>, json: bool) -> WireResult<()> {
    let current_dir = env::current_dir()
        .map_err(|e| WireError::Path(format!("Failed to get current directory: {}", e)))?;
    run_in_dir(&current_dir, snapshot.as_deref(), config.as_deref(), json)
}

pub fn run_in_dir(
    dir: &Path,
    snapshot: Option<&Path>,
    config: Option<&Path>,
    json: bool,
) -> WireResult<()> {
    let report = build_report(dir, snapshot, config)?;

    if json {
        let output = serde_json::to_string_pretty(&report.to_json())
            .map_err(|e| WireError::Report(format!("Failed to serialize report: {}", e)))?;
        println!("{}", output);
    } else {
        print!("{}", report.render());
    }

    // sections that failed are still reported after the rest is printed
    report.ensure_complete()
}

/// Locate the snapshot and config, then run the analysis.
pub fn build_report(
    dir: &Path,
    snapshot: Option<&Path>,
    config: Option<&Path>,
) -> WireResult<BindingsReport> {
    let snapshot_path = match snapshot {
        Some(path) => path.to_path_buf(),
        None => find_snapshot(dir)?,
    };
    let config = match config {
        Some(path) => ReportConfig::load_from(path)?,
        None => ReportConfig::load()?,
    };

    tracing::debug!(snapshot = %snapshot_path.display(), "Loading container snapshot");
    let snapshot = ContainerSnapshot::load(&snapshot_path)?;
    Ok(BindingsReport::build(snapshot.input(), &config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SNAPSHOT: &str = r#"
modules:
  - element: binding
    key: com.app.Service
    target: { kind: linked_key, linked: com.app.ServiceImpl }
    source:
      declaring: com.app.AppModule.configure(AppModule.java:12)
      modules: [com.app.AppModule]
bindings:
  - key: com.app.Service
    target: { kind: linked_key, linked: com.app.ServiceImpl }
  - key: com.app.ServiceImpl
    target: { kind: constructor }
    just_in_time: true
"#;

    fn write_project(temp: &TempDir) -> PathBuf {
        std::fs::write(temp.path().join("wiring.yaml"), SNAPSHOT).unwrap();
        let config = temp.path().join("config.yaml");
        std::fs::write(&config, "ignore_packages: []\n").unwrap();
        config
    }

    #[test]
    fn test_run_no_snapshot() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("config.yaml");
        std::fs::write(&config, "show_chains: true\n").unwrap();

        let result = run_in_dir(temp.path(), None, Some(&config), false);
        assert!(matches!(result, Err(WireError::Path(_))));
    }

    #[test]
    fn test_run_finds_snapshot() {
        let temp = TempDir::new().unwrap();
        let config = write_project(&temp);

        let result = run_in_dir(temp.path(), None, Some(&config), false);
        assert!(result.is_ok());
    }

    #[test]
    fn test_run_json() {
        let temp = TempDir::new().unwrap();
        let config = write_project(&temp);

        let result = run_in_dir(temp.path(), None, Some(&config), true);
        assert!(result.is_ok());
    }

    #[test]
    fn test_build_report_explicit_snapshot() {
        let temp = TempDir::new().unwrap();
        let config = write_project(&temp);
        let moved = temp.path().join("exported.yaml");
        std::fs::rename(temp.path().join("wiring.yaml"), &moved).unwrap();

        let report = build_report(temp.path(), Some(&moved), Some(&config)).unwrap();
        assert_eq!(report.modules.binding_count(), 1);
        assert_eq!(report.chains.len(), 1);
    }
}
