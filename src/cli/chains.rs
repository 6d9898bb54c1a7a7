use crate::cli::report::build_report;
use std::env;
use std::path::{Path, PathBuf};
use wirescope::{WireError, WireResult};

pub fn run(snapshot: Option<PathBuf>, config: Option<PathBuf>) -> WireResult<()> {
    let current_dir = env::current_dir()
        .map_err(|e| WireError::Path(format!("Failed to get current directory: {}", e)))?;
    run_in_dir(&current_dir, snapshot.as_deref(), config.as_deref())
}

/// Print binding chains only, one per line, regardless of `show_chains`.
pub fn run_in_dir(dir: &Path, snapshot: Option<&Path>, config: Option<&Path>) -> WireResult<()> {
    let report = build_report(dir, snapshot, config)?;

    if report.chains.is_empty() {
        println!("No binding chains");
    }
    for chain in &report.chains {
        println!("{}", chain);
    }
    Ok(())
}
