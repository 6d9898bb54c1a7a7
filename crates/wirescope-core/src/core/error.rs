use thiserror::Error;

pub type WireResult<T> = Result<T, WireError>;

#[derive(Error, Debug)]
pub enum WireError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Binding key text could not be parsed.
    #[error("Invalid binding key: {0}")]
    Key(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// Internal contract of the analysis pipeline was broken.
    /// Aborts the affected report section, never retried.
    #[error("Internal invariant violated: {0}")]
    Invariant(String),

    #[error("Report error: {0}")]
    Report(String),
}
