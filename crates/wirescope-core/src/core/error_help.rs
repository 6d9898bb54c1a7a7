//! Human-friendly error output for the CLI.

use crate::core::error::WireError;

/// Remediation hint for an error, if one is known.
pub trait ErrorHelp {
    fn help(&self) -> Option<&'static str>;
}

impl ErrorHelp for WireError {
    fn help(&self) -> Option<&'static str> {
        match self {
            WireError::Io(_) => Some("Check that the snapshot file exists and is readable."),
            WireError::Yaml(_) | WireError::Json(_) => Some(
                "The snapshot must contain `modules`, `overriding_modules`, `bindings` and `context` sections.",
            ),
            WireError::Path(_) => Some(
                "Pass the snapshot path explicitly or run from a directory containing wiring.yaml.",
            ),
            WireError::Config(_) => Some("Run `wirescope config init` to write a default config."),
            WireError::Key(_) => {
                Some("Keys look like `@com.app.Named(\"db\") com.app.DataSource<java.lang.String>`.")
            }
            WireError::Snapshot(_) => Some("Re-export the snapshot from the running container."),
            WireError::Invariant(_) => {
                Some("This is a bug in the report engine; please report it with the snapshot.")
            }
            WireError::Report(_) => None,
        }
    }
}

/// Format an error with its remediation hint (if any).
pub fn format_error_with_help(error: &WireError) -> String {
    match error.help() {
        Some(help) => format!("Error: {}\n\n  help: {}", error, help),
        None => format!("Error: {}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_with_help() {
        let err = WireError::Path("no snapshot".to_string());
        let output = format_error_with_help(&err);
        assert!(output.starts_with("Error: Path error: no snapshot"));
        assert!(output.contains("help:"));
    }

    #[test]
    fn test_format_without_help() {
        let err = WireError::Report("broken".to_string());
        assert_eq!(format_error_with_help(&err), "Error: Report error: broken");
    }
}
