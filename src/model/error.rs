//! Error types for the rangecal binary and ambient layers.
//!
//! The selection engine itself never fails: out-of-range input is clamped or
//! normalized. Errors only arise at the edges, when reading configuration,
//! initializing logging, or parsing command-line values.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned from `main`
//!   - [`ConfigError`] - configuration file read/parse failures
//!   - [`LoggingError`] - tracing subscriber initialization failures
//!   - `InvalidArgument` - a CLI value that is not a valid date/month/weekday
//!   - `serde_json::Error` - JSON output encoding
//!   - `std::io::Error` - writing to stdout

use thiserror::Error;

use crate::config::ConfigError;
use crate::logging::LoggingError;

/// Top-level application error encompassing all failure modes.
///
/// Domain errors convert via `From`, so `main` can use `?` throughout.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// A command-line value failed to parse.
    ///
    /// Clap validates shapes; this covers values whose meaning is checked
    /// after parsing, such as `2024-02-30`.
    #[error("Invalid value {value:?} for {argument}: {reason}")]
    InvalidArgument {
        /// Argument name as shown in `--help`.
        argument: &'static str,
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// JSON output could not be encoded.
    #[error("Failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing output failed (e.g. a closed pipe).
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Build an `InvalidArgument` error.
    pub fn invalid_argument(
        argument: &'static str,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            argument,
            value: value.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_message_names_argument_and_value() {
        let err = AppError::invalid_argument("--focus", "2024-02-30", "no such day");
        let msg = err.to_string();
        assert!(msg.contains("--focus"), "got: {msg}");
        assert!(msg.contains("2024-02-30"), "got: {msg}");
        assert!(msg.contains("no such day"), "got: {msg}");
    }

    #[test]
    fn config_error_converts_via_from() {
        let config_err = ConfigError::InvalidPath("bad".to_string());
        let err: AppError = config_err.into();
        assert!(matches!(err, AppError::Config(_)));
    }
}
