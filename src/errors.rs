use std::path::PathBuf;
use thiserror::Error;

use crate::api_client::ApiError;
use crate::prompt::PromptError;

/// Custom error types for hangar commands
#[derive(Error, Debug)]
pub enum AppsError {
    #[error("two app names specified {positional} and {flag}. Select and specify only one")]
    ConflictingInput { positional: String, flag: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No app specified. Pass --app or run from a directory containing a hangar.toml")]
    AppNameRequired,

    #[error("Error setting organization: {0}")]
    OrganizationResolution(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("{context}: {source}")]
    Transport {
        context: String,
        #[source]
        source: ApiError,
    },

    #[error("Failed to write config file {path}: {reason}")]
    Persistence { path: PathBuf, reason: String },

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not authenticated: {0}")]
    NotAuthenticated(String),

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

impl AppsError {
    /// Wrap a control-plane failure with a description of what was attempted
    pub fn transport(context: &str, source: ApiError) -> Self {
        AppsError::Transport {
            context: context.to_string(),
            source,
        }
    }

    pub fn persistence(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        AppsError::Persistence {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<PromptError> for AppsError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::Interrupted => AppsError::Cancelled,
            PromptError::Terminal(e) => AppsError::Prompt(e.to_string()),
        }
    }
}

impl From<config::ConfigError> for AppsError {
    fn from(err: config::ConfigError) -> Self {
        AppsError::Config(err.to_string())
    }
}

/// Result type alias for hangar errors
pub type AppsResult<T> = Result<T, AppsError>;
