//! CLI-level errors (wraps domain, config and I/O errors)

use thiserror::Error;

use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Config(_) => crate::exitcode::CONFIG,
            CliError::Io { source, .. } => match source.kind() {
                std::io::ErrorKind::NotFound => crate::exitcode::NOINPUT,
                _ => crate::exitcode::IOERR,
            },
            CliError::Domain(e) => match e {
                DomainError::MalformedInput(_) => crate::exitcode::DATAERR,
                DomainError::NodeNotFound(_) | DomainError::EmptyTree => {
                    crate::exitcode::USAGE
                }
                _ => crate::exitcode::SOFTWARE,
            },
        }
    }
}
