//! CLI-level errors (wraps domain and settings errors)

use std::io;

use thiserror::Error;

use crate::config::SettingsError;
use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Domain(e) => match e {
                DomainError::MalformedMarkup { .. } => crate::exitcode::DATAERR,
                DomainError::StructuralPrecondition(_) => crate::exitcode::DATAERR,
                DomainError::TooDeep { .. } => crate::exitcode::DATAERR,
                DomainError::RootRemoval(_) => crate::exitcode::USAGE,
                DomainError::Io(_) => crate::exitcode::IOERR,
            },
            CliError::Settings(_) => crate::exitcode::CONFIG,
            CliError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                crate::exitcode::NOINPUT
            }
            CliError::Io { .. } => crate::exitcode::IOERR,
        }
    }
}
