//! # CLI Error Type
//!
//! Everything a command can fail with, flattened for printing.
//!
//! ```text
//! ConfigError ─────┐
//! CoreError ───────┤
//! ValidationError ─┼──► CliError ──► "error: ..." on stderr, exit code
//! io::Error ───────┤
//! bad arguments ───┘
//! ```

use bistro_core::{CoreError, ValidationError};
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The command line could not be understood.
    #[error("{0}")]
    Usage(String),

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn usage(message: impl Into<String>) -> Self {
        CliError::Usage(message.into())
    }

    /// Process exit code: 2 for usage mistakes, 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 2,
            _ => 1,
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
