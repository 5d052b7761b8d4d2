// ⚠️ Error taxonomy for the pension calculator
// User-input errors are recoverable; I/O and terminal failures are not.

use std::io;

/// Errors produced while collecting input or evaluating eligibility.
#[derive(Debug, thiserror::Error)]
pub enum PensionError {
    /// Non-numeric text where an integer was expected.
    #[error("'{input}' no es un número entero válido para el {field}")]
    Parse { field: &'static str, input: String },

    /// Year/month/day that does not form a real calendar date.
    #[error("Fecha no válida: {0}")]
    InvalidDate(String),

    /// Value outside a closed set of options (gender).
    #[error("{0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    /// Line editor or raw terminal failure.
    #[error("Error de terminal: {0}")]
    Terminal(String),
}

impl PensionError {
    pub fn invalid_gender(input: impl std::fmt::Display) -> Self {
        PensionError::InvalidArgument(format!("Género no válido: {input}"))
    }

    /// True for errors caused by what the user typed; the session can go on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PensionError::Parse { .. }
                | PensionError::InvalidDate(_)
                | PensionError::InvalidArgument(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PensionError>;
