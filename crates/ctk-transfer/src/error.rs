//! Error types for transfer and formatting operations.

use ctk_model::ValueError;
use thiserror::Error;

/// Errors from property transfer.
///
/// Properties that cannot be matched are skipped, never reported here.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The source instance was absent.
    #[error("source instance is required")]
    MissingSource,
    /// No target instance was supplied and the type has no parameterless constructor.
    #[error("cannot construct `{type_name}`: type has no parameterless constructor")]
    Construction { type_name: &'static str },
    /// A setter rejected a value its declared type claimed to accept.
    #[error("property `{property}` rejected the transferred value: {source}")]
    Conversion {
        property: String,
        #[source]
        source: ValueError,
    },
}

/// Errors from template formatting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("unknown or unreadable property `{0}`")]
    UnknownProperty(String),
    #[error("unterminated placeholder starting at byte {0}")]
    Unterminated(usize),
    #[error("unmatched `}}` at byte {0}")]
    UnmatchedBrace(usize),
}

pub type Result<T> = std::result::Result<T, TransferError>;
