use thiserror::Error;

use crate::value::{Value, ValueType};

/// Errors converting between [`Value`] and a typed field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("expected a {expected} value, found {found}")]
    Mismatch {
        expected: ValueType,
        found: &'static str,
    },
}

impl ValueError {
    pub fn mismatch(expected: ValueType, found: &Value) -> Self {
        ValueError::Mismatch {
            expected,
            found: found.kind(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ValueError>;
