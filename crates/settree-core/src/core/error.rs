use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SettingsError {
    #[error("Cannot resolve key '{key}': {reason}")]
    KeyResolution { key: String, reason: &'static str },

    #[error("Type mismatch at key '{key}': expected {expected}, found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl SettingsError {
    pub(crate) fn missing(key: impl ToString) -> Self {
        SettingsError::KeyResolution {
            key: key.to_string(),
            reason: "no such key",
        }
    }

    pub(crate) fn not_a_node(key: impl ToString, found: &'static str) -> Self {
        SettingsError::TypeMismatch {
            key: key.to_string(),
            expected: "node",
            found,
        }
    }
}

pub type Result<T> = std::result::Result<T, SettingsError>;
