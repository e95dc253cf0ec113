//! Error types for screen generation.

use thiserror::Error;

/// Result type alias for checked generation.
pub type Result<T> = std::result::Result<T, GenerateError>;

/// Conditions that make generated source invalid.
///
/// Only the checked entry point reports these; unchecked generation always
/// produces text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// Two elements would declare the same field.
    #[error("duplicate identifier '{name}' (elements '{first}' and '{second}')")]
    DuplicateIdentifier {
        name: String,
        first: String,
        second: String,
    },

    /// A field name is not a legal Java identifier.
    #[error("invalid identifier '{name}' on element '{element}'")]
    InvalidIdentifier { name: String, element: String },

    /// The generated class name is not a legal Java identifier.
    #[error("invalid class name '{0}'")]
    InvalidClassName(String),
}
