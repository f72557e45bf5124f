use std::path::PathBuf;

use crate::WidgetId;

/// Error type for reading questionnaire records.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// The text is not valid JSON.
    #[error("Malformed questionnaire JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level JSON value is not an array.
    #[error("Questionnaire must be a JSON array, got {0}")]
    NotAnArray(&'static str),

    /// An array element is not a JSON object.
    #[error("Question record {index} must be a JSON object, got {actual}")]
    NotAnObject { index: usize, actual: &'static str },

    /// A required key is absent.
    #[error("Missing key '{0}' in question record")]
    MissingKey(String),

    /// A key is present but holds the wrong JSON type.
    #[error("Key '{key}' in question record: expected {expected}, got {actual}")]
    WrongType {
        key: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A value is present with the right type but is not usable.
    #[error("Invalid value for key '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

impl RecordError {
    /// Check if this error comes from unparseable JSON text.
    pub fn is_syntax(&self) -> bool {
        matches!(self, Self::Json(_))
    }
}

/// Error type for frontend changes to the view tree.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ViewError {
    #[error("No widget with id {0}")]
    UnknownWidget(WidgetId),

    #[error("Widget {id} is a {actual}, expected {expected}")]
    WrongWidget {
        id: WidgetId,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Value {value} is out of range for widget {id}")]
    OutOfRange { id: WidgetId, value: i64 },
}

/// Error type for preference stores.
#[derive(Debug, thiserror::Error)]
pub enum PreferencesError {
    #[error("Failed to access preferences at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Store-specific failure (encoding, corrupt file, etc.)
    #[error("Preferences error: {0}")]
    Backend(#[from] anyhow::Error),
}

impl PreferencesError {
    /// Create a backend error from any error type.
    pub fn backend(err: impl Into<anyhow::Error>) -> Self {
        Self::Backend(err.into())
    }
}
