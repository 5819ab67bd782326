//! Error types for loading specs and accessing their values.

use std::path::PathBuf;

use crate::value::ValueKind;

/// Errors produced while parsing a spec document.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("failed to parse spec JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record {index} has no \"key\"")]
    MissingKey { index: usize },

    #[error("record {index} has an empty \"key\"")]
    EmptyKey { index: usize },

    #[error(
        "record {index} ({key:?}) must contain exactly one of \"sliderValue\" or \"switchValue\""
    )]
    AmbiguousOrMissingKind { index: usize, key: String },

    #[error("duplicate key {key:?} at record {index}")]
    DuplicateKey { index: usize, key: String },

    #[error("slider {key:?} has sliderMinValue {min} greater than sliderMaxValue {max}")]
    InvalidBounds { key: String, min: f64, max: f64 },

    #[error("slider {key:?} has a non-finite value or bound")]
    NonFiniteNumber { key: String },
}

/// Errors produced while resolving a spec name to a document.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no spec document named {name:?} (looked for {path})")]
    NotFound { name: String, path: PathBuf },

    #[error("no embedded spec document named {0:?}")]
    NotEmbedded(String),

    #[error("failed to read spec document {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Load-time failure: the named spec is missing or invalid.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Recoverable lookup and mutation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpecError {
    #[error("unknown key {0:?}")]
    UnknownKey(String),

    #[error("key {key:?} holds a {actual} value, not a {expected}")]
    TypeMismatch {
        key: String,
        expected: ValueKind,
        actual: ValueKind,
    },

    #[error("key {0:?} cannot be set to a non-finite number")]
    NonFiniteValue(String),
}
