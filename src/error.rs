//! Error types for schema construction, codec calls, and layout loading.

use std::path::PathBuf;

use thiserror::Error;

use crate::encoding::Encoding;

/// Invalid field configuration, raised before any record is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("field {index}: width must be non-negative, got {width}")]
    NegativeWidth { index: usize, width: i64 },

    #[error("field {index}: property path is empty")]
    EmptyPath { index: usize },

    #[error("field {index}: invalid property path '{path}': {reason}")]
    InvalidPath {
        index: usize,
        path: String,
        reason: String,
    },
}

/// Malformed property path text. Offsets are byte positions in the path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path is empty")]
    Empty,

    #[error("empty key at offset {offset}")]
    EmptyKey { offset: usize },

    #[error("unclosed '[' at offset {offset}")]
    UnclosedBracket { offset: usize },

    #[error("index '{text}' at offset {offset} is not an integer in 0..={}", crate::path::MAX_INDEX)]
    BadIndex { offset: usize, text: String },

    #[error("unexpected '{found}' at offset {offset}")]
    Unexpected { offset: usize, found: char },
}

/// Failure of a whole parse or stringify call. No partial output accompanies it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Strict-mode line whose length differs from the schema's total width.
    #[error("line {line}: expected {expected} characters, found {actual}")]
    LengthMismatch {
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("{encoding}: {reason}")]
    Encoding { encoding: Encoding, reason: String },

    #[error("invalid option: {0}")]
    InvalidOption(String),
}

impl CodecError {
    pub(crate) fn encoding(encoding: Encoding, reason: impl Into<String>) -> Self {
        CodecError::Encoding {
            encoding,
            reason: reason.into(),
        }
    }
}

/// Failure to load a layout file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read layout '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed layout '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
