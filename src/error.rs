//! Error types for churn inference

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while loading artifacts or running inference
#[derive(Debug, Error)]
pub enum ChurnError {
    /// A categorical string outside the enumerated training set
    #[error("unknown category {value:?} for field '{field}'")]
    UnknownCategory {
        field: &'static str,
        value: String,
    },

    /// Artifact columns disagree with the training schema
    #[error("schema mismatch: expected columns {expected:?}, artifact has {actual:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    /// Model input tensor is not six columns wide
    #[error("model expects {actual} input columns, training schema has {expected}")]
    InputWidthMismatch { expected: usize, actual: usize },

    /// Required artifact file missing at startup
    #[error("artifact not found: {0}")]
    ArtifactNotFound(PathBuf),

    /// Model produced no usable probability output
    #[error("model output for '{0}' contained no class probability")]
    MissingProbability(String),

    #[error("I/O error reading artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed artifact: {0}")]
    Json(#[from] serde_json::Error),

    #[error("ONNX runtime error: {0}")]
    Ort(#[from] ort::Error),
}

pub type Result<T> = std::result::Result<T, ChurnError>;
