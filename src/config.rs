//! Configuration management for the churn predictor

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub artifacts: ArtifactsConfig,
    #[serde(default)]
    pub inference: InferenceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Locations of the serialized artifacts loaded at startup
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactsConfig {
    /// ONNX classifier exported from training
    pub model_path: PathBuf,
    /// Fitted scaler parameters (JSON)
    pub scaler_path: PathBuf,
    /// Optional decorative motif asset; absent is fine
    #[serde(default)]
    pub motif_path: Option<PathBuf>,
}

/// Inference tuning
#[derive(Debug, Clone, Deserialize)]
pub struct InferenceConfig {
    /// Number of intra-op threads for the ONNX session (default: 1)
    #[serde(default = "default_intra_threads")]
    pub intra_threads: usize,
}

fn default_intra_threads() -> usize {
    1
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            intra_threads: default_intra_threads(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default file, falling back to the
    /// built-in defaults when no file is present.
    pub fn load() -> Result<Self> {
        let path = Path::new("config/config.toml");
        if path.exists() {
            Self::load_from_path(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        // Fixed filenames in the working directory, as the original ran
        Self {
            artifacts: ArtifactsConfig {
                model_path: PathBuf::from("churn_model.onnx"),
                scaler_path: PathBuf::from("scaler.json"),
                motif_path: Some(PathBuf::from("motif.json")),
            },
            inference: InferenceConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
