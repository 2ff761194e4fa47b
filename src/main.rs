//! Churn Predictor - Main Entry Point
//!
//! Loads the classifier and scaler artifacts, then runs the interactive
//! prediction session on stdin/stdout.

use anyhow::{Context, Result};
use churn_predictor::{
    assets, config::AppConfig, context::InferenceContext, session::Session,
};
use std::io;
use tracing::info;

fn main() -> Result<()> {
    let config = AppConfig::load()?;

    init_logging(&config)?;
    info!("Starting churn predictor");

    // Fail fast with a readable message when an artifact is missing;
    // nothing works without the model and scaler.
    let context = InferenceContext::new(&config).with_context(|| {
        format!(
            "Cannot start without artifacts ({} and {})",
            config.artifacts.model_path.display(),
            config.artifacts.scaler_path.display()
        )
    })?;

    let motif = config
        .artifacts
        .motif_path
        .as_ref()
        .and_then(assets::load_motif);

    let session = Session::new(&context, motif);
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    session.run(&mut input, &mut output)?;

    info!("Session ended");
    Ok(())
}

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.logging.level.clone()));

    // Logs go to stderr so the form on stdout stays clean
    if config.logging.format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }

    Ok(())
}
