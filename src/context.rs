//! Inference context: the one place artifacts live after startup.

use crate::config::AppConfig;
use crate::error::Result;
use crate::features::FeatureRecord;
use crate::model::ChurnModel;
use crate::scaler::StandardScaler;
use crate::types::customer::CustomerProfile;
use crate::types::prediction::ChurnPrediction;
use tracing::{debug, info};

/// Immutable inference state, constructed once at process start and passed
/// by reference into every prediction. Holds the loaded classifier and
/// scaler; there is no global state and no reload.
pub struct InferenceContext {
    model: ChurnModel,
    scaler: StandardScaler,
}

impl InferenceContext {
    /// Load both artifacts per the configuration. Fails fast with a clear
    /// error when either file is missing or fails its schema check.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let scaler = StandardScaler::load(&config.artifacts.scaler_path)?;
        let model = ChurnModel::load(
            &config.artifacts.model_path,
            config.inference.intra_threads,
        )?;

        info!("Inference context initialized");

        Ok(Self { model, scaler })
    }

    /// Score one customer: encode into the training layout, standardize
    /// the continuous columns, run the classifier.
    ///
    /// Stateless per call; identical profiles yield identical predictions.
    pub fn predict(&self, profile: &CustomerProfile) -> Result<ChurnPrediction> {
        let mut record = FeatureRecord::encode(profile);
        self.scaler.transform(&mut record);

        let (label, probability) = self.model.predict(&record)?;
        let probability_pct = probability * 100.0;

        debug!(
            label = ?label,
            probability_pct = probability_pct,
            tenure = profile.tenure_months,
            contract = %profile.contract,
            "Customer scored"
        );

        Ok(ChurnPrediction::new(label, probability_pct))
    }
}
