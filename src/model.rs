//! ONNX churn classifier.
//!
//! Loads the exported scikit-learn model once at startup and serves
//! repeated predictions. Handles both probability output formats seen in
//! sklearn ONNX exports: plain float tensors and the zipmap
//! `seq(map(int64, float))` form.

use crate::error::{ChurnError, Result};
use crate::features::{FeatureRecord, FEATURE_NAMES};
use crate::types::prediction::ChurnLabel;
use ort::memory::Allocator;
use ort::session::{builder::GraphOptimizationLevel, Session, SessionOutputs};
use ort::value::{DowncastableTarget, DynMapValueType, DynSequenceValueType, ValueType};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// Loaded churn classifier with its discovered I/O names.
///
/// The session lives behind a mutex because `ort` runs take exclusive
/// access; the model itself is immutable after load, so concurrent
/// callers only serialize on the run itself.
#[derive(Debug)]
pub struct ChurnModel {
    session: Mutex<Session>,
    input_name: String,
    probability_output: String,
}

impl ChurnModel {
    /// Load the classifier artifact and validate its input width against
    /// the training schema.
    pub fn load<P: AsRef<Path>>(path: P, intra_threads: usize) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ChurnError::ArtifactNotFound(path.to_path_buf()));
        }

        ort::init().commit()?;

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(intra_threads)?
            .commit_from_file(path)?;

        validate_input_width(&session)?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "float_input".to_string());

        let probability_output = session
            .outputs
            .iter()
            .find(|o| o.name.contains("prob"))
            .map(|o| o.name.clone())
            .unwrap_or_else(|| {
                session
                    .outputs
                    .last()
                    .map(|o| o.name.clone())
                    .unwrap_or_else(|| "output_probability".to_string())
            });

        if !session.outputs.iter().any(|o| o.name.contains("label")) {
            warn!(
                path = %path.display(),
                "Model exports no label output; labels fall back to the 0.5 boundary"
            );
        }

        info!(
            path = %path.display(),
            input = %input_name,
            probability_output = %probability_output,
            intra_threads = intra_threads,
            "Churn model loaded"
        );

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            probability_output,
        })
    }

    /// Run the classifier on one scaled feature record.
    ///
    /// Returns the model's own class decision and the class-1 probability
    /// in [0, 1]. Deterministic: no randomness after load.
    pub fn predict(&self, record: &FeatureRecord) -> Result<(ChurnLabel, f64)> {
        use ort::value::Tensor;

        let features = record.as_slice();
        let shape = vec![1_i64, features.len() as i64];
        let input_tensor = Tensor::from_array((shape, features.to_vec()))?;

        // Hold the lock for the whole run; recover from poisoning since
        // the session itself carries no interior state between runs.
        let mut session = self
            .session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let outputs = session.run(ort::inputs![&self.input_name => input_tensor])?;

        let probability = self.extract_probability(&outputs)?;
        let label = match self.extract_label(&outputs) {
            Some(class) => ChurnLabel::from_class(class),
            None => ChurnLabel::from_class((probability >= 0.5) as i64),
        };

        debug!(
            label = ?label,
            probability = probability,
            "Inference complete"
        );

        Ok((label, probability))
    }

    /// Extract the model's class decision from the label output tensor.
    fn extract_label(&self, outputs: &SessionOutputs) -> Option<i64> {
        for (name, output) in outputs.iter() {
            if !name.contains("label") {
                continue;
            }
            if let Ok((_, data)) = output.try_extract_tensor::<i64>() {
                return data.first().copied();
            }
        }
        None
    }

    /// Extract the class-1 probability, trying the named probability
    /// output first and falling back to any non-label output.
    fn extract_probability(&self, outputs: &SessionOutputs) -> Result<f64> {
        if let Some(output) = outputs.get(&self.probability_output) {
            if let Some(prob) = extract_from_value(output) {
                return Ok(prob);
            }
        }

        for (name, output) in outputs.iter() {
            if name.contains("label") {
                continue;
            }
            if let Some(prob) = extract_from_value(&output) {
                debug!(output = %name, "Probability taken from fallback output");
                return Ok(prob);
            }
        }

        Err(ChurnError::MissingProbability(
            self.probability_output.clone(),
        ))
    }
}

/// Try both sklearn export formats on one output value.
fn extract_from_value(output: &ort::value::DynValue) -> Option<f64> {
    // Plain tensor: [1, 2] with per-class probabilities
    if let Ok((shape, data)) = output.try_extract_tensor::<f32>() {
        let dims: Vec<i64> = shape.iter().copied().collect();
        return class1_from_tensor(&dims, data);
    }

    // Zipmap: seq(map(int64, float)), one map per batch row
    if DynSequenceValueType::can_downcast(&output.dtype()) {
        return class1_from_sequence_map(output);
    }

    None
}

/// Class-1 probability from a `[batch, num_classes]` (or flat) tensor.
fn class1_from_tensor(dims: &[i64], data: &[f32]) -> Option<f64> {
    let num_classes = *dims.last()? as usize;

    match num_classes {
        0 => None,
        // Single-column output is already the class-1 probability
        1 => data.first().map(|&v| v as f64),
        _ => data.get(1).map(|&v| v as f64),
    }
}

/// Class-1 probability from the zipmap `seq(map(int64, float))` form.
fn class1_from_sequence_map(output: &ort::value::DynValue) -> Option<f64> {
    let allocator = Allocator::default();

    let sequence = output.downcast_ref::<DynSequenceValueType>().ok()?;
    let maps = sequence
        .try_extract_sequence::<DynMapValueType>(&allocator)
        .ok()?;
    let first = maps.first()?;
    let kv_pairs = first.try_extract_key_values::<i64, f32>().ok()?;

    for (class_id, prob) in &kv_pairs {
        if *class_id == 1 {
            return Some(*prob as f64);
        }
    }
    // Degenerate single-class map: invert class 0
    for (class_id, prob) in &kv_pairs {
        if *class_id == 0 {
            return Some(1.0 - *prob as f64);
        }
    }
    None
}

/// Reject a model whose declared input width disagrees with the six-column
/// training schema. Exports commonly declare a dynamic batch dimension
/// (`[None, 6]`); a dynamic width is accepted with a warning.
fn validate_input_width(session: &Session) -> Result<()> {
    let Some(input) = session.inputs.first() else {
        warn!("Model declares no inputs; skipping schema check");
        return Ok(());
    };

    if let ValueType::Tensor { shape, .. } = &input.input_type {
        let dims: Vec<i64> = shape.iter().copied().collect();
        match dims.last() {
            Some(&width) if width > 0 => {
                if width as usize != FEATURE_NAMES.len() {
                    return Err(ChurnError::InputWidthMismatch {
                        expected: FEATURE_NAMES.len(),
                        actual: width as usize,
                    });
                }
            }
            _ => {
                warn!(
                    input = %input.name,
                    "Model input width is dynamic; column order cannot be verified"
                );
            }
        }
    }

    Ok(())
}
