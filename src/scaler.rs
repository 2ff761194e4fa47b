//! Pre-fitted standard scaler applied to the continuous feature columns.
//!
//! The artifact is the scaler's exported parameters (`feature_names`,
//! `mean`, `scale`) serialized as JSON at training time. It is loaded once
//! at startup and never mutated.

use crate::error::{ChurnError, Result};
use crate::features::{continuous_feature_names, FeatureRecord};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// Fitted standardization transform for tenure, MonthlyCharges and
/// TotalCharges. Categorical columns are never touched.
#[derive(Debug, Clone, Deserialize)]
pub struct StandardScaler {
    /// Columns the scaler was fit on, in fit order
    feature_names: Vec<String>,
    /// Per-column mean from the training data
    mean: Vec<f64>,
    /// Per-column standard deviation from the training data
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Load the scaler artifact and validate it against the crate's
    /// continuous-column schema.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ChurnError::ArtifactNotFound(path.to_path_buf()));
        }

        let raw = fs::read_to_string(path)?;
        let scaler: StandardScaler = serde_json::from_str(&raw)?;
        scaler.validate_schema()?;

        info!(
            path = %path.display(),
            columns = ?scaler.feature_names,
            "Scaler artifact loaded"
        );

        Ok(scaler)
    }

    /// Reject an artifact fit on different columns or with ragged
    /// parameter vectors. A mismatch here would otherwise produce
    /// silently wrong predictions.
    fn validate_schema(&self) -> Result<()> {
        let expected = continuous_feature_names();
        if self.feature_names != expected
            || self.mean.len() != expected.len()
            || self.scale.len() != expected.len()
        {
            return Err(ChurnError::SchemaMismatch {
                expected,
                actual: self.feature_names.clone(),
            });
        }
        Ok(())
    }

    /// Standardize the continuous columns in place: `(x - mean) / scale`.
    ///
    /// Deterministic and strictly monotonic per column for positive scale;
    /// a zero scale (constant training column) passes values through
    /// centered only.
    pub fn transform(&self, record: &mut FeatureRecord) {
        let continuous = record.continuous_mut();
        for (i, value) in continuous.iter_mut().enumerate() {
            let centered = *value as f64 - self.mean[i];
            *value = if self.scale[i] != 0.0 {
                (centered / self.scale[i]) as f32
            } else {
                centered as f32
            };
        }
    }

    /// Columns the artifact was fit on.
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    #[cfg(test)]
    pub(crate) fn from_parts(feature_names: Vec<String>, mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self {
            feature_names,
            mean,
            scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::customer::CustomerProfile;
    use std::io::Write;

    fn fitted_scaler() -> StandardScaler {
        // Parameters shaped like a telco-churn training set
        StandardScaler::from_parts(
            continuous_feature_names(),
            vec![32.4, 64.76, 2283.3],
            vec![24.5, 30.09, 2266.77],
        )
    }

    #[test]
    fn test_transform_leaves_categoricals_untouched() {
        let scaler = fitted_scaler();
        let mut record = FeatureRecord::encode(&CustomerProfile::example());
        let before = record.categorical();

        scaler.transform(&mut record);

        assert_eq!(record.categorical(), before);
    }

    #[test]
    fn test_transform_deterministic() {
        let scaler = fitted_scaler();
        let mut a = FeatureRecord::encode(&CustomerProfile::example());
        let mut b = a.clone();

        scaler.transform(&mut a);
        scaler.transform(&mut b);

        assert_eq!(a, b);
    }

    #[test]
    fn test_transform_monotonic_in_tenure() {
        let scaler = fitted_scaler();
        let mut previous = f32::NEG_INFINITY;

        for tenure in [0u32, 12, 36, 72] {
            let profile = CustomerProfile {
                tenure_months: tenure,
                ..CustomerProfile::example()
            };
            let mut record = FeatureRecord::encode(&profile);
            scaler.transform(&mut record);

            let scaled_tenure = record.as_slice()[1];
            assert!(scaled_tenure > previous);
            previous = scaled_tenure;
        }
    }

    #[test]
    fn test_boundary_values_scale_without_error() {
        let scaler = fitted_scaler();
        for (tenure, monthly, total) in [(0, 0.0, 0.0), (72, 200.0, 10000.0)] {
            let profile = CustomerProfile {
                tenure_months: tenure,
                monthly_charges: monthly,
                total_charges: total,
                ..CustomerProfile::example()
            };
            let mut record = FeatureRecord::encode(&profile);
            scaler.transform(&mut record);

            assert!(record.as_slice().iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn test_known_standardization_value() {
        let scaler = StandardScaler::from_parts(
            continuous_feature_names(),
            vec![10.0, 0.0, 0.0],
            vec![5.0, 1.0, 1.0],
        );
        let profile = CustomerProfile {
            tenure_months: 20,
            monthly_charges: 3.0,
            total_charges: 7.0,
            ..CustomerProfile::example()
        };
        let mut record = FeatureRecord::encode(&profile);
        scaler.transform(&mut record);

        assert_eq!(record.as_slice()[1], 2.0); // (20 - 10) / 5
        assert_eq!(record.as_slice()[2], 3.0);
        assert_eq!(record.as_slice()[3], 7.0);
    }

    #[test]
    fn test_load_rejects_wrong_columns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"feature_names": ["tenure", "TotalCharges", "MonthlyCharges"],
                "mean": [0.0, 0.0, 0.0], "scale": [1.0, 1.0, 1.0]}}"#
        )
        .unwrap();

        let err = StandardScaler::load(file.path()).unwrap_err();
        assert!(matches!(err, ChurnError::SchemaMismatch { .. }));
    }

    #[test]
    fn test_load_valid_artifact() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"feature_names": ["tenure", "MonthlyCharges", "TotalCharges"],
                "mean": [32.4, 64.76, 2283.3], "scale": [24.5, 30.09, 2266.77]}}"#
        )
        .unwrap();

        let scaler = StandardScaler::load(file.path()).unwrap();
        assert_eq!(scaler.feature_names().len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let err = StandardScaler::load("no/such/scaler.json").unwrap_err();
        assert!(matches!(err, ChurnError::ArtifactNotFound(_)));
    }
}
