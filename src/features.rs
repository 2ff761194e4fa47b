//! Feature encoding for churn model inference.
//!
//! This module builds the feature vector from a customer profile in the
//! exact column order used during Python model training.

use crate::types::customer::CustomerProfile;

/// Column names in training order. The scaler and model were both fit
/// against this layout; reordering silently corrupts predictions.
pub const FEATURE_NAMES: [&str; 6] = [
    "gender",
    "tenure",
    "MonthlyCharges",
    "TotalCharges",
    "InternetService",
    "Contract",
];

/// Indices of the continuous columns the scaler applies to
/// (tenure, MonthlyCharges, TotalCharges).
pub const CONTINUOUS_RANGE: std::ops::Range<usize> = 1..4;

/// Names of the continuous columns, in training order.
pub fn continuous_feature_names() -> Vec<String> {
    FEATURE_NAMES[CONTINUOUS_RANGE]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// One customer as a fixed-order numeric vector, ready for the scaler
/// and model. Categorical columns hold their integer training codes.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord([f32; 6]);

impl FeatureRecord {
    /// Encode a profile into the training layout.
    ///
    /// Categorical fields carry their codes by construction, so encoding
    /// cannot fail; unknown category strings are rejected earlier, when a
    /// profile is parsed.
    pub fn encode(profile: &CustomerProfile) -> Self {
        Self([
            profile.gender.code() as f32,
            profile.tenure_months as f32,
            profile.monthly_charges as f32,
            profile.total_charges as f32,
            profile.internet_service.code() as f32,
            profile.contract.code() as f32,
        ])
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Mutable view of the continuous columns, for the scaler.
    pub(crate) fn continuous_mut(&mut self) -> &mut [f32] {
        &mut self.0[CONTINUOUS_RANGE]
    }

    /// The categorical columns (gender, InternetService, Contract codes).
    pub fn categorical(&self) -> [f32; 3] {
        [self.0[0], self.0[4], self.0[5]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::customer::{Contract, Gender, InternetService};

    #[test]
    fn test_encode_training_order() {
        let profile = CustomerProfile {
            gender: Gender::Male,
            tenure_months: 24,
            monthly_charges: 89.5,
            total_charges: 2148.0,
            internet_service: InternetService::FiberOptic,
            contract: Contract::OneYear,
        };

        let record = FeatureRecord::encode(&profile);
        assert_eq!(record.as_slice(), &[1.0, 24.0, 89.5, 2148.0, 1.0, 1.0]);
    }

    #[test]
    fn test_encode_boundary_values() {
        for (tenure, monthly, total) in [(0, 0.0, 0.0), (72, 200.0, 10000.0)] {
            let profile = CustomerProfile {
                tenure_months: tenure,
                monthly_charges: monthly,
                total_charges: total,
                ..CustomerProfile::example()
            };

            let record = FeatureRecord::encode(&profile);
            assert_eq!(record.as_slice()[1], tenure as f32);
            assert_eq!(record.as_slice()[2], monthly as f32);
            assert_eq!(record.as_slice()[3], total as f32);
        }
    }

    #[test]
    fn test_continuous_range_matches_names() {
        assert_eq!(
            continuous_feature_names(),
            vec!["tenure", "MonthlyCharges", "TotalCharges"]
        );
        assert_eq!(FEATURE_NAMES.len(), 6);
    }
}
