//! Prediction report types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Binary churn outcome as reported by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChurnLabel {
    /// Class 0: the customer is expected to stay
    Retained,
    /// Class 1: the customer is expected to leave
    Churned,
}

impl ChurnLabel {
    /// Map the model's integer class to a label
    pub fn from_class(class: i64) -> Self {
        if class == 1 {
            ChurnLabel::Churned
        } else {
            ChurnLabel::Retained
        }
    }

    pub fn is_churn(self) -> bool {
        matches!(self, ChurnLabel::Churned)
    }
}

/// One scored customer: label plus class-1 probability as a percentage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChurnPrediction {
    /// Model's class decision
    pub label: ChurnLabel,

    /// Probability of churn (class 1), 0.0-100.0
    pub probability_pct: f64,

    /// When inference ran
    pub scored_at: DateTime<Utc>,
}

impl ChurnPrediction {
    pub fn new(label: ChurnLabel, probability_pct: f64) -> Self {
        Self {
            label,
            probability_pct,
            scored_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_class() {
        assert_eq!(ChurnLabel::from_class(1), ChurnLabel::Churned);
        assert_eq!(ChurnLabel::from_class(0), ChurnLabel::Retained);
        assert!(ChurnLabel::Churned.is_churn());
        assert!(!ChurnLabel::Retained.is_churn());
    }

    #[test]
    fn test_prediction_serialization() {
        let prediction = ChurnPrediction::new(ChurnLabel::Churned, 83.25);

        let json = serde_json::to_string(&prediction).unwrap();
        let back: ChurnPrediction = serde_json::from_str(&json).unwrap();

        assert_eq!(back.label, prediction.label);
        assert_eq!(back.probability_pct, prediction.probability_pct);
    }
}
