//! Type definitions for the churn predictor

pub mod customer;
pub mod prediction;

pub use customer::{Contract, CustomerProfile, Gender, InternetService};
pub use prediction::{ChurnLabel, ChurnPrediction};
