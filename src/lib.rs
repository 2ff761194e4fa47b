//! Churn Predictor Library
//!
//! Loads a pre-trained churn classifier (ONNX) and its fitted feature
//! scaler once at startup, encodes customer attributes into the exact
//! vector the model was trained on, and serves repeated predictions.

pub mod assets;
pub mod config;
pub mod context;
pub mod error;
pub mod features;
pub mod model;
pub mod scaler;
pub mod session;
pub mod types;

pub use config::AppConfig;
pub use context::InferenceContext;
pub use error::ChurnError;
pub use features::FeatureRecord;
pub use model::ChurnModel;
pub use scaler::StandardScaler;
pub use types::{ChurnLabel, ChurnPrediction, CustomerProfile};
