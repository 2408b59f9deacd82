//! # Classifier service
//!
//! Client side of the external prediction/training service. The crate never classifies
//! anything itself: it sends padded [`CatalogRow`](crate::catalog::CatalogRow)s and gets
//! back one label and confidence per row.
//!
//! - [`messages`] – request/response types of prediction and model registry.
//! - [`client`] – the async [`ClassifierClient`].
//! - [`training`] – warm-start training job payloads and [`Hyperparams`].
//! - [`model_stats`] – evaluation metrics and confusion matrix percentages.
pub mod client;
pub mod messages;
pub mod model_stats;
pub mod training;

pub use client::ClassifierClient;
pub use messages::{ConfidenceLevel, PredictionLabel, PredictionRow};
pub use training::{Hyperparams, TrainStage, TrainStatus};
