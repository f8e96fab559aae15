//! Inference adapter for the CBC screening service.
//!
//! Loads the four serving artifacts (column schema, scaler, tree ensemble,
//! neural network) into an immutable [`ArtifactSet`] and exposes the
//! end-to-end screening entry points. Model artifacts are opaque: anything
//! implementing [`Classifier`] can serve.

pub mod adapter;
pub mod artifacts;
pub mod classifier;
pub mod error;

pub use adapter::BatchPrediction;
pub use artifacts::ArtifactSet;
pub use classifier::{Activation, Classifier, LinearModel};
pub use error::{InferError, Result};
