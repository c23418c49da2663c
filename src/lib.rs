//! Occasion classifier: labels product text with the occasion it suits,
//! using an exported linear model and its TF-IDF vectorizer.

pub mod artifacts;
pub mod classifier;
pub mod error;
pub mod failure;
pub mod model;
pub mod vectorizer;

pub use artifacts::ArtifactPaths;
pub use classifier::{predict, ClassifyResponse, OccasionClassifier, Product};
pub use error::{Error, Result};
pub use failure::Failure;
