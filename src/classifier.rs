pub use candle_core::Device;

use crate::artifacts::ArtifactPaths;
use crate::error::{Error, Result};
use crate::failure::Failure;
use crate::model::LinearClassifier;
use crate::vectorizer::TfidfVectorizer;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

/// Label returned for products that cannot be classified.
pub const UNCATEGORIZED: &str = "Sin categoría";

/// Shortest query, in characters, worth sending to the model.
pub const MIN_QUERY_CHARS: usize = 5;

pub struct OccasionClassifier {
    model: LinearClassifier,
    vectorizer: TfidfVectorizer,
}

/// Reads the model (config + weights) and the vectorizer.
pub fn load_models(paths: &ArtifactPaths) -> Result<(LinearClassifier, TfidfVectorizer)> {
    debug!(
        config = %paths.config.display(),
        weights = %paths.weights.display(),
        vectorizer = %paths.vectorizer.display(),
        "loading artifacts"
    );
    let model = LinearClassifier::load(&paths.config, &paths.weights, Device::Cpu)?;
    let vectorizer = TfidfVectorizer::load(&paths.vectorizer)?;
    Ok((model, vectorizer))
}

/// Loads fresh artifacts and classifies `text` once.
pub fn predict(paths: &ArtifactPaths, text: &str) -> std::result::Result<ClassifyResponse, Failure> {
    let started = Instant::now();
    let classifier = OccasionClassifier::load(paths).map_err(Failure::model_load)?;
    let response = classifier.classify(text).map_err(Failure::prediction)?;
    debug!(
        label = %response.label,
        score = response.score,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "prediction finished"
    );
    Ok(response)
}

impl OccasionClassifier {
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        let (model, vectorizer) = load_models(paths)?;
        Ok(Self { model, vectorizer })
    }

    pub fn new(model: LinearClassifier, vectorizer: TfidfVectorizer) -> Self {
        Self { model, vectorizer }
    }

    pub fn classify(&self, text: &str) -> Result<ClassifyResponse> {
        let features = self.vectorizer.transform(text)?;
        if features.len() != self.model.num_features() {
            return Err(Error::DimensionMismatch {
                vectorizer: features.len(),
                model: self.model.num_features(),
            });
        }
        let scores = self.model.forward(&features)?;
        let (index, score) = self
            .model
            .decide(&scores)
            .ok_or(Error::NoScores)?;
        let label = self
            .model
            .config()
            .label(index)
            .ok_or(Error::UnknownLabel(index))?;
        Ok(ClassifyResponse {
            label: label.to_string(),
            score,
        })
    }

    /// Occasion for a catalogue product, falling back to [`UNCATEGORIZED`].
    pub fn classify_product(&self, product: &Product) -> String {
        let query = match product.query_text() {
            Some(query) => query,
            None => {
                warn!("product needs a name and a category");
                return UNCATEGORIZED.to_string();
            }
        };
        if query.chars().count() < MIN_QUERY_CHARS {
            warn!(query = %query, "query too short to classify");
            return UNCATEGORIZED.to_string();
        }
        match self.classify(&query) {
            Ok(response) if !response.label.trim().is_empty() => response.label,
            Ok(_) => UNCATEGORIZED.to_string(),
            Err(err) => {
                warn!(error = %err, "classification failed");
                UNCATEGORIZED.to_string()
            }
        }
    }
}

#[derive(Clone, Deserialize, Serialize, Debug, PartialEq)]
pub struct ClassifyResponse {
    pub label: String,
    pub score: f32,
}

#[derive(Clone, Deserialize, Serialize, Debug, Default)]
pub struct Product {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
}

impl Product {
    /// `name description category`, lowercased and trimmed; `None` when the
    /// name or category is blank.
    pub fn query_text(&self) -> Option<String> {
        if self.name.trim().is_empty() || self.category.trim().is_empty() {
            return None;
        }
        let text = format!("{} {} {}", self.name, self.description, self.category);
        Some(text.to_lowercase().trim().to_string())
    }
}
