pub mod config;

use crate::error::{Error, Result};
use candle_core::{DType, Device, Tensor};
use candle_nn::{Linear, Module, VarBuilder};
use config::{ClassifierHead, Config};
use std::cmp::Ordering;
use std::path::Path;

/// Linear decision head over a dense feature row.
///
/// Logistic regression, linear SVMs and multinomial naive Bayes all reduce to
/// `scores = x·Wᵀ + b`, so one head serves every exported model.
pub struct LinearClassifier {
    head: Linear,
    config: Config,
    device: Device,
}

impl LinearClassifier {
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
        config_path: P,
        weights_path: Q,
        device: Device,
    ) -> Result<Self> {
        let config = Config::load(config_path)?;

        let weights_path = weights_path.as_ref();
        let metadata = std::fs::metadata(weights_path).map_err(|e| Error::io(weights_path, e))?;
        if !metadata.is_file() {
            return Err(Error::invalid(weights_path, "not a regular file"));
        }
        let model_builder =
            unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device) }?;
        let head = candle_nn::linear(
            config.num_features,
            config.num_outputs(),
            model_builder.pp("classifier"),
        )?;

        Ok(Self {
            head,
            config,
            device,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn num_features(&self) -> usize {
        self.config.num_features
    }

    /// Decision values for a single feature row.
    pub fn forward(&self, features: &[f32]) -> Result<Vec<f32>> {
        let xs = Tensor::from_slice(features, (1, features.len()), &self.device)?;
        let scores = self.head.forward(&xs)?;
        Ok(scores.squeeze(0)?.to_vec1::<f32>()?)
    }

    /// Turns decision values into a class index and the score behind it.
    pub fn decide(&self, scores: &[f32]) -> Option<(usize, f32)> {
        match self.config.classifier_config.classifier_head {
            ClassifierHead::Binary => {
                let score = *scores.first()?;
                Some((usize::from(score > 0.0), score))
            }
            ClassifierHead::Multiclass => argmax(scores),
        }
    }
}

/// Index and value of the first maximum under `total_cmp`.
fn argmax(scores: &[f32]) -> Option<(usize, f32)> {
    scores
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (i, score)| match best {
            Some((_, top)) if score.total_cmp(&top) != Ordering::Greater => best,
            _ => Some((i, score)),
        })
}
