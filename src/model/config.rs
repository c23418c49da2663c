use crate::error::{Error, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Contents of `config.json`: the shape of the linear head and its labels.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    pub num_features: usize,
    #[serde(flatten)]
    pub classifier_config: ClassifierConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierHead {
    /// One row of weights per label, highest score wins.
    #[default]
    Multiclass,
    /// A single decision row; positive scores select label `1`.
    Binary,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct ClassifierConfig {
    pub id2label: HashMap<String, String>,
    #[serde(default)]
    pub label2id: HashMap<String, usize>,
    #[serde(default)]
    pub classifier_head: ClassifierHead,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = File::open(path).map_err(|e| Error::io(path, e))?;
        let config: Config = serde_json::from_reader(BufReader::new(reader))
            .map_err(|e| Error::serialization(path, e))?;
        config.validate(path)?;
        Ok(config)
    }

    pub fn num_labels(&self) -> usize {
        self.classifier_config.id2label.len()
    }

    /// Number of rows the weight matrix must have.
    pub fn num_outputs(&self) -> usize {
        match self.classifier_config.classifier_head {
            ClassifierHead::Multiclass => self.num_labels(),
            ClassifierHead::Binary => 1,
        }
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.classifier_config
            .id2label
            .get(&index.to_string())
            .map(String::as_str)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let cc = &self.classifier_config;
        if self.num_features == 0 {
            return Err(Error::invalid(path, "num_features must be positive"));
        }
        if cc.id2label.is_empty() {
            return Err(Error::invalid(path, "id2label is empty"));
        }
        for index in 0..self.num_labels() {
            if self.label(index).is_none() {
                return Err(Error::invalid(
                    path,
                    format!("id2label has no entry for class {index}"),
                ));
            }
        }
        if cc.classifier_head == ClassifierHead::Binary && self.num_labels() != 2 {
            return Err(Error::invalid(
                path,
                format!("binary head needs 2 labels, found {}", self.num_labels()),
            ));
        }
        for (label, &id) in &cc.label2id {
            if self.label(id) != Some(label.as_str()) {
                return Err(Error::invalid(
                    path,
                    format!("label2id maps {label:?} to {id}, which id2label disagrees with"),
                ));
            }
        }
        Ok(())
    }
}
