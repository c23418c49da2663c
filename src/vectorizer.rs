//! Count / TF-IDF vectorizer compatible with scikit-learn's `TfidfVectorizer`.
//!
//! The fitted state lives in `vectorizer.json`; this module only applies it.

use crate::error::{Error, Result};
use regex::Regex;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tokenizers::normalizers::{Lowercase, StripAccents, NFKD};
use tokenizers::{NormalizedString, Normalizer};

pub const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccentStripping {
    /// NFKD, then drop combining marks.
    Unicode,
    /// NFKD, then drop everything outside ASCII.
    Ascii,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

fn default_true() -> bool {
    true
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// Serialized vectorizer state, as exported from the training side.
#[derive(Debug, Clone, Deserialize)]
pub struct VectorizerConfig {
    pub vocabulary: HashMap<String, usize>,
    #[serde(default)]
    pub idf: Option<Vec<f32>>,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default)]
    pub strip_accents: Option<AccentStripping>,
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub stop_words: Vec<String>,
    #[serde(default)]
    pub binary: bool,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default)]
    pub norm: Option<Norm>,
}

pub struct TfidfVectorizer {
    config: VectorizerConfig,
    token_pattern: Regex,
    stop_words: HashSet<String>,
    num_features: usize,
}

impl std::fmt::Debug for TfidfVectorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TfidfVectorizer")
            .field("num_features", &self.num_features)
            .field("ngram_range", &self.config.ngram_range)
            .field("idf", &self.config.idf.is_some())
            .field("norm", &self.config.norm)
            .finish()
    }
}

impl TfidfVectorizer {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader = File::open(path).map_err(|e| Error::io(path, e))?;
        let config: VectorizerConfig = serde_json::from_reader(BufReader::new(reader))
            .map_err(|e| Error::serialization(path, e))?;
        Self::from_config(config).map_err(|err| match err {
            Error::InvalidArtifact { reason, .. } => Error::invalid(path, reason),
            other => other,
        })
    }

    pub fn from_config(config: VectorizerConfig) -> Result<Self> {
        let (min_n, max_n) = config.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(Error::invalid(
                "vectorizer",
                format!("invalid ngram_range ({min_n}, {max_n})"),
            ));
        }

        // Columns must be exactly 0..len, one per term.
        let num_features = config.vocabulary.len();
        let mut seen = HashSet::with_capacity(num_features);
        for &column in config.vocabulary.values() {
            if column >= num_features {
                return Err(Error::invalid(
                    "vectorizer",
                    format!("column {column} is outside 0..{num_features}"),
                ));
            }
            if !seen.insert(column) {
                return Err(Error::invalid(
                    "vectorizer",
                    format!("column {column} is assigned to more than one term"),
                ));
            }
        }

        if let Some(idf) = &config.idf {
            if idf.len() != num_features {
                return Err(Error::invalid(
                    "vectorizer",
                    format!("idf has {} entries for {num_features} features", idf.len()),
                ));
            }
        }

        let token_pattern = Regex::new(&config.token_pattern)?;
        let stop_words = config.stop_words.iter().cloned().collect();

        Ok(Self {
            config,
            token_pattern,
            stop_words,
            num_features,
        })
    }

    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Lowercasing, then accent stripping.
    pub fn preprocess(&self, text: &str) -> Result<String> {
        let mut normalized = NormalizedString::from(text);
        if self.config.lowercase {
            Lowercase.normalize(&mut normalized)?;
        }
        match self.config.strip_accents {
            Some(AccentStripping::Unicode) => {
                NFKD.normalize(&mut normalized)?;
                StripAccents.normalize(&mut normalized)?;
            }
            Some(AccentStripping::Ascii) => {
                NFKD.normalize(&mut normalized)?;
                normalized.filter(|c| c.is_ascii());
            }
            None => {}
        }
        Ok(normalized.get().to_string())
    }

    /// Word n-grams of the preprocessed text, stop words removed.
    pub fn analyze(&self, text: &str) -> Result<Vec<String>> {
        let text = self.preprocess(text)?;
        let tokens: Vec<&str> = self
            .token_pattern
            .find_iter(&text)
            .map(|m| m.as_str())
            .filter(|token| !self.stop_words.contains(*token))
            .collect();

        let (min_n, max_n) = self.config.ngram_range;
        let mut terms = Vec::new();
        for n in min_n..=max_n.min(tokens.len()) {
            terms.extend(tokens.windows(n).map(|window| window.join(" ")));
        }
        Ok(terms)
    }

    /// Dense feature row for one document.
    pub fn transform(&self, text: &str) -> Result<Vec<f32>> {
        let mut row = vec![0f32; self.num_features];
        for term in self.analyze(text)? {
            if let Some(&column) = self.config.vocabulary.get(&term) {
                row[column] += 1.0;
            }
        }

        for value in row.iter_mut().filter(|v| **v > 0.0) {
            if self.config.binary {
                *value = 1.0;
            }
            if self.config.sublinear_tf {
                *value = 1.0 + value.ln();
            }
        }

        if let Some(idf) = &self.config.idf {
            row.iter_mut().zip(idf).for_each(|(value, weight)| *value *= weight);
        }

        let scale = match self.config.norm {
            Some(Norm::L1) => row.iter().map(|v| v.abs()).sum::<f32>(),
            Some(Norm::L2) => row.iter().map(|v| v * v).sum::<f32>().sqrt(),
            None => 0.0,
        };
        if scale > 0.0 {
            row.iter_mut().for_each(|value| *value /= scale);
        }

        Ok(row)
    }
}
