use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error on {}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("serialization error in {}", .path.display())]
    Serialization {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("tokenizer error: {0}")]
    Tokenizer(tokenizers::Error),

    #[error("candle error")]
    Candle(#[from] candle_core::Error),

    #[error("invalid token pattern")]
    Pattern(#[from] regex::Error),

    #[error("invalid artifact {}: {reason}", .path.display())]
    InvalidArtifact { path: PathBuf, reason: String },

    #[error("vectorizer produces {vectorizer} features but the model expects {model}")]
    DimensionMismatch { vectorizer: usize, model: usize },

    #[error("model predicted class {0} which has no label")]
    UnknownLabel(usize),

    #[error("model returned no decision values")]
    NoScores,
}

// tokenizers::Error is a boxed trait object, which cannot be a thiserror source.
impl From<tokenizers::Error> for Error {
    fn from(err: tokenizers::Error) -> Self {
        Self::Tokenizer(err)
    }
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn serialization(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Serialization {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidArtifact {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
