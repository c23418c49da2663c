use crate::error::Error;
use std::fmt;

pub const MISSING_TEXT_MESSAGE: &str = "ERROR: No se proporcionó texto para clasificar";

/// Every way a run can end other than printing a label. Each renders as the
/// tagged stderr line and maps to exit status 1.
#[derive(Debug)]
pub enum Failure {
    MissingText,
    ModelLoad(anyhow::Error),
    Prediction(anyhow::Error),
    Main(anyhow::Error),
}

impl Failure {
    pub fn model_load(err: Error) -> Self {
        Self::ModelLoad(err.into())
    }

    pub fn prediction(err: Error) -> Self {
        Self::Prediction(err.into())
    }

    pub fn exit_code(&self) -> u8 {
        1
    }

    /// The library error behind a load or prediction failure.
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::ModelLoad(err) | Self::Prediction(err) => err.downcast_ref(),
            Self::MissingText | Self::Main(_) => None,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingText => f.write_str(MISSING_TEXT_MESSAGE),
            Self::ModelLoad(err) => write!(f, "ERROR_MODEL_LOAD: {err:#}"),
            // Numbered causes, plus a backtrace under RUST_BACKTRACE.
            Self::Prediction(err) => write!(f, "ERROR_PREDICTION: {err:?}"),
            Self::Main(err) => write!(f, "ERROR_MAIN: {err:#}"),
        }
    }
}
