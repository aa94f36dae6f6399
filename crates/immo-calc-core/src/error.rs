use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImmoCalcError {
    #[error("Insufficient input for {calculator}: {reason}")]
    InsufficientInput { calculator: String, reason: String },

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl ImmoCalcError {
    pub(crate) fn insufficient(calculator: &str, reason: &str) -> Self {
        ImmoCalcError::InsufficientInput {
            calculator: calculator.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for ImmoCalcError {
    fn from(e: serde_json::Error) -> Self {
        ImmoCalcError::SerializationError(e.to_string())
    }
}
