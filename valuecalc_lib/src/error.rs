//! Error types for the library layer.

use std::fmt;

use crate::retriever::RetrievalError;

/// Request-fatal errors. Method-level problems (missing inputs, zero
/// denominators) are not errors; they surface as
/// [`crate::valuation::SkipReason`]s.
#[derive(Debug)]
pub enum ValuecalcError {
    /// User-provided input failed validation. No network call was made.
    InvalidInput(String),
    /// The provider lookup failed; no partial record is available.
    Retrieval(RetrievalError),
    /// Configuration from the environment or flags was unusable.
    Config(String),
}

impl fmt::Display for ValuecalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Retrieval(e) => write!(f, "Retrieval error: {}", e),
            Self::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for ValuecalcError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Retrieval(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RetrievalError> for ValuecalcError {
    fn from(e: RetrievalError) -> Self {
        Self::Retrieval(e)
    }
}

impl ValuecalcError {
    /// The one-line message shown to the user in place of any output.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidInput(_) => "Please enter a valid stock ticker!".to_string(),
            Self::Retrieval(_) => {
                "Error fetching data. Please check the ticker symbol.".to_string()
            }
            Self::Config(msg) => format!("Configuration error: {}", msg),
        }
    }
}
