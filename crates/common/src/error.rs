//! Error types for Lifeline.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LifelineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("Responder {0} is not available for assignment")]
    ResponderUnavailable(String),

    #[error("No AI provider configured: {0}")]
    ProviderUnavailable(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LifelineError {
    pub fn incident_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "Incident",
            id: id.into(),
        }
    }

    pub fn responder_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "Responder",
            id: id.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LifelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_entity() {
        let err = LifelineError::incident_not_found("INC-042");
        assert_eq!(err.to_string(), "Incident INC-042 not found");

        let err = LifelineError::responder_not_found("RSP-007");
        assert_eq!(err.to_string(), "Responder RSP-007 not found");
    }

    #[test]
    fn responder_unavailable_message() {
        let err = LifelineError::ResponderUnavailable("RSP-001".into());
        assert!(err.to_string().contains("RSP-001"));
        assert!(err.to_string().contains("not available"));
    }
}
