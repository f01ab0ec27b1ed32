use std::fmt;

use crate::artifact_manager::ArtifactError;

/// Represents the different types of errors that can occur in the prediction pipeline.
#[derive(Debug)]
pub enum ClassifierError {
    /// Invalid request input, e.g. an empty headline or description.
    /// Raised at the request boundary before any normalization runs.
    ValidationError(String),
    /// The encoders and the model disagree, e.g. a feature-vector width
    /// that does not match the width the model was trained on
    ConfigurationError(String),
    /// A persisted artifact is missing, unreadable or corrupt
    ArtifactError(ArtifactError),
    /// Error occurred during the build phase
    BuildError(String),
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            Self::ConfigurationError(msg) => write!(f, "Configuration error: {}", msg),
            Self::ArtifactError(err) => write!(f, "Artifact error: {}", err),
            Self::BuildError(msg) => write!(f, "Build error: {}", msg),
        }
    }
}

impl std::error::Error for ClassifierError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ArtifactError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ArtifactError> for ClassifierError {
    fn from(err: ArtifactError) -> Self {
        ClassifierError::ArtifactError(err)
    }
}

impl ClassifierError {
    /// Returns true for errors the caller can recover from by fixing its input.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::ValidationError(_))
    }
}
