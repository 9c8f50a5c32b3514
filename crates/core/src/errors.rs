use thiserror::Error;

use crate::artifact::ArtifactError;

/// Structural failures inside the pipeline. Per-field parse failures never
/// appear here; extraction absorbs them with defaults.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("catalog is empty; a zero-length scoring target is meaningless")]
    EmptyCatalog,
    #[error("model scored {scores} items but the catalog holds {products}")]
    ScoreWidthMismatch { scores: usize, products: usize },
    #[error("model expects a {expected}-wide input but the schema produces {actual}")]
    InputWidthMismatch { expected: usize, actual: usize },
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

/// Failures surfaced to the serving layer. An `Artifact` variant is the
/// explicit "not ready" condition: the pipeline must not answer with an
/// empty or zero-filled result in its place.
#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("recommendation artifacts unavailable: {0}")]
    Artifact(#[from] ArtifactError),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// True when serving cannot proceed until an operator fixes artifacts or
    /// configuration, as opposed to a per-request structural fault.
    pub fn is_not_ready(&self) -> bool {
        matches!(self, Self::Artifact(_) | Self::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_failures_are_not_ready() {
        let error = ApplicationError::Artifact(ArtifactError::Validation("bad shape".to_string()));
        assert!(error.is_not_ready());
    }

    #[test]
    fn domain_failures_are_per_request() {
        let error = ApplicationError::Domain(DomainError::EmptyCatalog);
        assert!(!error.is_not_ready());
    }

    #[test]
    fn width_mismatch_message_names_both_sides() {
        let message = DomainError::ScoreWidthMismatch { scores: 4, products: 6 }.to_string();
        assert!(message.contains('4'));
        assert!(message.contains('6'));
    }
}
