//! Error type shared by the window and emotional stores.

use crate::models::EccStage;

/// Error returned when a store rejects an operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Input failed validation (out-of-range intensity, blank label).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No emotional entry carries the requested id.
    #[error("emotional entry '{0}' not found")]
    NotFound(String),

    /// The requested ECC stage is not the current stage or the one after it.
    #[error("entry '{entry_id}' cannot move from {from} to {to}")]
    InvalidTransition {
        entry_id: String,
        from: EccStage,
        to: EccStage,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_display() {
        let err = StoreError::InvalidArgument("intensity 120 is outside 0..=100".into());
        assert_eq!(
            err.to_string(),
            "invalid argument: intensity 120 is outside 0..=100"
        );
    }

    #[test]
    fn not_found_display() {
        let err = StoreError::NotFound("1700000000000-000000".into());
        assert_eq!(
            err.to_string(),
            "emotional entry '1700000000000-000000' not found"
        );
    }

    #[test]
    fn invalid_transition_names_both_stages() {
        let err = StoreError::InvalidTransition {
            entry_id: "a".into(),
            from: EccStage::Process,
            to: EccStage::Classify,
        };
        assert_eq!(err.to_string(), "entry 'a' cannot move from process to classify");
    }

    const _: () = {
        #[allow(dead_code)]
        fn assert_send_sync<T: Send + Sync>() {}

        #[allow(dead_code)]
        fn check() {
            assert_send_sync::<StoreError>();
        }
    };
}
