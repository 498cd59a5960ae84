use marketdesk_api::ApiError;
use marketdesk_core::ValidationResult;
use thiserror::Error;

/// Why a submission attempt did not go through. None of these are fatal;
/// the session keeps the user's input so they can fix it and retry.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("invalid fields: {0}")]
    Validation(ValidationResult),

    #[error("a submission is already in flight")]
    SubmitInFlight,

    #[error("no submission is in flight")]
    NotSubmitting,

    #[error("submission failed: {0}")]
    Transport(#[from] ApiError),
}
