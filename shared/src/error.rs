use thiserror::Error;

use crate::form::FormErrors;

/// Why a membership request did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Could not reach the server: {0}")]
    Network(String),
    #[error("Too many requests, please try again later")]
    RateLimited,
    #[error("Please correct the highlighted fields")]
    Invalid(FormErrors),
    #[error("Request failed ({status}): {message}")]
    Rejected { status: u16, message: String },
}
