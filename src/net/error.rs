//! Completion failure taxonomy.
//!
//! ERROR HANDLING
//! ==============
//! Every failure of a completion call lands in one of these variants. The
//! chat session converts them into an assistant turn via
//! [`CompletionError::user_message`]; nothing propagates to the host page.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

pub const CREDENTIAL_INVALID_MESSAGE: &str = "Invalid API key. Please check your API key and try again.";
pub const MODEL_INVALID_MESSAGE: &str = "Invalid model name. Please check the model name and try again.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Sorry - Something went wrong. Please try again!";

/// Errors produced by a single completion attempt.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompletionError {
    /// The prompt was blank; no request was issued.
    #[error("empty prompt")]
    EmptyInput,

    /// The backend rejected the request (HTTP 400), which it does for bad keys.
    #[error("credential rejected by backend")]
    CredentialInvalid,

    /// The backend does not know the requested model (HTTP 404).
    #[error("model not found: {0}")]
    ModelInvalid(String),

    /// 2xx status but the answer path was missing or the body was not JSON.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Any other HTTP status, network failure, or unexpected error.
    #[error("request failed: {0}")]
    GenericFailure(String),
}

impl CompletionError {
    /// Map a non-success HTTP status to its error kind.
    #[must_use]
    pub fn from_status(status: u16, model: &str) -> Self {
        match status {
            400 => Self::CredentialInvalid,
            404 => Self::ModelInvalid(model.to_owned()),
            other => Self::GenericFailure(format!("status {other}")),
        }
    }

    /// Human-readable text shown as the assistant turn for this failure.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::CredentialInvalid => CREDENTIAL_INVALID_MESSAGE,
            Self::ModelInvalid(_) => MODEL_INVALID_MESSAGE,
            Self::EmptyInput | Self::MalformedResponse(_) | Self::GenericFailure(_) => GENERIC_FAILURE_MESSAGE,
        }
    }
}
