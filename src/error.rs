//! Failure types shared by the API client and the forms.
//!
//! Every failure is scoped to the screen that triggered it; nothing here
//! retries. Views map an [`ApiError`] to one of three presentations through
//! [`ApiError::kind`].

use thiserror::Error;

pub const GENERIC_REVIEW_FAILURE: &str = "Failed to submit review. Please try again.";

/// A failed call to the backend.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never completed or its body could not be read.
    #[error("network error: {0}")]
    Transport(String),

    /// The backend answered with a non-success status.
    #[error("request failed with status {status}")]
    Status { status: u16, message: Option<String> },

    /// A success response whose body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// How a screen should present an [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    AccessDenied,
    Other,
}

impl ApiError {
    pub fn from_status(status: u16, body: &str) -> Self {
        ApiError::Status {
            status,
            message: server_message(body),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self.status() {
            Some(404) => ErrorKind::NotFound,
            Some(401) | Some(403) => ErrorKind::AccessDenied,
            _ => ErrorKind::Other,
        }
    }

    /// Server text verbatim when present, then the transport error, then `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status { message: Some(message), .. } => message.clone(),
            ApiError::Transport(detail) if !detail.trim().is_empty() => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        match err {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Transport(other.to_string()),
        }
    }
}

/// Extracts a human-readable message from an error body: a JSON object's
/// `message`, a JSON string, or plain text.
pub fn server_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::String(text)) => Some(text).filter(|t| !t.trim().is_empty()),
        Ok(serde_json::Value::Object(fields)) => fields
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .filter(|m| !m.trim().is_empty()),
        Ok(_) => None,
        Err(_) => Some(body.to_string()),
    }
}

/// Review form input rejected before anything is sent.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a rating")]
    MissingRating,
    #[error("Rating must be between 1 and 5")]
    RatingOutOfRange,
    #[error("Please enter your name or select anonymous")]
    MissingName,
    #[error("Please enter your email or select anonymous")]
    MissingEmail,
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("a submission is already in progress")]
    AlreadySubmitting,

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SubmitError {
    /// Text for the form's error banner.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Invalid(e) => e.to_string(),
            SubmitError::AlreadySubmitting => String::new(),
            SubmitError::Api(e) => e.user_message(GENERIC_REVIEW_FAILURE),
        }
    }
}
