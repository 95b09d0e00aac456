use thiserror::Error;

/// Message returned to callers for any failure we do not want to describe.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Errors that can occur while generating an image.
///
/// `Display` keeps the full detail and is meant for logs. Use
/// [`Error::public_message`] for anything that goes back to a caller.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid prompt: {0}")]
    Validation(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Upstream error ({status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Error::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal(message.into())
    }

    /// HTTP status the caller should see for this error.
    ///
    /// Only 401, 429 and 503 are mirrored from the provider; every other
    /// upstream status collapses to 500.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            Error::Config(_) | Error::Internal(_) => 500,
            Error::Upstream { status, .. } => match status {
                401 | 429 | 503 => *status,
                _ => 500,
            },
        }
    }

    /// Message that is safe to hand back to the caller.
    pub fn public_message(&self) -> String {
        match self {
            Error::Validation(message) | Error::Upstream { message, .. } => message.clone(),
            Error::Config(_) => "Server is not configured to generate images".to_string(),
            Error::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Internal(format!("upstream request timed out: {err}"))
        } else {
            Error::Internal(format!("HTTP request failed: {err}"))
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Internal(format!("malformed provider response: {err}"))
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Error::Internal(format!("image payload is not valid base64: {err}"))
    }
}
