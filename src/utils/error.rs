use thiserror::Error;

use crate::session::OtpChannel;

#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Invalid image: {0}")]
    InvalidImage(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Text recognition failed: {0}")]
    Recognition(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VerifyError {
    /// Errors caused by what the caller sent rather than by the service.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            VerifyError::MissingField(_) | VerifyError::InvalidImage(_) | VerifyError::InvalidRequest(_)
        )
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Verification locked. Only one person allowed at a time.")]
    Locked,
    #[error("Invalid {0} number")]
    InvalidNumber(OtpChannel),
    #[error("Invalid OTP for {0}")]
    InvalidOtp(OtpChannel),
    #[error("Random number generator failure")]
    Rng,
}
