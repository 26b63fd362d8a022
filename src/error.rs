use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

static INTERNAL_MSG: &'static str = "Internal Server Error";

/// Request-level failures of the login flow.
///
/// Parameter and credential errors are shown to the caller as-is;
/// everything 500-class collapses to a generic message and only the log
/// keeps the detail.
#[derive(Debug, Error)]
pub enum SsoError {
    #[error("Missing required parameters: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    /// `detail` is for logs only.
    #[error("Authentication failed")]
    AuthenticationFailed { detail: String },

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("signing error: {0}")]
    SigningError(String),

    #[error("dispatch error: {0}")]
    Dispatch(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl SsoError {
    pub fn status(&self) -> StatusCode {
        match self {
            SsoError::MissingParameter(_) | SsoError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            SsoError::InvalidCredentials
            | SsoError::AuthenticationFailed { .. }
            | SsoError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            SsoError::SigningError(_) | SsoError::Dispatch(_) | SsoError::Configuration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Short label used for the `reason` metric dimension.
    pub fn reason(&self) -> &'static str {
        match self {
            SsoError::MissingParameter(_) => "missing_parameter",
            SsoError::InvalidParameter(_) => "invalid_parameter",
            SsoError::InvalidCredentials => "invalid_credentials",
            SsoError::AuthenticationFailed { .. } => "authentication_failed",
            SsoError::Unauthorized(_) => "unauthorized",
            SsoError::SigningError(_) => "signing_error",
            SsoError::Dispatch(_) => "dispatch_error",
            SsoError::Configuration(_) => "configuration_error",
        }
    }
}

impl IntoResponse for SsoError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!("request failed: {}", self);
            INTERNAL_MSG.to_owned()
        } else {
            self.to_string()
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Outcome of checking a bearer token.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerifyError {
    #[error("token expired")]
    Expired,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("malformed token: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, SsoError>;
