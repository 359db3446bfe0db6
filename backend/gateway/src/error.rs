//! Failure of a single `process-image` request and its HTTP rendering.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use paperforge_core::{ProcessImageResponse, ProviderError};

/// Prefix of every error text returned to the client.
pub const ERROR_PREFIX: &str = "Error processing image: ";

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("could not read upload: {0}")]
    Upload(String),

    #[error("missing form field `{0}`")]
    MissingField(&'static str),

    #[error("no API key configured for provider {0}")]
    NotConfigured(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Body returned in strict mode.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub text: String,
    pub error: String,
}

impl ProcessError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Upload(_) | Self::MissingField(_) => StatusCode::BAD_REQUEST,
            Self::NotConfigured(_) | Self::Provider(ProviderError::MissingCredential { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::Provider(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Upload(_) => "UPLOAD_ERROR",
            Self::MissingField(_) => "MISSING_FIELD",
            Self::NotConfigured(_) | Self::Provider(ProviderError::MissingCredential { .. }) => {
                "PROVIDER_NOT_CONFIGURED"
            }
            Self::Provider(_) => "PROVIDER_ERROR",
        }
    }

    /// Text placed in the `text` field.
    pub fn client_text(&self) -> String {
        format!("{ERROR_PREFIX}{self}")
    }

    /// Render the failure. The default mode keeps HTTP 200 and the single
    /// `text` key; strict mode adds `error` and a real status code.
    pub fn into_reply(self, strict: bool) -> Response {
        if !strict {
            let body = ProcessImageResponse {
                text: self.client_text(),
            };
            return (StatusCode::OK, Json(body)).into_response();
        }

        let body = ErrorBody {
            text: self.client_text(),
            error: self.error_code().to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
