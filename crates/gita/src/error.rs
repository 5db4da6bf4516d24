use std::path::PathBuf;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gita_gemini::GeminiError;
use gita_store::StoreError;

/// Request failures of the verse API. The `Display` text is the Telugu
/// message returned to clients as `{"error": ...}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("దయచేసి 'chapter' మరియు 'verse' పారామితులను అందించండి.")]
    MissingParameters,

    #[error("అధ్యాయం మరియు శ్లోకం సంఖ్యలు ధనాత్మకంగా ఉండాలి.")]
    NotPositive,

    #[error("అధ్యాయం {chapter}, శ్లోకం {verse} డేటాబేస్ లేదా బాహ్య మూలం నుండి పొందలేకపోయింది.")]
    Unavailable { chapter: String, verse: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingParameters | Self::NotPositive => StatusCode::BAD_REQUEST,
            Self::Unavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

/// Failures while assembling [`crate::AppState`].
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Gemini(#[from] GeminiError),
}

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error("failed to bind {addr}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("TLS needs both a certificate and a key; only one is configured")]
    TlsIncomplete,

    #[error("failed to load TLS certificate {cert} and key {key}")]
    Tls {
        cert: PathBuf,
        key: PathBuf,
        source: std::io::Error,
    },

    #[error("server error")]
    Io(#[source] std::io::Error),
}
