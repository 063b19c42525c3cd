//! Errors surfaced by the URL info endpoint

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use super::json::json_line;
use crate::domain::UrlError;

/// Request failures, rendered as `{"error": "<message>"}`
///
/// Store and cache failures never appear here; the reputation lookup absorbs
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlInfoError {
    /// Path parameters missing or malformed percent-encoding in the path
    #[error("{0}")]
    Decode(String),

    /// Malformed query string
    #[error("{0}")]
    QueryParse(String),

    /// The reconstructed URL is not a well-formed absolute URL
    #[error("Invalid URL")]
    Validation,

    /// The response body could not be encoded
    #[error("{0}")]
    Serialization(String),
}

impl UrlInfoError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Decode(_) | Self::QueryParse(_) | Self::Validation => StatusCode::BAD_REQUEST,
            Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<UrlError> for UrlInfoError {
    fn from(err: UrlError) -> Self {
        match err {
            UrlError::Decode { .. } => Self::Decode(err.to_string()),
            UrlError::Invalid => Self::Validation,
        }
    }
}

impl IntoResponse for UrlInfoError {
    fn into_response(self) -> Response {
        let body = format!("{}\n", json!({ "error": self.to_string() }));
        json_line(self.status(), body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            UrlInfoError::Decode("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            UrlInfoError::QueryParse("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(UrlInfoError::Validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            UrlInfoError::Serialization("bad".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_url_error_conversion() {
        let err: UrlInfoError = UrlError::Decode {
            escape: "%2r".to_string(),
        }
        .into();
        assert_eq!(
            err,
            UrlInfoError::Decode(r#"invalid URL escape "%2r""#.to_string())
        );

        let err: UrlInfoError = UrlError::Invalid.into();
        assert_eq!(err, UrlInfoError::Validation);
        assert_eq!(err.to_string(), "Invalid URL");
    }

    #[tokio::test]
    async fn test_error_body() {
        let response = UrlInfoError::Validation.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"{\"error\":\"Invalid URL\"}\n");
    }
}
