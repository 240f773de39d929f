//! Vercel API error types.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Errors produced while talking to the Vercel REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, connection, TLS...).
    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-2xx status.
    #[error("API request failed: {status} - {message}")]
    Status { status: StatusCode, message: String },
}

impl ApiError {
    /// HTTP status of the response, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } => None,
        }
    }

    /// True when the remote resource does not exist.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

/// Walk an error chain looking for a 404 from the API.
pub fn is_not_found(error: &anyhow::Error) -> bool {
    error
        .chain()
        .filter_map(|cause| cause.downcast_ref::<ApiError>())
        .any(ApiError::is_not_found)
}

/// Vercel error envelope: `{"error": {"code": "...", "message": "..."}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Extract a human readable message from an error response body.
///
/// Falls back to the canonical reason phrase when the body is not the
/// usual error envelope.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    let fallback = || {
        status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string()
    };

    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => match (envelope.error.code, envelope.error.message) {
            (Some(code), Some(message)) => format!("{} ({})", message, code),
            (None, Some(message)) => message,
            (Some(code), None) => code,
            (None, None) => fallback(),
        },
        Err(_) => fallback(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    fn status_error(status: StatusCode) -> ApiError {
        ApiError::Status {
            status,
            message: "boom".to_string(),
        }
    }

    #[test]
    fn test_not_found_is_detected_through_context() {
        let err = Err::<(), _>(status_error(StatusCode::NOT_FOUND))
            .context("unable to fetch project domain from vercel")
            .unwrap_err();

        assert!(is_not_found(&err));
        assert_eq!(
            err.to_string(),
            "unable to fetch project domain from vercel"
        );
    }

    #[test]
    fn test_other_statuses_are_not_not_found() {
        let err = anyhow::Error::new(status_error(StatusCode::FORBIDDEN));
        assert!(!is_not_found(&err));

        let err = anyhow::anyhow!("something unrelated");
        assert!(!is_not_found(&err));
    }

    #[test]
    fn test_error_message_uses_envelope() {
        let body = r#"{"error":{"code":"not_found","message":"Domain not found"}}"#;
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, body),
            "Domain not found (not_found)"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_reason() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "<html>oops</html>"),
            "Bad Gateway"
        );
        assert_eq!(error_message(StatusCode::CONFLICT, r#"{"error":{}}"#), "Conflict");
    }
}
