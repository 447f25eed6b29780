use serde::Deserialize;
use thiserror::Error;

use crate::domain::page::PageShapeError;

/// How a backend call failed, as far as the list screens care.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Session missing or expired (HTTP 401/403).
    #[error("access denied (HTTP {status})")]
    Auth { status: u16 },

    /// Any other non-2xx answer.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// A 2xx answer with a body that is not what the screen expects.
    #[error("unexpected response: {0}")]
    Schema(String),
}

pub type FetchResult<T> = Result<T, FetchError>;

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Auth { status } | FetchError::Http { status, .. } => Some(*status),
            FetchError::Network(_) | FetchError::Schema(_) => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Schema(err.to_string())
        } else if err.is_timeout() {
            FetchError::Network(format!("request timed out: {err}"))
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

impl From<PageShapeError> for FetchError {
    fn from(err: PageShapeError) -> Self {
        FetchError::Schema(err.to_string())
    }
}

/// Failure to set up the backend client.
#[derive(Debug, Error)]
pub enum BackendSetupError {
    #[error("invalid backend url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    errors: Option<Vec<String>>,
    error: Option<String>,
}

/// Picks the message shown for a failed response.
///
/// The JSON body's `message`, `errors` (joined with `, `) or `error` field is
/// used, in that order; otherwise `HTTP <code> <reason>`.
pub fn error_message(status: u16, reason: &str, body: &str) -> String {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

    parsed
        .message
        .filter(|m| !m.trim().is_empty())
        .or_else(|| {
            parsed
                .errors
                .filter(|errors| !errors.is_empty())
                .map(|errors| errors.join(", "))
        })
        .or_else(|| parsed.error.filter(|e| !e.trim().is_empty()))
        .unwrap_or_else(|| format!("HTTP {status} {reason}").trim_end().to_string())
}

/// Maps a non-2xx response to a [`FetchError`].
pub fn classify(status: u16, reason: &str, body: &str) -> FetchError {
    match status {
        401 | 403 => FetchError::Auth { status },
        _ => FetchError::Http {
            status,
            message: error_message(status, reason, body),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_field_wins() {
        let body = r#"{"message": "Username already exists", "error": "Bad Request"}"#;
        assert_eq!(error_message(400, "Bad Request", body), "Username already exists");
    }

    #[test]
    fn errors_are_joined() {
        let body = r#"{"errors": ["name is blank", "num is too long"], "error": "Bad Request"}"#;
        assert_eq!(
            error_message(400, "Bad Request", body),
            "name is blank, num is too long"
        );
    }

    #[test]
    fn error_field_is_the_last_resort() {
        let body = r#"{"message": "", "errors": [], "error": "Conflict"}"#;
        assert_eq!(error_message(409, "Conflict", body), "Conflict");
    }

    #[test]
    fn non_json_body_falls_back_to_status() {
        assert_eq!(
            error_message(502, "Bad Gateway", "<html>oops</html>"),
            "HTTP 502 Bad Gateway"
        );
        assert_eq!(error_message(599, "", ""), "HTTP 599");
    }

    #[test]
    fn auth_statuses_are_classified_first() {
        assert_eq!(
            classify(401, "Unauthorized", r#"{"message": "expired"}"#),
            FetchError::Auth { status: 401 }
        );
        assert_eq!(classify(403, "Forbidden", ""), FetchError::Auth { status: 403 });
        assert_eq!(
            classify(500, "Internal Server Error", r#"{"message": "boom"}"#),
            FetchError::Http {
                status: 500,
                message: "boom".to_string()
            }
        );
    }
}
