use reqwest::StatusCode;
use thiserror::Error;

/// Failure cases surfaced by the API client.
///
/// Division-by-zero on rates is deliberately absent: zero-enrollment courses
/// are valid data, not errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (DNS, connect, read, TLS).
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API rejected the key (HTTP 401/403).
    #[error("authentication rejected with status {status}: missing or invalid API key")]
    Auth { status: StatusCode },

    /// Any other non-success status, with the body the API returned.
    #[error("API returned status {status}: {body}")]
    Http { status: StatusCode, body: String },

    /// The body was not JSON, or was missing a required field such as
    /// `meta`, `courses`, or `enrollments`.
    #[error("malformed response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The composed request URL did not parse. Points at a bad base URL.
    #[error("invalid request url `{url}`: {message}")]
    InvalidUrl { url: String, message: String },
}
