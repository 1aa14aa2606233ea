//! Error types for the Sonora server client.

use sonora_core::RadioError;
use thiserror::Error;

/// Errors that can occur when talking to the radio backend.
#[derive(Error, Debug)]
pub enum ServerClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with an `{error}` body
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Non-2xx status without an `{error}` body (proxy pages, crashes)
    #[error("Unexpected HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// No valid login session (missing or timed out)
    #[error("Authentication required")]
    AuthRequired,

    /// Login rejected
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Invalid server URL
    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse server response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The addressed resource does not exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Server is offline or unreachable
    #[error("Server unreachable: {0}")]
    ServerUnreachable(String),
}

/// Result type for server client operations.
pub type Result<T> = std::result::Result<T, ServerClientError>;

impl From<ServerClientError> for RadioError {
    fn from(err: ServerClientError) -> Self {
        match err {
            ServerClientError::ServerError { status, message } => RadioError::Rejected {
                status: Some(status),
                message,
            },
            ServerClientError::AuthRequired | ServerClientError::AuthFailed(_) => {
                RadioError::AuthRequired
            }
            ServerClientError::NotFound { entity, id } => RadioError::NotFound { entity, id },
            other => RadioError::transport(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_become_rejections() {
        let err: RadioError = ServerClientError::ServerError {
            status: 400,
            message: "could not find recordings to make a playlist".into(),
        }
        .into();

        assert!(err.is_rejection());
        assert!(matches!(err, RadioError::Rejected { status: Some(400), .. }));
    }

    #[test]
    fn parse_failures_are_transport_errors() {
        let err: RadioError = ServerClientError::ParseError("bad json".into()).into();
        assert!(matches!(err, RadioError::Transport(_)));
        assert!(!err.is_rejection());
    }

    #[test]
    fn bare_error_status_is_transport() {
        let err: RadioError = ServerClientError::HttpStatus {
            status: 502,
            body: "<html>502 Bad Gateway</html>".into(),
        }
        .into();
        assert!(matches!(err, RadioError::Transport(_)));
        assert!(!err.is_rejection());
    }

    #[test]
    fn auth_failures_require_login() {
        let err: RadioError = ServerClientError::AuthFailed("nope".into()).into();
        assert!(matches!(err, RadioError::AuthRequired));
    }
}
