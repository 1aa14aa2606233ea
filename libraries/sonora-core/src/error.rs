/// Core error types for Sonora
use thiserror::Error;

/// Result type alias using `RadioError`
pub type Result<T> = std::result::Result<T, RadioError>;

/// Core error type for Sonora
#[derive(Error, Debug)]
pub enum RadioError {
    /// A rule failed validation before compilation
    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    /// The request never produced a usable response
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with an error-shaped body or a non-2xx status
    #[error("Backend rejected request: {message}")]
    Rejected {
        status: Option<u16>,
        message: String,
    },

    /// Credentials are missing or the backend session timed out
    #[error("Authentication required")]
    AuthRequired,

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The draft was already committed and is read-only
    #[error("Draft has been committed and can no longer be edited")]
    DraftLocked,

    /// Position outside the draft
    #[error("Index {index} out of bounds for draft of {len} recordings")]
    IndexOutOfBounds { index: usize, len: usize },

    /// No retrieval has produced a draft yet
    #[error("No playlist draft available")]
    NoDraft,

    /// The requested operation is not allowed in the current state
    #[error("Not eligible: {0}")]
    NotEligible(String),
}

impl RadioError {
    /// Create an invalid rule error
    pub fn invalid_rule(msg: impl Into<String>) -> Self {
        Self::InvalidRule(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a rejection without a known status
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self::Rejected {
            status: None,
            message: msg.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a not eligible error
    pub fn not_eligible(msg: impl Into<String>) -> Self {
        Self::NotEligible(msg.into())
    }

    /// Whether the backend itself refused the request (as opposed to the
    /// request never reaching it).
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}
