//! Error types for XL Deploy client operations.
//!
//! Transport-level failures are defined in [`crate::transport`] and folded into
//! [`XldError`] here, with HTTP 404 responses surfacing as [`XldError::NotFound`].

use crate::transport::{RequestBuildError, TransportError};

/// Main error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum XldError {
    /// CI id outside the Environments, Infrastructure and Applications roots
    #[error("Invalid CI id '{id}': must contain Environments, Infrastructure or Applications")]
    InvalidIdentifier { id: String },

    /// The server answered 404, or a precondition lookup found nothing
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// Creation collided with an existing resource
    #[error("Already exists: {resource}")]
    AlreadyExists { resource: String },

    /// An existence probe failed and the configured policy refuses to guess
    #[error("Could not determine whether {resource} exists: {source}")]
    ExistenceUnknown {
        resource: String,
        #[source]
        source: Box<XldError>,
    },

    /// Network, HTTP status or response decoding failure
    #[error("Transport error: {0}")]
    Transport(#[source] TransportError),

    /// The outbound request could not be constructed
    #[error("Request build error: {0}")]
    RequestBuild(#[from] RequestBuildError),

    /// Invalid client configuration
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl XldError {
    /// Create an invalid identifier error
    pub fn invalid_identifier(id: impl Into<String>) -> Self {
        Self::InvalidIdentifier { id: id.into() }
    }

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an already exists error
    pub fn already_exists(resource: impl Into<String>) -> Self {
        Self::AlreadyExists {
            resource: resource.into(),
        }
    }

    /// Wrap the failure of an existence probe
    pub fn existence_unknown(resource: impl Into<String>, source: XldError) -> Self {
        Self::ExistenceUnknown {
            resource: resource.into(),
            source: Box::new(source),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether this error means the remote resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<TransportError> for XldError {
    fn from(error: TransportError) -> Self {
        if error.is_not_found() {
            return Self::NotFound {
                resource: error.path().to_string(),
            };
        }
        Self::Transport(error)
    }
}

// Result type alias for convenience
pub type XldResult<T> = Result<T, XldError>;
