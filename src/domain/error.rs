use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Chain call to {peer} failed: {message}")]
    Downstream {
        peer: String,
        status: Option<u16>,
        message: String,
    },

    #[error("Template error: {message}")]
    Template { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// A peer could not be reached or did not answer at all
    pub fn unreachable(peer: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Downstream {
            peer: peer.into(),
            status: None,
            message: message.into(),
        }
    }

    /// A peer answered with a non-success status
    pub fn downstream(peer: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::Downstream {
            peer: peer.into(),
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn template(message: impl Into<String>) -> Self {
        Self::Template {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn is_downstream(&self) -> bool {
        matches!(self, Self::Downstream { .. })
    }
}
