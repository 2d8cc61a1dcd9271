//! Capability to call peer demo services

use std::fmt;

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::headers::ForwardedHeaders;
use crate::domain::status::StatusClass;
use crate::domain::DomainError;

/// Status and body returned by a peer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerReply {
    pub status: u16,
    pub reason: Option<String>,
    pub body: String,
}

impl PeerReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            reason: None,
            body: body.into(),
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

impl fmt::Display for PeerReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "<{} {}, {}>", self.status, reason, self.body),
            None => write!(f, "<{}, {}>", self.status, self.body),
        }
    }
}

/// Operations a peer service exposes to chain calls.
///
/// Implementations return an error for unreachable peers and for any
/// non-success status.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RemoteCaller: Send + Sync {
    /// Peer echoes the request it received
    async fn echo(&self, headers: &ForwardedHeaders) -> Result<String, DomainError>;

    /// Peer echoes after calling its own downstream peer
    async fn echo_via_chain(&self, headers: &ForwardedHeaders) -> Result<String, DomainError>;

    /// Peer answers with a status drawn from `class`
    async fn status_forced(
        &self,
        headers: &ForwardedHeaders,
        class: StatusClass,
    ) -> Result<PeerReply, DomainError>;

    /// Peer runs its own chain variant one
    async fn chain_one(
        &self,
        headers: &ForwardedHeaders,
        class: StatusClass,
    ) -> Result<PeerReply, DomainError>;

    /// Peer runs its own chain variant four
    async fn chain_four(
        &self,
        headers: &ForwardedHeaders,
        class: StatusClass,
    ) -> Result<PeerReply, DomainError>;

    /// Peer identity string; no headers are forwarded
    async fn hello(&self) -> Result<String, DomainError>;
}
