//! reqwest-backed client for the sibling demo services

use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::{DomainError, ForwardedHeaders, PeerReply, RemoteCaller, StatusClass};
use crate::infrastructure::observability::record_peer_request;

/// Headers tied to the inbound connection; the outbound request sets its own
const CONNECTION_HEADERS: &[&str] = &[
    "host",
    "connection",
    "content-length",
    "transfer-encoding",
    "accept-encoding",
    "keep-alive",
    "upgrade",
];

/// HTTP client for one peer service
#[derive(Debug, Clone)]
pub struct HttpPeerClient {
    name: String,
    base_url: String,
    client: reqwest::Client,
}

impl HttpPeerClient {
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| {
                DomainError::internal(format!("Failed to build HTTP client for {}: {}", name, e))
            })?;

        Ok(Self {
            name,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(
        &self,
        operation: &'static str,
        path: &str,
        headers: Option<&ForwardedHeaders>,
    ) -> Result<PeerReply, DomainError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url);

        if let Some(headers) = headers {
            for (name, values) in headers.iter() {
                if is_connection_header(name) {
                    continue;
                }

                for value in values {
                    request = request.header(name, value.as_str());
                }
            }
        }

        debug!(peer = %self.name, operation, url = %url, "Calling peer");
        let start = Instant::now();

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                record_peer_request(&self.name, operation, false, start.elapsed());
                warn!(peer = %self.name, operation, error = %e, "Peer unreachable");
                return Err(DomainError::unreachable(
                    &self.name,
                    format!("Request to {} failed: {}", url, e),
                ));
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                record_peer_request(&self.name, operation, false, start.elapsed());
                warn!(peer = %self.name, operation, error = %e, "Failed to read peer response");
                return Err(DomainError::unreachable(
                    &self.name,
                    format!("Failed to read response from {}: {}", url, e),
                ));
            }
        };
        record_peer_request(&self.name, operation, status.is_success(), start.elapsed());

        if !status.is_success() {
            warn!(peer = %self.name, operation, status = %status.as_u16(), "Peer returned error status");
            return Err(DomainError::downstream(
                &self.name,
                status.as_u16(),
                format!("HTTP {} from {}: {}", status, url, body),
            ));
        }

        let reply = PeerReply::new(status.as_u16(), body);

        Ok(match status.canonical_reason() {
            Some(reason) => reply.with_reason(reason),
            None => reply,
        })
    }
}

fn is_connection_header(name: &str) -> bool {
    CONNECTION_HEADERS
        .iter()
        .any(|header| header.eq_ignore_ascii_case(name))
}

#[async_trait]
impl RemoteCaller for HttpPeerClient {
    async fn echo(&self, headers: &ForwardedHeaders) -> Result<String, DomainError> {
        Ok(self.get("echo", "/api/echo", Some(headers)).await?.body)
    }

    async fn echo_via_chain(&self, headers: &ForwardedHeaders) -> Result<String, DomainError> {
        Ok(self
            .get("echo_via_chain", "/api/chain/echo/one", Some(headers))
            .await?
            .body)
    }

    async fn status_forced(
        &self,
        headers: &ForwardedHeaders,
        class: StatusClass,
    ) -> Result<PeerReply, DomainError> {
        let path = format!("/api/status/{}", class);
        self.get("status_forced", &path, Some(headers)).await
    }

    async fn chain_one(
        &self,
        headers: &ForwardedHeaders,
        class: StatusClass,
    ) -> Result<PeerReply, DomainError> {
        let path = format!("/api/chain/{}/one", class);
        self.get("chain_one", &path, Some(headers)).await
    }

    async fn chain_four(
        &self,
        headers: &ForwardedHeaders,
        class: StatusClass,
    ) -> Result<PeerReply, DomainError> {
        let path = format!("/api/chain/{}/four", class);
        self.get("chain_four", &path, Some(headers)).await
    }

    async fn hello(&self) -> Result<String, DomainError> {
        Ok(self.get("hello", "/api/hello", None).await?.body)
    }
}
