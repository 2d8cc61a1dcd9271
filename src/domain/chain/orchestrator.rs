//! Chain orchestrator - composes peer calls with a locally resolved status
//!
//! The outer status is always decided here. Peer replies only feed the
//! narrative, so a parent can answer 4xx while its children answered 2xx and
//! the other way round. Peer failures propagate unchanged: no retry and no
//! partial result.

use std::sync::Arc;

use tracing::{info, instrument};

use super::caller::RemoteCaller;
use super::entity::{ChainRequest, ChainResult, ChainVariant};
use super::headers::ForwardedHeaders;
use crate::domain::status::{StatusClass, StatusCodeResolver};
use crate::domain::DomainError;

const SINGLE_HOP_HEADLINE: &str = "Blue call yellow. Final response is :";
const FAN_OUT_HEADLINE: &str = "Blue call yellow, and blue call white. Final response is :";
const TWO_HOP_HEADLINE: &str = "Blue call yellow, and yellow call white. Final response is :";
const ECHO_ONE_HEADLINE: &str = "Blue call yellow.echo. Final result is :";
const ECHO_TWO_HEADLINE: &str =
    "Blue call yellow.echo and yellow call white.echo. Final result is :";

/// Orchestrates chain calls to the yellow and white peers
pub struct ChainOrchestrator {
    resolver: StatusCodeResolver,
    yellow: Arc<dyn RemoteCaller>,
    white: Arc<dyn RemoteCaller>,
    local_hello: String,
}

impl ChainOrchestrator {
    pub fn new(
        resolver: StatusCodeResolver,
        yellow: Arc<dyn RemoteCaller>,
        white: Arc<dyn RemoteCaller>,
        local_hello: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            yellow,
            white,
            local_hello: local_hello.into(),
        }
    }

    /// Local echo followed by the yellow peer's echo, always 200
    #[instrument(skip_all)]
    pub async fn echo_one(
        &self,
        headers: ForwardedHeaders,
        local_echo: &str,
    ) -> Result<ChainResult, DomainError> {
        info!("Calling chain/echo/one");
        let yellow = self.yellow.echo(&headers).await?;

        Ok(ChainResult {
            status: 200,
            body: narrate(
                ECHO_ONE_HEADLINE,
                &[("Blue", local_echo), ("Yellow", yellow.as_str())],
            ),
        })
    }

    /// Local echo followed by the yellow peer's chained echo, always 200
    #[instrument(skip_all)]
    pub async fn echo_two(
        &self,
        headers: ForwardedHeaders,
        local_echo: &str,
    ) -> Result<ChainResult, DomainError> {
        info!("Calling chain/echo/two");
        let yellow = self.yellow.echo_via_chain(&headers).await?;

        Ok(ChainResult {
            status: 200,
            body: narrate(
                ECHO_TWO_HEADLINE,
                &[("Blue", local_echo), ("Yellow", yellow.as_str())],
            ),
        })
    }

    /// Run one of the status-forcing variants
    #[instrument(skip(self, request), fields(variant = %variant, class = %request.class))]
    pub async fn run(
        &self,
        variant: ChainVariant,
        request: ChainRequest,
    ) -> Result<ChainResult, DomainError> {
        info!("Calling chain/{}", variant);
        let ChainRequest { headers, class } = request;
        let status = self.resolver.resolve(variant.outer_class(class));
        let peer_class = variant.peer_class(class);
        let blue = self.local_hello.as_str();

        let body = match variant {
            ChainVariant::One | ChainVariant::Four => {
                let yellow = self.yellow.status_forced(&headers, peer_class).await?.to_string();
                narrate(SINGLE_HOP_HEADLINE, &[("Blue", blue), ("Yellow", yellow.as_str())])
            }
            ChainVariant::Two => {
                let yellow = self.yellow.status_forced(&headers, peer_class).await?.to_string();
                let white = self
                    .white
                    .status_forced(&ForwardedHeaders::new(), StatusClass::Success)
                    .await?
                    .to_string();
                narrate(
                    FAN_OUT_HEADLINE,
                    &[
                        ("Blue", blue),
                        ("Yellow", yellow.as_str()),
                        ("White", white.as_str()),
                    ],
                )
            }
            ChainVariant::Three | ChainVariant::Five => {
                let yellow = self.yellow.chain_one(&headers, peer_class).await?.to_string();
                narrate(TWO_HOP_HEADLINE, &[("Blue", blue), ("Yellow", yellow.as_str())])
            }
        };

        Ok(ChainResult { status, body })
    }
}

fn narrate(headline: &str, hops: &[(&str, &str)]) -> String {
    let mut lines = Vec::with_capacity(hops.len() + 1);
    lines.push(headline.to_string());

    for (service, text) in hops {
        lines.push(format!("  - {} : {}", service, text));
    }

    lines.join("\n")
}
