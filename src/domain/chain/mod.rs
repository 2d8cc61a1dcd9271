//! Chain domain - calls that fan out to peer demo services before answering

mod caller;
mod entity;
mod headers;
mod orchestrator;

pub use caller::{PeerReply, RemoteCaller};
pub use entity::{ChainRequest, ChainResult, ChainVariant};
pub use headers::ForwardedHeaders;
pub use orchestrator::ChainOrchestrator;

#[cfg(test)]
pub use caller::MockRemoteCaller;
