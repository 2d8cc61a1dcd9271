//! Domain layer - Status resolution, chain orchestration and core types

pub mod chain;
pub mod echo;
pub mod error;
pub mod identity;
pub mod status;
pub mod storage;

pub use chain::{
    ChainOrchestrator, ChainRequest, ChainResult, ChainVariant, ForwardedHeaders, PeerReply,
    RemoteCaller,
};
pub use echo::EchoRequest;
pub use error::DomainError;
pub use identity::AppIdentity;
pub use status::{StatusClass, StatusClassParseError, StatusCodeResolver, StatusCodeTable};
pub use storage::{FileStore, StoredFile};
