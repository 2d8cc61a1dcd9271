//! Infrastructure layer - External service implementations

pub mod html;
pub mod identity;
pub mod load;
pub mod logging;
pub mod observability;
pub mod peer;
pub mod storage;

pub use html::HtmlRenderer;
pub use identity::resolve_identity;
pub use load::{start_cpu_load, start_memory_load};
pub use peer::HttpPeerClient;
pub use storage::DirectoryFileStore;
