//! API middleware components

pub mod identity;
pub mod logging;
pub mod metrics;

pub use identity::identity_headers_middleware;
pub use logging::logging_middleware;
pub use metrics::metrics_middleware;
