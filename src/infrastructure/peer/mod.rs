//! Peer service clients

mod http_client;

pub use http_client::HttpPeerClient;
