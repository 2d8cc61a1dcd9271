//! devops-blue
//!
//! Demo microservice for a DevOps / Kubernetes course:
//! - Diagnostic endpoints (echo, delays, forced status codes, fake load)
//! - Chain calls to the yellow and white peer services
//! - File upload / download and ConfigMap / Secret HTML pages

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use api::state::AppState;
use domain::{RemoteCaller, StatusCodeResolver, StatusCodeTable};
use infrastructure::{resolve_identity, DirectoryFileStore, HtmlRenderer, HttpPeerClient};
use tracing::info;

const DOC_DIR: &str = "doc";
const IMAGE_DIR: &str = "image";

/// Build the application state from configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let identity = resolve_identity(&config.app);
    info!(
        version = %identity.version,
        identifier = %identity.identifier,
        pod = %identity.pod_name,
        "Resolved instance identity"
    );

    let timeout = Duration::from_secs(config.peers.timeout_secs);
    let yellow: Arc<dyn RemoteCaller> =
        Arc::new(HttpPeerClient::new("yellow", &config.peers.yellow_url, timeout)?);
    let white: Arc<dyn RemoteCaller> =
        Arc::new(HttpPeerClient::new("white", &config.peers.white_url, timeout)?);
    info!(
        yellow = %config.peers.yellow_url,
        white = %config.peers.white_url,
        "Configured peer services"
    );

    let root = Path::new(&config.storage.root);
    let doc_store = Arc::new(DirectoryFileStore::open(root.join(DOC_DIR)).await?);
    let image_store = Arc::new(DirectoryFileStore::open(root.join(IMAGE_DIR)).await?);
    info!(root = %root.display(), "File storage ready");

    let html = HtmlRenderer::new(&config.app.name)?;

    Ok(AppState::new(
        identity,
        StatusCodeResolver::new(StatusCodeTable::new()),
        yellow,
        white,
        doc_store,
        image_store,
        html,
        config.html.clone(),
    ))
}
