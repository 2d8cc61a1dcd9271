//! Application state shared by every handler

use std::sync::Arc;

use crate::config::HtmlConfig;
use crate::domain::{AppIdentity, ChainOrchestrator, FileStore, RemoteCaller, StatusCodeResolver};
use crate::infrastructure::HtmlRenderer;

/// A peer checked by the readiness probe
#[derive(Clone)]
pub struct NamedPeer {
    pub name: String,
    pub caller: Arc<dyn RemoteCaller>,
}

impl NamedPeer {
    pub fn new(name: impl Into<String>, caller: Arc<dyn RemoteCaller>) -> Self {
        Self {
            name: name.into(),
            caller,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub identity: AppIdentity,
    pub resolver: StatusCodeResolver,
    pub orchestrator: Arc<ChainOrchestrator>,
    pub peers: Vec<NamedPeer>,
    pub doc_store: Arc<dyn FileStore>,
    pub image_store: Arc<dyn FileStore>,
    pub html: Arc<HtmlRenderer>,
    pub html_config: Arc<HtmlConfig>,
}

impl AppState {
    /// Wire the orchestrator to the yellow and white peers
    pub fn new(
        identity: AppIdentity,
        resolver: StatusCodeResolver,
        yellow: Arc<dyn RemoteCaller>,
        white: Arc<dyn RemoteCaller>,
        doc_store: Arc<dyn FileStore>,
        image_store: Arc<dyn FileStore>,
        html: HtmlRenderer,
        html_config: HtmlConfig,
    ) -> Self {
        let orchestrator = ChainOrchestrator::new(
            resolver,
            Arc::clone(&yellow),
            Arc::clone(&white),
            identity.hello(),
        );

        Self {
            identity,
            resolver,
            orchestrator: Arc::new(orchestrator),
            peers: vec![NamedPeer::new("yellow", yellow), NamedPeer::new("white", white)],
            doc_store,
            image_store,
            html: Arc::new(html),
            html_config: Arc::new(html_config),
        }
    }
}
