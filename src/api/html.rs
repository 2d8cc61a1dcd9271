//! HTML pages showing ConfigMap / Secret values

use axum::{extract::State, response::Html, routing::get, Router};
use tracing::info;

use super::state::AppState;
use super::types::ApiError;

pub fn create_html_router() -> Router<AppState> {
    Router::new()
        .route("/configmap-secret", get(configmap_secret))
        .route("/sealed-secret", get(sealed_secret))
}

/// GET /html/configmap-secret
pub async fn configmap_secret(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    info!("Calling html configmap-secret");
    Ok(Html(state.html.configmap_secret(&state.html_config)?))
}

/// GET /html/sealed-secret
pub async fn sealed_secret(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    info!("Calling html sealed-secret");
    Ok(Html(state.html.sealed_secret(&state.html_config)?))
}
