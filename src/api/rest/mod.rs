//! REST endpoints served under `/api`

pub mod chain;
pub mod diagnostics;
pub mod echo;
pub mod files;

use axum::{
    routing::{any, get, post},
    Router,
};

use super::state::AppState;

pub fn create_rest_router() -> Router<AppState> {
    Router::new()
        .route("/hello", get(diagnostics::hello))
        .route("/echo", any(diagnostics::echo))
        .route("/delay", get(diagnostics::random_delay))
        .route("/delay/{delay-second}", get(diagnostics::delay))
        .route("/status/{response-status-code}", get(diagnostics::status))
        .route("/exception", get(diagnostics::exception))
        .route("/load/cpu", get(diagnostics::load_cpu))
        .route("/load/memory", get(diagnostics::load_memory))
        .route("/log", get(diagnostics::log))
        .route("/time", get(diagnostics::time))
        .route("/docs", get(files::list_docs))
        .route("/images", get(files::list_images))
        .route("/doc", post(files::upload_doc))
        .route("/image", post(files::upload_image))
        .route("/doc/{doc-id}", get(files::get_doc))
        .route("/image/{image-id}", get(files::get_image))
        .route("/chain/echo/one", any(chain::echo_one))
        .route("/chain/echo/two", any(chain::echo_two))
        .route("/chain/{response-status-code}/one", get(chain::chain_one))
        .route("/chain/{response-status-code}/two", get(chain::chain_two))
        .route("/chain/{response-status-code}/three", get(chain::chain_three))
        .route("/chain/{response-status-code}/four", get(chain::chain_four))
        .route("/chain/{response-status-code}/five", get(chain::chain_five))
}
