//! Chain endpoints that call the yellow and white peers before answering

use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
};

use super::diagnostics::status_code;
use super::echo::{forwarded_headers, InboundRequest};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Path};
use crate::domain::{ChainRequest, ChainResult, ChainVariant, StatusClass};

const TEXT_PLAIN_UTF8: &str = "text/plain; charset=utf-8";

/// ANY /api/chain/echo/one
pub async fn echo_one(
    State(state): State<AppState>,
    inbound: InboundRequest,
) -> Result<Response, ApiError> {
    let local_echo = inbound.echo.render();
    let result = state
        .orchestrator
        .echo_one(inbound.forwarded, &local_echo)
        .await?;

    into_text_response(result)
}

/// ANY /api/chain/echo/two
pub async fn echo_two(
    State(state): State<AppState>,
    inbound: InboundRequest,
) -> Result<Response, ApiError> {
    let local_echo = inbound.echo.render();
    let result = state
        .orchestrator
        .echo_two(inbound.forwarded, &local_echo)
        .await?;

    into_text_response(result)
}

/// GET /api/chain/{response-status-code}/one
pub async fn chain_one(
    state: State<AppState>,
    class: Path<StatusClass>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    run(state, class, headers, ChainVariant::One).await
}

/// GET /api/chain/{response-status-code}/two
pub async fn chain_two(
    state: State<AppState>,
    class: Path<StatusClass>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    run(state, class, headers, ChainVariant::Two).await
}

/// GET /api/chain/{response-status-code}/three
pub async fn chain_three(
    state: State<AppState>,
    class: Path<StatusClass>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    run(state, class, headers, ChainVariant::Three).await
}

/// GET /api/chain/{response-status-code}/four
pub async fn chain_four(
    state: State<AppState>,
    class: Path<StatusClass>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    run(state, class, headers, ChainVariant::Four).await
}

/// GET /api/chain/{response-status-code}/five
pub async fn chain_five(
    state: State<AppState>,
    class: Path<StatusClass>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    run(state, class, headers, ChainVariant::Five).await
}

async fn run(
    State(state): State<AppState>,
    Path(class): Path<StatusClass>,
    headers: HeaderMap,
    variant: ChainVariant,
) -> Result<Response, ApiError> {
    let request = ChainRequest::new(forwarded_headers(&headers), class);
    let result = state.orchestrator.run(variant, request).await?;

    into_text_response(result)
}

fn into_text_response(result: ChainResult) -> Result<Response, ApiError> {
    let status = status_code(result.status)?;

    Ok((status, [(header::CONTENT_TYPE, TEXT_PLAIN_UTF8)], result.body).into_response())
}
