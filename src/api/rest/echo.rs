//! Snapshots an inbound request for the echo endpoints

use axum::{
    body::Bytes,
    extract::{FromRequest, OriginalUri, Request},
    http::{header, request::Parts, HeaderMap},
};

use crate::api::types::ApiError;
use crate::domain::{EchoRequest, ForwardedHeaders};

/// Everything the echo endpoints need from the request: the rendered local echo and
/// the headers to forward to peers
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub echo: EchoRequest,
    pub forwarded: ForwardedHeaders,
}

impl<S> FromRequest<S> for InboundRequest
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let (parts, body) = req.into_parts();

        let mut echo = EchoRequest {
            protocol: format!("{:?}", parts.version),
            secure: is_secure(&parts.headers),
            path: original_path(&parts),
            method: parts.method.to_string(),
            headers: header_pairs(&parts.headers),
            cookies: cookies(&parts.headers),
            parameters: Vec::new(),
            body: None,
        };
        let forwarded = forwarded_headers(&parts.headers);
        let query = parts.uri.query().map(str::to_string);

        let body = Bytes::from_request(Request::from_parts(parts, body), state)
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read request body: {}", e)))?;

        if !body.is_empty() {
            echo.body = Some(String::from_utf8_lossy(&body).into_owned());
        }

        if let Some(query) = query {
            let pairs: Vec<(String, String)> = serde_urlencoded::from_str(&query)
                .map_err(|e| ApiError::bad_request(format!("Invalid query string: {}", e)))?;

            for (key, value) in pairs {
                echo.add_parameter(key, value);
            }
        }

        Ok(Self { echo, forwarded })
    }
}

/// Nested routers strip their prefix from the request URI
fn original_path(parts: &Parts) -> String {
    parts
        .extensions
        .get::<OriginalUri>()
        .map(|uri| uri.0.path().to_string())
        .unwrap_or_else(|| parts.uri.path().to_string())
}

/// TLS terminates at the ingress, which reports the original scheme
fn is_secure(headers: &HeaderMap) -> bool {
    headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|proto| proto.eq_ignore_ascii_case("https"))
}

fn header_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect()
}

fn cookies(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .map(str::trim)
        .filter(|cookie| !cookie.is_empty())
        .map(str::to_string)
        .collect()
}

/// Every inbound header, in arrival order
pub fn forwarded_headers(headers: &HeaderMap) -> ForwardedHeaders {
    header_pairs(headers).into_iter().collect()
}
