//! Adds the instance identity headers to every response

use axum::{
    body::Body,
    extract::State,
    http::{HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::domain::AppIdentity;

pub const HEADER_APP_VERSION: &str = "k8s-app-version";
pub const HEADER_APP_IDENTIFIER: &str = "k8s-app-identifier";
pub const HEADER_POD_NAME: &str = "k8s-pod-name";

pub async fn identity_headers_middleware(
    State(identity): State<AppIdentity>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    for (name, value) in [
        (HEADER_APP_VERSION, &identity.version),
        (HEADER_APP_IDENTIFIER, &identity.identifier),
        (HEADER_POD_NAME, &identity.pod_name),
    ] {
        match HeaderValue::from_str(value) {
            Ok(value) => {
                headers.insert(HeaderName::from_static(name), value);
            }
            Err(_) => warn!(header = name, "Identity value is not a valid header"),
        }
    }

    response
}
