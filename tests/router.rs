//! Router-level tests driving the full middleware stack with `oneshot`

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use devops_blue::api::{create_router_with_state, AppState};
use devops_blue::config::HtmlConfig;
use devops_blue::domain::{AppIdentity, StatusCodeResolver, StatusCodeTable};
use devops_blue::infrastructure::{DirectoryFileStore, HtmlRenderer, HttpPeerClient};
use serde_json::Value;
use tower::ServiceExt;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BOUNDARY: &str = "devops-blue-boundary";

struct TestApp {
    router: Router,
    yellow: MockServer,
    white: MockServer,
    _storage: tempfile::TempDir,
}

async fn setup() -> TestApp {
    let yellow = MockServer::start().await;
    let white = MockServer::start().await;
    let storage = tempfile::tempdir().unwrap();
    let timeout = Duration::from_secs(5);

    let state = AppState::new(
        AppIdentity::new("1.0.1", "devops-blue running at 10.0.0.7", "blue-0"),
        StatusCodeResolver::new(StatusCodeTable::new()),
        Arc::new(HttpPeerClient::new("yellow", yellow.uri(), timeout).unwrap()),
        Arc::new(HttpPeerClient::new("white", white.uri(), timeout).unwrap()),
        Arc::new(DirectoryFileStore::open(storage.path().join("doc")).await.unwrap()),
        Arc::new(DirectoryFileStore::open(storage.path().join("image")).await.unwrap()),
        HtmlRenderer::new("devops-blue").unwrap(),
        HtmlConfig::default(),
    );

    TestApp {
        router: create_router_with_state(state),
        yellow,
        white,
        _storage: storage,
    }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, String) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, headers, String::from_utf8_lossy(&bytes).into_owned())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn multipart_upload(uri: &str, file_name: &str, content_type: &str, content: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
         Content-Type: {content_type}\r\n\r\n\
         {content}\r\n\
         --{BOUNDARY}--\r\n"
    );

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_hello_carries_identity_headers() {
    let app = setup().await;

    let (status, headers, body) = send(&app.router, get("/api/hello")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        "Version [1.0.1] Hello from app [devops-blue running at 10.0.0.7] on k8s pod [blue-0]"
    );
    assert_eq!(headers["k8s-app-version"], "1.0.1");
    assert_eq!(headers["k8s-app-identifier"], "devops-blue running at 10.0.0.7");
    assert_eq!(headers["k8s-pod-name"], "blue-0");
}

#[tokio::test]
async fn test_error_responses_carry_identity_headers() {
    let app = setup().await;

    let (status, headers, _) = send(&app.router, get("/api/image/missing.png")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(headers["k8s-pod-name"], "blue-0");
}

#[tokio::test]
async fn test_invalid_class_rejected_before_any_peer_call() {
    let app = setup().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.yellow)
        .await;

    for uri in ["/api/chain/6xx/one", "/api/chain/abc/four", "/api/status/2XX"] {
        let (status, _, body) = send(&app.router, get(uri)).await;
        let json: Value = serde_json::from_str(&body).unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
        assert_eq!(json["error"]["message"], "Bad input from client");
        assert!(json["timestamp"].as_i64().is_some());
    }
}

#[tokio::test]
async fn test_status_endpoint_stays_in_class() {
    let app = setup().await;

    let (status, _, body) = send(&app.router, get("/api/status/4xx")).await;

    assert!(status.is_client_error());
    assert!(body.starts_with("Return after "));
    assert!(body.ends_with(" millisecond delay"));
}

#[tokio::test]
async fn test_delay_out_of_range() {
    let app = setup().await;

    let (status, _, body) = send(&app.router, get("/api/delay/31")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("current value 31"));
}

#[tokio::test]
async fn test_load_requests_out_of_range() {
    let app = setup().await;

    let (status, _, body) = send(&app.router, get("/api/load/memory?memory-mb=1125899906842624")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("memory-mb (current value 1125899906842624)"));

    let (status, _, body) = send(&app.router, get("/api/load/cpu?cpu=4000000000")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("cpu (current value 4000000000)"));

    let (status, _, body) = send(&app.router, get("/api/load/memory?memory-mb=0")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Starting fake load over period 0 second, memory 0 MB");
}

#[tokio::test]
async fn test_exception_is_structured_500() {
    let app = setup().await;

    let (status, _, body) = send(&app.router, get("/api/exception")).await;
    let json: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "INTERNAL_SERVER_ERROR");
}

#[tokio::test]
async fn test_chain_one_forwards_headers_and_uses_requested_class() {
    let app = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/status/2xx"))
        .and(header("x-request-id", "req-7"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Return after 5 millisecond delay"))
        .expect(1)
        .mount(&app.yellow)
        .await;

    let request = Request::builder()
        .uri("/api/chain/3xx/one")
        .header("x-request-id", "req-7")
        .body(Body::empty())
        .unwrap();
    let (status, headers, body) = send(&app.router, request).await;

    assert!(status.is_redirection());
    assert_eq!(headers["content-type"], "text/plain; charset=utf-8");
    assert_eq!(
        body,
        "Blue call yellow. Final response is :\n\
         \x20 - Blue : Version [1.0.1] Hello from app [devops-blue running at 10.0.0.7] on k8s pod [blue-0]\n\
         \x20 - Yellow : <200 OK, Return after 5 millisecond delay>"
    );
}

#[tokio::test]
async fn test_chain_four_peer_failure_is_bad_gateway() {
    let app = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/status/5xx"))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .expect(1)
        .mount(&app.yellow)
        .await;

    let (status, _, body) = send(&app.router, get("/api/chain/5xx/four")).await;
    let json: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"]["code"], "API_CHAIN_CALL_ERROR");
    assert_eq!(json["error"]["message"], "Error on chain call to other API");
    let reason = json["error"]["reason"].as_str().unwrap();
    assert!(reason.contains("yellow"));
    assert!(reason.contains("503"));
}

#[tokio::test]
async fn test_chain_two_calls_yellow_then_white() {
    let app = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/status/2xx"))
        .respond_with(ResponseTemplate::new(200).set_body_string("yellow done"))
        .expect(1)
        .mount(&app.yellow)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/status/2xx"))
        .respond_with(ResponseTemplate::new(201).set_body_string("white done"))
        .expect(1)
        .mount(&app.white)
        .await;

    let (status, _, body) = send(&app.router, get("/api/chain/4xx/two")).await;

    assert!(status.is_client_error());
    assert!(body.starts_with("Blue call yellow, and blue call white. Final response is :"));
    assert!(body.contains("  - Yellow : <200 OK, yellow done>"));
    assert!(body.ends_with("  - White : <201 Created, white done>"));
}

#[tokio::test]
async fn test_chain_three_and_five_go_through_yellow_chain() {
    let app = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/chain/2xx/one"))
        .respond_with(ResponseTemplate::new(200).set_body_string("yellow chained"))
        .expect(1)
        .mount(&app.yellow)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/chain/4xx/one"))
        .respond_with(ResponseTemplate::new(404).set_body_string("white said no"))
        .expect(1)
        .mount(&app.yellow)
        .await;

    let (status, _, body) = send(&app.router, get("/api/chain/5xx/three")).await;
    assert!(status.is_server_error());
    assert!(body.starts_with("Blue call yellow, and yellow call white. Final response is :"));
    assert!(body.ends_with("  - Yellow : <200 OK, yellow chained>"));

    let (status, _, body) = send(&app.router, get("/api/chain/4xx/five")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("white said no"));
}

#[tokio::test]
async fn test_chain_echo_one() {
    let app = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/echo"))
        .respond_with(ResponseTemplate::new(200).set_body_string("yellow echo"))
        .expect(1)
        .mount(&app.yellow)
        .await;

    let (status, _, body) = send(&app.router, get("/api/chain/echo/one?x=1")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("Blue call yellow.echo. Final result is :\n  - Blue : Protocol : HTTP/1.1"));
    assert!(body.contains("Path : /api/chain/echo/one"));
    assert!(body.contains("  x : [1]"));
    assert!(body.ends_with("  - Yellow : yellow echo"));
}

#[tokio::test]
async fn test_doc_upload_list_and_download() {
    let app = setup().await;

    let (status, _, body) = send(
        &app.router,
        multipart_upload("/api/doc", "notes.txt", "text/plain", "hello notes"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let name = body.strip_prefix("Saved : ").unwrap().to_string();
    assert!(name.ends_with(".txt"));

    let (_, _, listing) = send(&app.router, get("/api/docs")).await;
    let names: Vec<String> = serde_json::from_str(&listing).unwrap();
    assert_eq!(names, vec![name.clone()]);

    let (status, headers, content) = send(&app.router, get(&format!("/api/doc/{name}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content, "hello notes");
    assert_eq!(
        headers["content-disposition"],
        format!("attachment; filename=\"{name}\"").as_str()
    );
    assert!(headers["content-type"].to_str().unwrap().starts_with("text/plain"));
}

#[tokio::test]
async fn test_upload_routing_by_image_type() {
    let app = setup().await;

    let (status, _, body) = send(
        &app.router,
        multipart_upload("/api/doc", "cat.png", "image/png", "png"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Use endpoint /image to upload image");

    let (status, _, body) = send(
        &app.router,
        multipart_upload("/api/image", "notes.txt", "text/plain", "text"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "Not an image (jpg / png / gif / ...)");

    let (status, _, body) = send(
        &app.router,
        multipart_upload("/api/image", "cat.png", "image/png", "png"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body.starts_with("Saved : "));
}

#[tokio::test]
async fn test_ready_reports_failing_peer_as_degraded() {
    let app = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/hello"))
        .respond_with(ResponseTemplate::new(200).set_body_string("yellow hello"))
        .mount(&app.yellow)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/hello"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.white)
        .await;

    let (status, _, body) = send(&app.router, get("/ready")).await;
    let json: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"][0]["name"], "yellow");
    assert_eq!(json["checks"][0]["status"], "healthy");
    assert_eq!(json["checks"][1]["name"], "white");
    assert_eq!(json["checks"][1]["status"], "degraded");
}

#[tokio::test]
async fn test_html_page_rendered() {
    let app = setup().await;

    let (status, headers, body) = send(&app.router, get("/html/configmap-secret")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(headers["content-type"].to_str().unwrap().starts_with("text/html"));
    assert!(body.contains("Default text (k8s Configmap / Secret not loaded)"));
}

#[tokio::test]
async fn test_request_id_generated_and_returned() {
    let app = setup().await;

    let (_, headers, _) = send(&app.router, get("/live")).await;
    let generated = headers["x-request-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok());

    let request = Request::builder()
        .uri("/live")
        .header("x-request-id", "req-given")
        .body(Body::empty())
        .unwrap();
    let (_, headers, _) = send(&app.router, request).await;
    assert_eq!(headers["x-request-id"], "req-given");
}
