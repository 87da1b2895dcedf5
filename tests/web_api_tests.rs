//! Router-level tests for the web API surface, driven through the same
//! router the server mounts.

use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::connect_info::ConnectInfo;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use threat_browser::aggregate::RemoteCatalog;
use threat_browser::web::server::create_router;
use threat_browser::ThreatCatalog;

fn request(uri: &str) -> Request<Body> {
    // The rate-limit layer keys on the peer address, which a handed-in
    // request does not carry on its own
    let mut request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    request
        .extensions_mut()
        .insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))));
    request
}

async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
    let router = create_router(ThreatCatalog::load_embedded().unwrap());
    let response = router.oneshot(request(uri)).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_threats_endpoint_lists_ids_in_catalog_order() {
    let (status, body) = get_json("/api/threats").await;
    assert_eq!(status, StatusCode::OK);

    let threats: Vec<&str> = body["threats"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(body["count"].as_u64().unwrap() as usize, threats.len());

    let pos = |id: &str| threats.iter().position(|t| *t == id).unwrap();
    assert_eq!(threats[0], "T.1");
    assert!(pos("T.9") < pos("T.10"));
}

#[tokio::test]
async fn test_details_endpoint_deduplicates_and_echoes_selection() {
    // T.1, T.2 and T.4 all contribute object O.1
    let (status, body) = get_json("/api/details?ids=T.1,T.2,T.4").await;
    assert_eq!(status, StatusCode::OK);

    let objects = body["objects"].as_array().unwrap();
    let o1_count = objects.iter().filter(|o| o["id"] == "O.1").count();
    assert_eq!(o1_count, 1);

    let selected: Vec<&str> = body["selected_threats"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(selected, ["T.1", "T.2", "T.4"]);
}

#[tokio::test]
async fn test_details_endpoint_skips_unknown_ids() {
    let (status, body) = get_json("/api/details?ids=T.1,T.9999").await;
    assert_eq!(status, StatusCode::OK);

    // The unknown id contributes nothing but stays in the echoed selection
    assert_eq!(body["selected_threats"].as_array().unwrap().len(), 2);
    let object_ids: Vec<&str> = body["objects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["id"].as_str().unwrap())
        .collect();
    assert_eq!(object_ids, ["O.1", "O.2"]);
}

#[tokio::test]
async fn test_details_endpoint_rejects_empty_selection() {
    let (status, body) = get_json("/api/details?ids=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "empty_selection");
    assert_eq!(body["error"], "Select at least one threat");

    // Missing parameter behaves the same as an empty one
    let (status, body) = get_json("/api/details").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_type"], "empty_selection");
}

#[tokio::test]
async fn test_responses_carry_security_headers() {
    let router = create_router(ThreatCatalog::load_embedded().unwrap());
    let response = router.oneshot(request("/api/threats")).await.unwrap();

    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
    assert_eq!(response.headers().get("x-frame-options").unwrap(), "DENY");
}

#[test]
fn test_remote_catalog_lists_ids_from_a_running_server() {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let listener = rt
        .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
        .unwrap();
    let addr = listener.local_addr().unwrap();

    let app = create_router(ThreatCatalog::load_embedded().unwrap());
    rt.spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    let remote = RemoteCatalog::new(format!("http://{addr}"));
    let ids = remote.list_ids().unwrap();

    assert_eq!(ids.first().map(|id| id.as_str()), Some("T.1"));
    assert!(ids.iter().any(|id| id.as_str() == "T.10"));
}
