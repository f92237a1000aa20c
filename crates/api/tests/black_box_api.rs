use std::sync::Arc;

use httpmock::prelude::*;
use reqwest::StatusCode;
use serde_json::json;

use platformd_api::app::services::AppServices;
use platformd_infra::{HttpCommandClient, InMemoryPlatformStore};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Spawn the real router on an ephemeral port, backed by a fresh
    /// in-memory store (ids start at 1) and a notifier pointed at
    /// `command_service_url`.
    async fn spawn(command_service_url: &str) -> Self {
        let store = Arc::new(InMemoryPlatformStore::new());
        let command_client = Arc::new(HttpCommandClient::new(command_service_url));
        let services = Arc::new(AppServices::new(store, command_client));

        let app = platformd_api::app::build_app(services);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Command-service endpoint that nothing listens on; sends fail immediately.
const UNREACHABLE_COMMAND_SERVICE: &str = "http://127.0.0.1:1/api/c/platforms";

#[tokio::test]
async fn health_endpoint_responds_ok() {
    let srv = TestServer::spawn(UNREACHABLE_COMMAND_SERVICE).await;

    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn created_platform_is_readable_by_returned_id() {
    let srv = TestServer::spawn(UNREACHABLE_COMMAND_SERVICE).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/platforms", srv.base_url))
        .json(&json!({ "name": "PlayStation 5", "publisher": "Sony", "cost": "499" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    let id = created["id"].as_i64().unwrap();

    let res = client
        .get(format!("{}/api/platforms/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: serde_json::Value = res.json().await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn get_by_unissued_id_returns_404() {
    let srv = TestServer::spawn(UNREACHABLE_COMMAND_SERVICE).await;

    let res = reqwest::get(format!("{}/api/platforms/99", srv.base_url))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_returns_created_platforms_in_id_order() {
    let srv = TestServer::spawn(UNREACHABLE_COMMAND_SERVICE).await;
    let client = reqwest::Client::new();

    for name in ["Switch", "Steam Deck"] {
        let res = client
            .post(format!("{}/api/platforms", srv.base_url))
            .json(&json!({ "name": name, "publisher": "Various", "cost": "350" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = client
        .get(format!("{}/api/platforms", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], 1);
    assert_eq!(items[0]["name"], "Switch");
    assert_eq!(items[1]["id"], 2);
    assert_eq!(items[1]["name"], "Steam Deck");
}

#[tokio::test]
async fn update_rewrites_fields_and_keeps_the_id() {
    let srv = TestServer::spawn(UNREACHABLE_COMMAND_SERVICE).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/platforms", srv.base_url))
        .json(&json!({ "name": "Xbox", "publisher": "Microsoft", "cost": "300" }))
        .send()
        .await
        .unwrap();
    let created: serde_json::Value = res.json().await.unwrap();
    let id = created["id"].as_i64().unwrap();

    let res = client
        .put(format!("{}/api/platforms/{}", srv.base_url, id))
        .json(&json!({ "name": "Xbox Series X", "publisher": "Microsoft", "cost": "499" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let fetched: serde_json::Value = client
        .get(format!("{}/api/platforms/{}", srv.base_url, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(
        fetched,
        json!({ "id": id, "name": "Xbox Series X", "publisher": "Microsoft", "cost": "499" })
    );
}

#[tokio::test]
async fn update_on_absent_id_returns_404_and_creates_nothing() {
    let srv = TestServer::spawn(UNREACHABLE_COMMAND_SERVICE).await;
    let client = reqwest::Client::new();

    let res = client
        .put(format!("{}/api/platforms/42", srv.base_url))
        .json(&json!({ "name": "Ghost", "publisher": "Nobody", "cost": "0" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body: serde_json::Value = client
        .get(format!("{}/api/platforms", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn delete_on_absent_id_returns_404() {
    let srv = TestServer::spawn(UNREACHABLE_COMMAND_SERVICE).await;
    let client = reqwest::Client::new();

    let res = client
        .delete(format!("{}/api/platforms/7", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_succeeds_when_command_service_rejects_the_send() {
    let command_service = MockServer::start();
    let reject = command_service.mock(|when, then| {
        when.method(POST).path("/api/c/platforms");
        then.status(500);
    });

    let srv = TestServer::spawn(&command_service.url("/api/c/platforms")).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/platforms", srv.base_url))
        .json(&json!({ "name": "Stadia", "publisher": "Google", "cost": "Free" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    reject.assert();

    // The entity is persisted despite the failed notification.
    let res = client
        .get(format!("{}/api/platforms/1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_forwards_read_view_to_command_service() {
    let command_service = MockServer::start();
    let received = command_service.mock(|when, then| {
        when.method(POST).path("/api/c/platforms").json_body(json!({
            "id": 1,
            "name": "GeForce Now",
            "publisher": "NVIDIA",
            "cost": "10",
        }));
        then.status(200);
    });

    let srv = TestServer::spawn(&command_service.url("/api/c/platforms")).await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/platforms", srv.base_url))
        .json(&json!({ "name": "GeForce Now", "publisher": "NVIDIA", "cost": "10" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    received.assert();
}

#[tokio::test]
async fn platform_lifecycle_create_get_delete() {
    let command_service = MockServer::start();
    command_service.mock(|when, then| {
        when.method(POST).path("/api/c/platforms");
        then.status(200);
    });

    let srv = TestServer::spawn(&command_service.url("/api/c/platforms")).await;
    let client = reqwest::Client::new();

    // Create
    let res = client
        .post(format!("{}/api/platforms", srv.base_url))
        .json(&json!({ "name": "Xbox One", "publisher": "Microsoft", "cost": "250" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    assert_eq!(
        res.headers().get("location").unwrap().to_str().unwrap(),
        "/api/platforms/1"
    );
    let created: serde_json::Value = res.json().await.unwrap();
    assert_eq!(
        created,
        json!({ "id": 1, "name": "Xbox One", "publisher": "Microsoft", "cost": "250" })
    );

    // Read back
    let res = client
        .get(format!("{}/api/platforms/1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: serde_json::Value = res.json().await.unwrap();
    assert_eq!(fetched, created);

    // Delete
    let res = client
        .delete(format!("{}/api/platforms/1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    // Gone
    let res = client
        .get(format!("{}/api/platforms/1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
