use std::sync::Arc;

use mason_api::app::AppServices;
use mason_infra::DatabaseConfig;
use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Same router as prod over a fresh in-memory SQLite database.
    async fn spawn() -> Self {
        let app = mason_api::app::build_app(&DatabaseConfig::in_memory())
            .await
            .expect("failed to build app");
        Self::serve(app).await
    }

    async fn spawn_with(services: AppServices) -> Self {
        Self::serve(mason_api::app::router(Arc::new(services))).await
    }

    async fn serve(app: axum::Router) -> Self {
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

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn create_order(client: &reqwest::Client, srv: &TestServer, customer: &str) -> serde_json::Value {
    let res = client
        .post(srv.url("/orders"))
        .json(&json!({
            "customer_name": customer,
            "monument_type": "Headstone",
            "material": "Granite",
            "engraving_details": "Forever in our hearts",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn().await;

    let res = reqwest::get(srv.url("/health")).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn order_lifecycle_create_list_advance() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let created = create_order(&client, &srv, "Mary Jones").await;
    assert_eq!(created["status"], "Inquiry");
    assert_eq!(created["monument_type"], "Headstone");
    assert!(created["created_at"].is_string());
    let id = created["id"].as_i64().unwrap();

    let listed: serde_json::Value = client
        .get(srv.url("/orders"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0], created);

    for expected in ["Design", "Production", "Completed"] {
        let res = client
            .post(srv.url(&format!("/orders/{id}/advance")))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["status"], expected);
    }

    let res = client
        .post(srv.url(&format!("/orders/{id}/advance")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invariant_violation");
}

#[tokio::test]
async fn invalid_order_input_is_a_bad_request() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/orders"))
        .json(&json!({
            "customer_name": "",
            "monument_type": "Headstone",
            "material": "Granite",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");

    let res = client
        .post(srv.url("/orders"))
        .json(&json!({
            "customer_name": "Mary Jones",
            "monument_type": "Headstone",
            "material": "Bronze",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_bodies_are_json_validation_errors() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let cases = [
        ("/orders", json!({ "monument_type": "Headstone", "material": "Granite" })),
        ("/inventory", json!({ "material_name": "Granite", "quantity": "lots" })),
        ("/users", json!({ "name": "Ada", "email": "ada@example.com" })),
    ];

    for (path, body) in cases {
        let res = client.post(srv.url(path)).json(&body).send().await.unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{path}");
        let content_type = res.headers()[reqwest::header::CONTENT_TYPE].to_str().unwrap().to_owned();
        assert!(content_type.starts_with("application/json"), "{path}: {content_type}");
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body["error"], "validation_error", "{path}");
        assert!(body["message"].is_string(), "{path}");
    }

    let res = client
        .post(srv.url("/orders"))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let orders: serde_json::Value = client
        .get(srv.url("/orders"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(orders.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn advancing_missing_or_malformed_order_ids() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client.post(srv.url("/orders/77/advance")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.post(srv.url("/orders/abc/advance")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_id");
}

#[tokio::test]
async fn dashboard_counts_pending_orders() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let first = create_order(&client, &srv, "A").await;
    create_order(&client, &srv, "B").await;
    let id = first["id"].as_i64().unwrap();
    for _ in 0..3 {
        client
            .post(srv.url(&format!("/orders/{id}/advance")))
            .send()
            .await
            .unwrap();
    }

    let metrics: serde_json::Value = client
        .get(srv.url("/dashboard"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(metrics, json!({ "total_orders": 2, "pending_orders": 1 }));
}

#[tokio::test]
async fn inventory_create_list_and_reorder() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for (name, quantity, level) in [("Granite", 0.0, 0.0), ("Marble", 1.5, 4.0)] {
        let res = client
            .post(srv.url("/inventory"))
            .json(&json!({
                "material_name": name,
                "quantity": quantity,
                "reorder_level": level,
            }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    // reorder_level defaults to zero
    let res = client
        .post(srv.url("/inventory"))
        .json(&json!({ "material_name": "Limestone", "quantity": 9.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["reorder_level"], 0.0);

    let items: serde_json::Value = client
        .get(srv.url("/inventory"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(items.as_array().unwrap().len(), 3);

    let low: serde_json::Value = client
        .get(srv.url("/inventory/reorder"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let low = low.as_array().unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0]["material_name"], "Marble");

    let res = client
        .post(srv.url("/inventory"))
        .json(&json!({ "material_name": "Granite", "quantity": -1.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_user_email_is_a_conflict() {
    let srv = TestServer::spawn_with(AppServices::in_memory()).await;
    let client = reqwest::Client::new();

    let user = json!({ "name": "Ada", "email": "ada@example.com", "role": "Designer" });

    let res = client.post(srv.url("/users")).json(&user).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    assert_eq!(created["role"], "Designer");

    let res = client.post(srv.url("/users")).json(&user).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "already_exists");

    let users: serde_json::Value = client
        .get(srv.url("/users"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(users.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_role_is_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(srv.url("/users"))
        .json(&json!({ "name": "Ada", "email": "ada@example.com", "role": "Owner" }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
