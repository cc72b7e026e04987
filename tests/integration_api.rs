//! API Integration Tests
//!
//! Drives the router over the in-memory store; no database needed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use gobank::{
    api::{self, routes::CreateAccountRequest},
    Account, AccountService, InMemoryAccountStore, StorageError,
};
use serde_json::Value;
use tower::util::ServiceExt;

/// Delegates to an in-memory store and counts every call that reaches it.
#[derive(Default)]
struct CountingService {
    inner: InMemoryAccountStore,
    calls: AtomicUsize,
}

impl CountingService {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl AccountService for CountingService {
    async fn list_accounts(&self) -> Result<Vec<Account>, StorageError> {
        self.hit();
        self.inner.list_accounts().await
    }

    async fn get_account_by_id(&self, id: i32) -> Result<Option<Account>, StorageError> {
        self.hit();
        self.inner.get_account_by_id(id).await
    }

    async fn create_account(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Account, StorageError> {
        self.hit();
        self.inner.create_account(first_name, last_name).await
    }

    async fn delete_account(&self, id: i32) -> Result<(), StorageError> {
        self.hit();
        self.inner.delete_account(id).await
    }

    async fn transfer(&self, from: i32, to: i32, amount: i32) -> Result<(), StorageError> {
        self.hit();
        self.inner.transfer(from, to, amount).await
    }
}

fn app() -> (Router, Arc<CountingService>) {
    let service = Arc::new(CountingService::default());
    (api::build_app(service.clone()), service)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<String>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json)
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn create(app: &Router, first_name: &str, last_name: &str) -> Value {
    let body = serde_json::to_string(&CreateAccountRequest {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
    })
    .unwrap();
    let (status, json) = send(app, "POST", "/account", Some(body)).await;
    assert_eq!(status, StatusCode::OK, "Account creation failed: {}", json);
    json
}

#[tokio::test]
async fn test_list_empty() {
    let (app, _) = app();

    let (status, json) = send(&app, "GET", "/account", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn test_create_get_list() {
    let (app, _) = app();

    let created = create(&app, "Ada", "Lovelace").await;
    assert_eq!(created["firstName"], "Ada");
    assert_eq!(created["lastName"], "Lovelace");
    assert_eq!(created["balance"], 0);

    let id = created["id"].as_i64().unwrap();
    let (status, fetched) = send(&app, "GET", &format!("/account/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, list) = send(&app, "GET", "/account", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_transfer_e2e() {
    let (app, _) = app();

    let a = create(&app, "User", "A").await["id"].as_i64().unwrap();
    let b = create(&app, "User", "B").await["id"].as_i64().unwrap();

    let (status, message) = send(&app, "GET", &format!("/account/{}/{}/100", a, b), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        message,
        Value::String(format!("Successfully transferred 100 from Account {} to Account {}", a, b))
    );

    let (_, account_a) = send(&app, "GET", &format!("/account/{}", a), None).await;
    let (_, account_b) = send(&app, "GET", &format!("/account/{}", b), None).await;
    assert_eq!(account_a["balance"], -100);
    assert_eq!(account_b["balance"], 100);
}

#[tokio::test]
async fn test_transfer_from_missing_account() {
    let (app, _) = app();

    let b = create(&app, "User", "B").await["id"].as_i64().unwrap();

    let (status, error) = send(&app, "GET", &format!("/account/999/{}/50", b), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error_code"], "account_not_found");

    let (_, account_b) = send(&app, "GET", &format!("/account/{}", b), None).await;
    assert_eq!(account_b["balance"], 0);
}

#[tokio::test]
async fn test_delete_then_get() {
    let (app, _) = app();

    let id = create(&app, "Ada", "Lovelace").await["id"].as_i64().unwrap();

    let (status, deleted) = send(&app, "DELETE", &format!("/account/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, serde_json::json!(id));

    let (status, error) = send(&app, "GET", &format!("/account/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"], "Account not found");
}

#[tokio::test]
async fn test_delete_unknown_id_succeeds() {
    let (app, _) = app();

    let (status, deleted) = send(&app, "DELETE", "/account/12345", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, serde_json::json!(12345));
}

#[tokio::test]
async fn test_invalid_segments_never_reach_storage() {
    let (app, service) = app();

    let cases = [
        ("GET", "/account/abc", "Invalid account ID format"),
        ("DELETE", "/account/abc", "Invalid account ID format"),
        ("GET", "/account/x/2/10", "Invalid account ID format for 'from'"),
        ("GET", "/account/1/y/10", "Invalid account ID format for 'to'"),
        ("GET", "/account/1/2/ten", "Invalid format for 'amount'"),
    ];

    for (method, uri, message) in cases {
        let (status, error) = send(&app, method, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} {}", method, uri);
        assert_eq!(error["error"], message);
        assert_eq!(error["error_code"], "invalid_request");
    }

    assert_eq!(service.calls(), 0);
}

#[tokio::test]
async fn test_invalid_create_body_never_reaches_storage() {
    let (app, service) = app();

    let (status, error) = send(&app, "POST", "/account", Some("{not json".to_string())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error_code"], "invalid_request");

    let blank = r#"{"firstName": "", "lastName": "Lovelace"}"#.to_string();
    let (status, _) = send(&app, "POST", "/account", Some(blank)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(service.calls(), 0);
}

#[tokio::test]
async fn test_health_and_correlation_id() {
    let (app, _) = app();

    let request = Request::builder()
        .uri("/health")
        .header("x-correlation-id", "6f1c2a8e-3d4b-4c5a-9e7f-0a1b2c3d4e5f")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-correlation-id").unwrap(),
        "6f1c2a8e-3d4b-4c5a-9e7f-0a1b2c3d4e5f"
    );
}

#[tokio::test]
async fn test_balance_overflow_is_client_error() {
    let (app, _) = app();

    let a = create(&app, "User", "A").await["id"].as_i64().unwrap();
    let b = create(&app, "User", "B").await["id"].as_i64().unwrap();

    let (status, _) = send(&app, "GET", &format!("/account/{}/{}/{}", a, b, i32::MAX), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, error) = send(&app, "GET", &format!("/account/{}/{}/1", a, b), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error_code"], "balance_out_of_range");

    let (_, account_b) = send(&app, "GET", &format!("/account/{}", b), None).await;
    assert_eq!(account_b["balance"], i32::MAX);
}

#[tokio::test]
async fn test_wrong_method_and_unknown_path_answer_with_json() {
    let (app, service) = app();

    let (status, error) = send(&app, "PUT", "/account", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(error["error"], "Method not allowed PUT");
    assert_eq!(error["error_code"], "method_not_allowed");

    let (status, error) = send(&app, "POST", "/account/1", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(error["error"], "Method not allowed POST");

    let (status, error) = send(&app, "DELETE", "/account/1/2/3", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(error["error_code"], "method_not_allowed");

    let (status, error) = send(&app, "GET", "/accounts", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error_code"], "route_not_found");

    assert_eq!(service.calls(), 0);
}
