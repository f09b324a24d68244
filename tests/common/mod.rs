//! Common test utilities

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::util::ServiceExt;

use occ_bank::handlers::{CreateAccountCommand, CreateAccountHandler};
use occ_bank::AccountStore;

/// Fresh store seeded with the given accounts
pub fn setup_store(accounts: &[(&str, i64)]) -> AccountStore {
    let store = AccountStore::new();
    let handler = CreateAccountHandler::new(store.clone());
    for (name, balance) in accounts {
        handler
            .execute(CreateAccountCommand::new(*name, *balance))
            .expect("Failed to seed account");
    }
    store
}

/// Send a request through the router and decode the JSON body
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or(Value::Null)
    };
    (status, json)
}

/// GET request with an empty body
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// POST request with a JSON body
pub fn post_json(uri: &str, body: &impl serde::Serialize) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}
