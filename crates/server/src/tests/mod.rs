// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use bookstore_persistence::Persistence;
use serde_json::{Value, json};
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::AppState;
use crate::routes::build_router;

pub const PASSWORD: &str = "secret123";

/// Creates a router over a fresh in-memory database.
pub fn create_test_app() -> Router {
    create_test_app_with_store().0
}

/// Like `create_test_app`, also handing back the shared store so a test
/// can seed rows directly.
pub fn create_test_app_with_store() -> (Router, Arc<Mutex<Persistence>>) {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    let store: Arc<Mutex<Persistence>> = Arc::new(Mutex::new(persistence));
    let app: Router = build_router(AppState {
        persistence: Arc::clone(&store),
        session_ttl: time::Duration::hours(1),
    });
    (app, store)
}

/// Sends one request and returns the status with the decoded JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request: Request<Body> = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

pub async fn login(app: &Router, username: &str) -> String {
    let (status, body): (StatusCode, Value) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": username, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().unwrap().to_string()
}

/// Bootstraps the first administrator and returns its token.
pub async fn bootstrap_admin(app: &Router) -> String {
    let (status, _): (StatusCode, Value) = send(
        app,
        "POST",
        "/api/auth/bootstrap",
        None,
        Some(json!({
            "username": "admin",
            "password": PASSWORD,
            "password_confirmation": PASSWORD,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    login(app, "admin").await
}

/// Creates a user with the given role and returns its token.
pub async fn add_user(app: &Router, admin_token: &str, username: &str, role: &str) -> String {
    let (status, _): (StatusCode, Value) = send(
        app,
        "POST",
        "/api/users",
        Some(admin_token),
        Some(json!({
            "username": username,
            "password": PASSWORD,
            "password_confirmation": PASSWORD,
            "role": role,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    login(app, username).await
}

/// Adds a book priced at 20.00 and returns its id.
pub async fn add_book(app: &Router, token: &str, isbn: &str, stock: i64) -> i64 {
    let (status, body): (StatusCode, Value) = send(
        app,
        "POST",
        "/api/books",
        Some(token),
        Some(json!({
            "isbn": isbn,
            "title": "Test Book",
            "author": "Author",
            "publisher": "Publisher",
            "price": "20.00",
            "stock": stock,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "book creation failed: {body}");
    body["id"].as_i64().unwrap()
}
