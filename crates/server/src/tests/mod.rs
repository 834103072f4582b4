// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use timeoff_domain::{LeavePolicy, Role, User};
use timeoff_persistence::{InMemoryPersistence, LeaveStore, UserRepository};
use tower::ServiceExt;

use crate::http::{ACTOR_HEADER, AppState, build_router};

pub fn seed_users<S: UserRepository + ?Sized>(store: &mut S) {
    for (id, name, role) in [
        ("alice", "Alice", Role::User),
        ("bob", "Bob", Role::User),
        ("admin", "Dana Admin", Role::Admin),
    ] {
        store
            .create_user(&User::new(
                id.to_string(),
                name.to_string(),
                format!("{id}@example.com"),
                role,
            ))
            .unwrap();
    }
}

/// A router over `store` after seeding alice, bob and an admin.
pub fn create_test_app(mut store: Box<dyn LeaveStore + Send>) -> Router {
    seed_users(&mut *store);
    build_router(AppState::new(store, LeavePolicy::default()))
}

pub fn create_memory_app() -> Router {
    create_test_app(Box::new(InMemoryPersistence::new()))
}

/// Sends one request and returns the status with the decoded JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    actor: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(actor) = actor {
        builder = builder.header(ACTOR_HEADER, actor);
    }
    let request: Request<Body> = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
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
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Files a vacation request as `owner` and returns its id.
pub async fn file_vacation(app: &Router, owner: &str) -> String {
    let (status, body): (StatusCode, Value) = send(
        app,
        "POST",
        "/leave_requests",
        Some(owner),
        Some(serde_json::json!({
            "leave_type": "vacation",
            "start_date": "2023-07-03",
            "end_date": "2023-07-07",
            "reason": "Family trip",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["request"]["request_id"].as_str().unwrap().to_string()
}
