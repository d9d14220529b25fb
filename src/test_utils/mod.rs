#![allow(missing_docs)]

use axum::http::StatusCode;
use axum_test::{TestResponse, TestServer};
use rusqlite::Connection;
use serde_json::{Value, json};

use crate::{AppState, endpoints};

/// bcrypt cost for tests, the lowest the library accepts.
pub(crate) const TEST_PASSWORD_COST: u32 = 4;

pub(crate) fn get_test_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not create in-memory SQLite database");

    AppState::new(connection, "42")
        .expect("Could not create app state")
        .with_password_cost(TEST_PASSWORD_COST)
}

/// Register `email` with the password "pw123456" and return a token for it.
pub(crate) async fn register_and_log_in(server: &TestServer, email: &str) -> String {
    let credentials = json!({ "email": email, "password": "pw123456" });

    server
        .post(endpoints::REGISTER)
        .json(&credentials)
        .await
        .assert_status(StatusCode::CREATED);

    let response = server.post(endpoints::LOG_IN).json(&credentials).await;
    response.assert_status_ok();

    response.json::<Value>()["token"]
        .as_str()
        .expect("log-in response has no token")
        .to_owned()
}

/// Create a category and return its ID.
pub(crate) async fn create_test_category(server: &TestServer, token: &str, name: &str) -> i64 {
    let response = server
        .post(endpoints::CATEGORIES)
        .authorization_bearer(token)
        .json(&json!({ "name": name, "color": "#ff0000" }))
        .await;
    response.assert_status(StatusCode::CREATED);

    response.json::<Value>()["category"]["id"]
        .as_i64()
        .expect("category response has no ID")
}

#[track_caller]
pub(crate) fn assert_error(response: &TestResponse, status: StatusCode, message: &str) {
    response.assert_status(status);
    assert_eq!(
        response.json::<Value>(),
        json!({ "error": message }),
        "want error {message:?} with status {status}"
    );
}
