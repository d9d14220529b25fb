//! Endpoints for reading a user's transactions.

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    Error,
    auth::AuthenticatedUser,
    owned::{select_all_owned, select_owned},
    transaction::{Transaction, TransactionState, parse_transaction_id},
};

/// List the signed-in user's transactions, newest first.
pub async fn get_transactions_endpoint(
    State(state): State<TransactionState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions: Vec<Transaction> = select_all_owned(user.user_id, &connection)?;

    Ok(Json(json!({ "transactions": transactions })).into_response())
}

/// Get one of the signed-in user's transactions.
pub async fn get_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(raw_id): Path<String>,
) -> Result<Response, Error> {
    let transaction_id = parse_transaction_id(&raw_id)?;
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction: Transaction = select_owned(transaction_id, user.user_id, &connection)?;

    Ok(Json(json!({ "transaction": transaction })).into_response())
}

#[cfg(test)]
mod read_transaction_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        build_router,
        endpoints::{self, format_endpoint},
        test_utils::{assert_error, create_test_category, get_test_state, register_and_log_in},
    };

    fn get_test_server() -> TestServer {
        TestServer::new(build_router(get_test_state()))
    }

    async fn create_transaction(server: &TestServer, token: &str, category_id: i64) -> i64 {
        let response = server
            .post(endpoints::TRANSACTIONS)
            .authorization_bearer(token)
            .json(&json!({
                "amount": 50,
                "date": "2024-01-01",
                "type": "deposit",
                "categoryId": category_id,
            }))
            .await;
        response.assert_status(StatusCode::CREATED);

        response.json::<Value>()["transaction"]["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn list_only_includes_own_transactions() {
        let server = get_test_server();
        let alice = register_and_log_in(&server, "a@x.com").await;
        let bob = register_and_log_in(&server, "b@x.com").await;
        let alice_category = create_test_category(&server, &alice, "Food").await;
        let bob_category = create_test_category(&server, &bob, "Food").await;
        let transaction_id = create_transaction(&server, &alice, alice_category).await;
        create_transaction(&server, &bob, bob_category).await;

        let response = server
            .get(endpoints::TRANSACTIONS)
            .authorization_bearer(&alice)
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        let transactions = body["transactions"].as_array().unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0]["id"], transaction_id);
    }

    #[tokio::test]
    async fn get_own_transaction_succeeds() {
        let server = get_test_server();
        let token = register_and_log_in(&server, "a@x.com").await;
        let category_id = create_test_category(&server, &token, "Food").await;
        let transaction_id = create_transaction(&server, &token, category_id).await;

        let response = server
            .get(&format_endpoint(endpoints::TRANSACTION, transaction_id))
            .authorization_bearer(&token)
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["transaction"]["amount"], "50.00");
    }

    #[tokio::test]
    async fn other_users_transaction_looks_missing() {
        let server = get_test_server();
        let alice = register_and_log_in(&server, "a@x.com").await;
        let bob = register_and_log_in(&server, "b@x.com").await;
        let category_id = create_test_category(&server, &alice, "Food").await;
        let transaction_id = create_transaction(&server, &alice, category_id).await;

        let not_owned = server
            .get(&format_endpoint(endpoints::TRANSACTION, transaction_id))
            .authorization_bearer(&bob)
            .await;
        let missing = server
            .get(&format_endpoint(endpoints::TRANSACTION, transaction_id + 100))
            .authorization_bearer(&bob)
            .await;

        assert_error(&not_owned, StatusCode::NOT_FOUND, "Transaction not found");
        assert_eq!(not_owned.as_bytes(), missing.as_bytes());
    }

    #[tokio::test]
    async fn non_integer_id_is_rejected() {
        let server = get_test_server();
        let token = register_and_log_in(&server, "a@x.com").await;

        let response = server
            .get("/api/transactions/1x")
            .authorization_bearer(&token)
            .await;

        assert_error(&response, StatusCode::BAD_REQUEST, "Invalid transaction ID");
    }
}
