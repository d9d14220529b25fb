//! Transaction creation endpoint.

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value, json};

use crate::{
    Error,
    auth::AuthenticatedUser,
    category::Category,
    json::JsonBody,
    owned::select_owned,
    transaction::{TransactionState, create_transaction, validate_new_transaction},
};

/// Record a transaction for the signed-in user.
///
/// The owner comes from the token and the category must belong to the same user.
///
/// # Errors
///
/// Returns the first failing validation error, then [Error::CategoryNotFound]
/// if the category is missing or not owned by the user.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(user): Extension<AuthenticatedUser>,
    JsonBody(body): JsonBody<Map<String, Value>>,
) -> Result<Response, Error> {
    let new_transaction = validate_new_transaction(&body)?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    select_owned::<Category>(new_transaction.category_id, user.user_id, &connection)?;

    let transaction = create_transaction(user.user_id, new_transaction, &connection)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Transaction created successfully",
            "transaction": transaction,
        })),
    )
        .into_response())
}
