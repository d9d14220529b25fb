//! Transaction editing endpoint.

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value, json};

use crate::{
    Error,
    auth::AuthenticatedUser,
    category::Category,
    json::JsonBody,
    owned::select_owned,
    transaction::{
        Transaction, TransactionState, fields::validate_transaction_update, parse_transaction_id,
    },
};

/// Apply a partial update to one of the signed-in user's transactions.
///
/// # Errors
///
/// Returns [Error::TransactionNotFound] before any validation if the
/// transaction is missing or not owned by the user, then a validation error,
/// [Error::CategoryNotFound] for a category the user does not own, or
/// [Error::NoFieldsToUpdate].
pub async fn update_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(raw_id): Path<String>,
    JsonBody(body): JsonBody<Map<String, Value>>,
) -> Result<Response, Error> {
    let transaction_id = parse_transaction_id(&raw_id)?;
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    select_owned::<Transaction>(transaction_id, user.user_id, &connection)?;

    let update = validate_transaction_update(&body)?;

    if let Some(category_id) = update.category_id {
        select_owned::<Category>(category_id, user.user_id, &connection)?;
    }

    let transaction: Transaction = update
        .columns
        .apply(transaction_id, user.user_id, &connection)?;

    Ok(Json(json!({
        "message": "Transaction updated successfully",
        "transaction": transaction,
    }))
    .into_response())
}
