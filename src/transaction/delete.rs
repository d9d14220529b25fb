//! Transaction deletion endpoint.

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    Error,
    auth::AuthenticatedUser,
    owned::delete_owned,
    transaction::{Transaction, TransactionState, parse_transaction_id},
};

/// Delete one of the signed-in user's transactions and return it.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(raw_id): Path<String>,
) -> Result<Response, Error> {
    let transaction_id = parse_transaction_id(&raw_id)?;
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let transaction: Transaction = delete_owned(transaction_id, user.user_id, &connection)?;

    Ok(Json(json!({
        "message": "Transaction deleted successfully",
        "transaction": transaction,
    }))
    .into_response())
}
