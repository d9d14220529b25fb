//! Category deletion endpoint.

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    Error,
    auth::AuthenticatedUser,
    category::{Category, CategoryState, parse_category_id},
    owned::delete_owned,
};

/// Delete one of the signed-in user's categories along with its transactions.
///
/// The deleted category is returned in the response.
pub async fn delete_category_endpoint(
    State(state): State<CategoryState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(raw_id): Path<String>,
) -> Result<Response, Error> {
    let category_id = parse_category_id(&raw_id)?;
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let category: Category = delete_owned(category_id, user.user_id, &connection)?;
    tracing::info!("User {} deleted category {}", user.user_id, category.id);

    Ok(Json(json!({
        "message": "Category deleted successfully",
        "category": category,
    }))
    .into_response())
}
