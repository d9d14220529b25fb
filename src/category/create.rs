//! Category creation endpoint.

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
    category::{CategoryState, category_name_exists, create_category},
    json::JsonBody,
    validation::required_text,
};

/// Create a category for the signed-in user.
///
/// Only `name` and `color` are read from the body. The owner always comes from
/// the token, so any user ID in the body is ignored.
///
/// # Errors
///
/// Returns "Name is required", "Color is required" or "Category already
/// exists", checked in that order. A field that is not a string counts as
/// missing.
pub async fn create_category_endpoint(
    State(state): State<CategoryState>,
    Extension(user): Extension<AuthenticatedUser>,
    JsonBody(body): JsonBody<Map<String, Value>>,
) -> Result<Response, Error> {
    let name = required_text(
        body.get("name").and_then(Value::as_str),
        "Name is required",
    )?;
    let color = required_text(
        body.get("color").and_then(Value::as_str),
        "Color is required",
    )?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    if category_name_exists(user.user_id, name, &connection)? {
        return Err(Error::DuplicateCategory);
    }

    let category = create_category(user.user_id, name, color, &connection)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Category created successfully",
            "category": category,
        })),
    )
        .into_response())
}
