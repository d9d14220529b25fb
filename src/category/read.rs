//! Endpoints for reading a user's categories.

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
    owned::{select_all_owned, select_owned},
};

/// List the signed-in user's categories ordered by name.
pub async fn get_categories_endpoint(
    State(state): State<CategoryState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let categories: Vec<Category> = select_all_owned(user.user_id, &connection)?;

    Ok(Json(json!({ "categories": categories })).into_response())
}

/// Get one of the signed-in user's categories.
///
/// # Errors
///
/// Returns "Invalid category ID" for a non-integer ID and
/// [Error::CategoryNotFound] if the category is missing or not owned by the user.
pub async fn get_category_endpoint(
    State(state): State<CategoryState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(raw_id): Path<String>,
) -> Result<Response, Error> {
    let category_id = parse_category_id(&raw_id)?;
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let category: Category = select_owned(category_id, user.user_id, &connection)?;

    Ok(Json(json!({ "category": category })).into_response())
}
