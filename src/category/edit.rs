//! Category editing endpoint.

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value, json};

use crate::{
    Error,
    auth::AuthenticatedUser,
    category::{Category, CategoryState, parse_category_id},
    json::JsonBody,
    owned::select_owned,
    update_set::UpdateSet,
};

/// Validate the editable fields of a category update.
///
/// Only `name` and `color` are read, every other key is ignored. An empty or
/// null `color` leaves the colour as it is.
fn category_update(body: &Map<String, Value>) -> Result<UpdateSet, Error> {
    let mut update = UpdateSet::new();

    if let Some(name) = body.get("name") {
        match name.as_str() {
            Some(name) if !name.trim().is_empty() => update.set("name", name.to_owned()),
            _ => return Err(Error::Validation("Name cannot be empty")),
        }
    }

    match body.get("color") {
        None | Some(Value::Null) => {}
        Some(Value::String(color)) if color.is_empty() => {}
        Some(Value::String(color)) => update.set("color", color.to_owned()),
        Some(_) => return Err(Error::Validation("Color must be a string")),
    }

    Ok(update)
}

/// Apply a partial update to one of the signed-in user's categories.
///
/// # Errors
///
/// Returns [Error::CategoryNotFound] before any validation if the category is
/// missing or not owned by the user, then a validation error,
/// [Error::NoFieldsToUpdate] or [Error::DuplicateCategory].
pub async fn update_category_endpoint(
    State(state): State<CategoryState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(raw_id): Path<String>,
    JsonBody(body): JsonBody<Map<String, Value>>,
) -> Result<Response, Error> {
    let category_id = parse_category_id(&raw_id)?;
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    select_owned::<Category>(category_id, user.user_id, &connection)?;

    let category: Category =
        category_update(&body)?.apply(category_id, user.user_id, &connection)?;

    Ok(Json(json!({
        "message": "Category updated successfully",
        "category": category,
    }))
    .into_response())
}


#[cfg(test)]
mod update_category_endpoint_tests {
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

    #[tokio::test]
    async fn update_name_keeps_color() {
        let server = get_test_server();
        let token = register_and_log_in(&server, "a@x.com").await;
        let category_id = create_test_category(&server, &token, "Food").await;

        let response = server
            .put(&format_endpoint(endpoints::CATEGORY, category_id))
            .authorization_bearer(&token)
            .json(&json!({ "name": "Groceries", "color": "" }))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["message"], "Category updated successfully");
        assert_eq!(body["category"]["name"], "Groceries");
        assert_eq!(body["category"]["color"], "#ff0000");
    }

    #[tokio::test]
    async fn protected_fields_are_not_changed() {
        let server = get_test_server();
        let token = register_and_log_in(&server, "a@x.com").await;
        let category_id = create_test_category(&server, &token, "Food").await;
        let before = server
            .get(&format_endpoint(endpoints::CATEGORY, category_id))
            .authorization_bearer(&token)
            .await
            .json::<Value>();

        let response = server
            .put(&format_endpoint(endpoints::CATEGORY, category_id))
            .authorization_bearer(&token)
            .json(&json!({ "id": 999, "user_id": 999, "color": "#00ff00" }))
            .await;

        response.assert_status_ok();
        let category = &response.json::<Value>()["category"];
        assert_eq!(category["id"], before["category"]["id"]);
        assert_eq!(category["user_id"], before["category"]["user_id"]);
        assert_eq!(category["color"], "#00ff00");
    }

    #[tokio::test]
    async fn empty_update_is_rejected() {
        let server = get_test_server();
        let token = register_and_log_in(&server, "a@x.com").await;
        let category_id = create_test_category(&server, &token, "Food").await;

        let response = server
            .put(&format_endpoint(endpoints::CATEGORY, category_id))
            .authorization_bearer(&token)
            .json(&json!({}))
            .await;

        assert_error(&response, StatusCode::BAD_REQUEST, "No fields to update");
    }

    #[tokio::test]
    async fn rename_to_existing_name_is_rejected() {
        let server = get_test_server();
        let token = register_and_log_in(&server, "a@x.com").await;
        create_test_category(&server, &token, "Food").await;
        let category_id = create_test_category(&server, &token, "Rent").await;

        let response = server
            .put(&format_endpoint(endpoints::CATEGORY, category_id))
            .authorization_bearer(&token)
            .json(&json!({ "name": "food" }))
            .await;

        assert_error(&response, StatusCode::BAD_REQUEST, "Category already exists");
    }

    #[tokio::test]
    async fn changing_case_of_own_name_succeeds() {
        let server = get_test_server();
        let token = register_and_log_in(&server, "a@x.com").await;
        let category_id = create_test_category(&server, &token, "Food").await;

        let response = server
            .put(&format_endpoint(endpoints::CATEGORY, category_id))
            .authorization_bearer(&token)
            .json(&json!({ "name": "FOOD" }))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["category"]["name"], "FOOD");
    }

    #[tokio::test]
    async fn ownership_is_checked_before_validation() {
        let server = get_test_server();
        let alice = register_and_log_in(&server, "a@x.com").await;
        let bob = register_and_log_in(&server, "b@x.com").await;
        let category_id = create_test_category(&server, &alice, "Food").await;

        let response = server
            .put(&format_endpoint(endpoints::CATEGORY, category_id))
            .authorization_bearer(&bob)
            .json(&json!({ "name": "" }))
            .await;

        assert_error(&response, StatusCode::NOT_FOUND, "Category not found");
    }
}
