//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Json, Router, middleware,
    routing::{get, patch, post},
};
use serde_json::{Value, json};

use crate::{
    AppState, Error,
    auth::{auth_guard, change_password, get_me, log_in},
    category::{
        create_category_endpoint, delete_category_endpoint, get_categories_endpoint,
        get_category_endpoint, update_category_endpoint,
    },
    endpoints,
    register_user::register_user,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_transaction_endpoint,
        get_transactions_endpoint, update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Every route that reads or changes a user's data sits behind [auth_guard].
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index))
        .route(endpoints::REGISTER, post(register_user))
        .route(endpoints::LOG_IN, post(log_in));

    let protected_routes = Router::new()
        .route(endpoints::ME, get(get_me))
        .route(endpoints::CHANGE_PASSWORD, patch(change_password))
        .route(
            endpoints::CATEGORIES,
            get(get_categories_endpoint).post(create_category_endpoint),
        )
        .route(
            endpoints::CATEGORY,
            get(get_category_endpoint)
                .put(update_category_endpoint)
                .delete(delete_category_endpoint),
        )
        .route(
            endpoints::TRANSACTIONS,
            get(get_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            get(get_transaction_endpoint)
                .put(update_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes
        .merge(unprotected_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// A greeting that confirms the API is up.
async fn get_index() -> Json<Value> {
    Json(json!({ "message": "Welcome to penny-wise API" }))
}

async fn get_404_not_found() -> Error {
    Error::NotFound
}

#[cfg(test)]
mod root_route_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        build_router, endpoints,
        test_utils::{assert_error, get_test_state},
    };

    fn get_test_server() -> TestServer {
        TestServer::new(build_router(get_test_state()))
    }

    #[tokio::test]
    async fn root_greets_client() {
        let server = get_test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>(),
            json!({ "message": "Welcome to penny-wise API" })
        );
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server();

        let response = server.get("/api/budgets").await;

        assert_error(&response, StatusCode::NOT_FOUND, "Not found");
    }

    #[tokio::test]
    async fn every_user_route_requires_a_token() {
        let server = get_test_server();

        let responses = [
            server.get(endpoints::ME).await,
            server.patch(endpoints::CHANGE_PASSWORD).await,
            server.get(endpoints::CATEGORIES).await,
            server.post(endpoints::CATEGORIES).await,
            server.get("/api/categories/1").await,
            server.put("/api/categories/1").await,
            server.delete("/api/categories/1").await,
            server.get(endpoints::TRANSACTIONS).await,
            server.post(endpoints::TRANSACTIONS).await,
            server.get("/api/transactions/1").await,
            server.put("/api/transactions/1").await,
            server.delete("/api/transactions/1").await,
        ];

        for response in responses {
            assert_error(&response, StatusCode::UNAUTHORIZED, "No token provided");
        }
    }
}
