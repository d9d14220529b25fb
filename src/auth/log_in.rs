//! Exchanges an email and password for a bearer token.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::json;

use crate::{
    AppState, Error,
    auth::TokenService,
    json::JsonBody,
    register_user::Credentials,
    user::get_user_by_email,
    validation::{required_text, validate_email},
};

/// The state needed to perform a login.
#[derive(Debug, Clone)]
pub struct LogInState {
    pub token_service: TokenService,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for LogInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            token_service: state.token_service.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handler for log-in requests.
///
/// On success the response holds a token for the user. An unknown email and a
/// wrong password give the same error.
///
/// # Errors
///
/// This function will return an error in a few situations.
/// - The email or password is missing, or the email is malformed.
/// - The email and password do not match a user.
/// - An internal error occurred when verifying the password or signing the token.
pub async fn log_in(
    State(state): State<LogInState>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> Result<Response, Error> {
    let email = validate_email(credentials.email.as_deref())?;
    let password = required_text(credentials.password.as_deref(), "Password is required")?;

    let user = {
        let connection = state
            .db_connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        match get_user_by_email(email, &connection) {
            Ok(user) => user,
            Err(Error::NotFound) => return Err(Error::InvalidCredentials),
            Err(error) => return Err(error),
        }
    };

    if !user.password_hash.verify(password)? {
        return Err(Error::InvalidCredentials);
    }

    let token = state.token_service.issue(user.id, &user.email)?;
    tracing::info!("User {} logged in", user.id);

    Ok(Json(json!({
        "message": "User successfully logged in",
        "token": token,
    }))
    .into_response())
}
