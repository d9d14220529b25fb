//! The signed-in user's own account: profile lookup and password changes.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Json,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Deserialize;
use serde_json::json;

use crate::{
    AppState, Error, PasswordHash,
    auth::{AuthenticatedUser, TokenService},
    json::JsonBody,
    user::{get_user_by_id, update_password_hash},
    validation::required_text,
};

/// The shortest new password accepted when changing passwords.
const MIN_PASSWORD_LENGTH: usize = 8;

/// The state needed for the account endpoints.
#[derive(Debug, Clone)]
pub struct AccountState {
    pub db_connection: Arc<Mutex<Connection>>,
    pub token_service: TokenService,
    pub password_cost: u32,
}

impl FromRef<AppState> for AccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            token_service: state.token_service.clone(),
            password_cost: state.password_cost,
        }
    }
}

/// Get the profile of the user the token was issued to.
///
/// # Errors
///
/// Returns [Error::UserNotFound] if the account no longer exists.
pub async fn get_me(
    State(state): State<AccountState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let user = get_user_by_id(user.user_id, &connection).map_err(|error| match error {
        Error::NotFound => Error::UserNotFound,
        error => error,
    })?;

    Ok(Json(json!({ "user": user })).into_response())
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordData {
    current_password: Option<String>,
    new_password: Option<String>,
}

/// Replace the signed-in user's password and issue a fresh token.
///
/// # Errors
///
/// Returns a validation error for a missing, short or unchanged new password,
/// [Error::IncorrectPassword] if the current password does not match, or
/// [Error::UserNotFound] if the account no longer exists.
pub async fn change_password(
    State(state): State<AccountState>,
    Extension(user): Extension<AuthenticatedUser>,
    JsonBody(data): JsonBody<ChangePasswordData>,
) -> Result<Response, Error> {
    let current_password = required_text(
        data.current_password.as_deref(),
        "Current password is required",
    )?;
    let new_password = required_text(data.new_password.as_deref(), "New password is required")?;

    if new_password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(Error::Validation(
            "New password must be at least 8 characters long",
        ));
    }

    if new_password == current_password {
        return Err(Error::Validation(
            "New password must be different from current password",
        ));
    }

    let stored_user = {
        let connection = state
            .db_connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        get_user_by_id(user.user_id, &connection).map_err(|error| match error {
            Error::NotFound => Error::UserNotFound,
            error => error,
        })?
    };

    if !stored_user.password_hash.verify(current_password)? {
        return Err(Error::IncorrectPassword);
    }

    let password_hash = PasswordHash::new(new_password, state.password_cost)?;
    {
        let connection = state
            .db_connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        update_password_hash(stored_user.id, &password_hash, &connection)?;
    }

    let token = state
        .token_service
        .issue(stored_user.id, &stored_user.email)?;
    tracing::info!("User {} changed their password", stored_user.id);

    Ok(Json(json!({
        "message": "Password updated successfully",
        "token": token,
    }))
    .into_response())
}
