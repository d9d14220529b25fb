//! Creating new user accounts.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Deserialize;
use serde_json::json;

use crate::{
    AppState, Error, PasswordHash,
    json::JsonBody,
    user::{create_user, email_exists},
    validation::{required_text, validate_email},
};

/// The email and password sent to register or log in.
#[derive(Debug, Default, Deserialize)]
pub struct Credentials {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// The state needed for creating a new user.
#[derive(Debug, Clone)]
pub struct RegistrationState {
    pub db_connection: Arc<Mutex<Connection>>,
    /// The bcrypt cost used to hash the new user's password.
    pub password_cost: u32,
}

impl FromRef<AppState> for RegistrationState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            password_cost: state.password_cost,
        }
    }
}

/// A route handler for creating a new user.
///
/// The checks run in a fixed order and only the first failure is reported:
/// email present, email format, email not taken, password present.
///
/// # Errors
///
/// Returns a validation error or [Error::DuplicateEmail] with status 400, or
/// an internal error if hashing or the insert failed.
pub async fn register_user(
    State(state): State<RegistrationState>,
    JsonBody(credentials): JsonBody<Credentials>,
) -> Result<Response, Error> {
    let email = validate_email(credentials.email.as_deref())?;

    {
        let connection = state
            .db_connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        if email_exists(email, &connection)? {
            return Err(Error::DuplicateEmail);
        }
    }

    let password = required_text(credentials.password.as_deref(), "Password is required")?;
    let password_hash = PasswordHash::new(password, state.password_cost)?;

    // A concurrent registration may have taken the email since the check
    // above, in which case the UNIQUE constraint reports it.
    let user = {
        let connection = state
            .db_connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        create_user(email, password_hash, &connection)?
    };

    tracing::info!("Registered user {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully",
            "user": user,
        })),
    )
        .into_response())
}
