//! Defines the app level error type and its conversion to JSON error responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
///
/// For the client facing variants, the display string is the exact message
/// sent to the client in the `error` field of the response body.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A field in the request failed validation.
    ///
    /// Only the message for the first rule that failed is reported.
    #[error("{0}")]
    Validation(&'static str),

    /// The request body could not be parsed as JSON of the expected shape.
    ///
    /// The inner string holds the parser's explanation and is only logged.
    #[error("Invalid JSON body")]
    InvalidJson(String),

    /// The email used for registration already belongs to a user.
    #[error("Email already exists")]
    DuplicateEmail,

    /// The user already has a category with the same name, ignoring case.
    #[error("Category already exists")]
    DuplicateCategory,

    /// A partial update did not contain any field that can be updated.
    #[error("No fields to update")]
    NoFieldsToUpdate,

    /// The request did not include a bearer token.
    #[error("No token provided")]
    MissingToken,

    /// The bearer token was malformed, signed with the wrong key or expired.
    ///
    /// The reason is deliberately not exposed to the client.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The email and password combination did not match a registered user.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The current password given when changing passwords was wrong.
    #[error("Current password is incorrect")]
    IncorrectPassword,

    /// The user referred to by a valid token no longer exists.
    #[error("User not found")]
    UserNotFound,

    /// The category does not exist or belongs to another user.
    #[error("Category not found")]
    CategoryNotFound,

    /// The transaction does not exist or belongs to another user.
    #[error("Transaction not found")]
    TransactionNotFound,

    /// The requested route or row could not be found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("Not found")]
    NotFound,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The token could not be signed.
    #[error("could not create token: {0}")]
    TokenCreation(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl Error {
    /// The HTTP status code used when this error is sent to the client.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_)
            | Error::InvalidJson(_)
            | Error::DuplicateEmail
            | Error::DuplicateCategory
            | Error::NoFieldsToUpdate => StatusCode::BAD_REQUEST,
            Error::MissingToken
            | Error::InvalidToken
            | Error::InvalidCredentials
            | Error::IncorrectPassword => StatusCode::UNAUTHORIZED,
            Error::UserNotFound
            | Error::CategoryNotFound
            | Error::TransactionNotFound
            | Error::NotFound => StatusCode::NOT_FOUND,
            Error::HashingError(_)
            | Error::TokenCreation(_)
            | Error::SqlError(_)
            | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("user.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("category.name") =>
            {
                Error::DuplicateCategory
            }
            // Code 787 occurs when a FOREIGN KEY constraint failed. The
            // category is the only foreign key that comes from client input.
            rusqlite::Error::SqliteFailure(sql_error, _) if sql_error.extended_code == 787 => {
                Error::CategoryNotFound
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = match self {
            Error::InvalidJson(ref reason) => {
                tracing::debug!("Rejected request body: {reason}");
                self.to_string()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            ref error if status == StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!("An unexpected error occurred: {}", error);
                "Internal server error".to_owned()
            }
            error => error.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
