//! A JSON body extractor that reports parse failures in the app's error format.

use axum::extract::{FromRequest, rejection::JsonRejection};

use crate::Error;

/// Extracts a JSON request body like [axum::Json], but rejects malformed bodies
/// with [Error::InvalidJson] so the client gets a `{"error": ...}` body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct JsonBody<T>(pub T);

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidJson(rejection.body_text())
    }
}
