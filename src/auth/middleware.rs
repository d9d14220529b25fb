//! Authentication middleware that verifies bearer tokens.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};

use crate::{
    Error,
    auth::{AuthenticatedUser, TokenService},
};

/// Middleware function that checks for a valid bearer token in the
/// `Authorization` header.
///
/// The verified identity is placed into the request as an [AuthenticatedUser]
/// extension and the request is executed normally. Otherwise the request is
/// rejected with 401 and the handler never runs.
pub async fn auth_guard(
    State(token_service): State<TokenService>,
    bearer: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    mut request: Request,
    next: Next,
) -> Result<Response, Error> {
    let TypedHeader(Authorization(bearer)) = bearer.map_err(|rejection| {
        if rejection.is_missing() {
            Error::MissingToken
        } else {
            Error::InvalidToken
        }
    })?;

    let claims = token_service.verify(bearer.token())?;

    request
        .extensions_mut()
        .insert(AuthenticatedUser::from(claims));

    Ok(next.run(request).await)
}
