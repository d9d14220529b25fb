//! Bearer token authentication: issuing tokens at log-in, guarding protected
//! routes, and the signed-in user's account endpoints.

mod account;
mod log_in;
mod middleware;
mod token;

pub use account::{change_password, get_me};
pub use log_in::log_in;
pub use middleware::auth_guard;
pub use token::{Claims, DEFAULT_TOKEN_DURATION, TokenService};

use crate::UserID;

/// The identity verified by [auth_guard].
///
/// Protected handlers receive it with `Extension(user): Extension<AuthenticatedUser>`.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: UserID,
    pub email: String,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
        }
    }
}
