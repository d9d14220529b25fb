//! Signed, time-limited bearer tokens that carry a user's identity.

use std::fmt::Debug;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{Error, UserID};

/// How long a token is valid for after it is issued.
pub const DEFAULT_TOKEN_DURATION: Duration = Duration::hours(24);

/// The claims encoded in a token.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    /// The user the token was issued to.
    pub user_id: UserID,
    /// The user's email at the time the token was issued.
    pub email: String,
    /// Issued at, as a Unix timestamp in seconds.
    pub iat: i64,
    /// Expires at, as a Unix timestamp in seconds.
    pub exp: i64,
}

/// Issues and verifies tokens with a process-wide signing secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    duration: Duration,
}

impl Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("duration", &self.duration)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Create a token service that signs tokens with `secret`, valid for `duration`.
    pub fn new(secret: &str, duration: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            duration,
        }
    }

    /// Issue a token for the user that expires after the configured duration.
    ///
    /// # Errors
    ///
    /// Returns an [Error::TokenCreation] if the token could not be signed.
    pub fn issue(&self, user_id: UserID, email: &str) -> Result<String, Error> {
        self.issue_at(user_id, email, OffsetDateTime::now_utc())
    }

    /// Issue a token as if it were issued at `issued_at`.
    pub fn issue_at(
        &self,
        user_id: UserID,
        email: &str,
        issued_at: OffsetDateTime,
    ) -> Result<String, Error> {
        let claims = Claims {
            user_id,
            email: email.to_owned(),
            iat: issued_at.unix_timestamp(),
            exp: (issued_at + self.duration).unix_timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|error| Error::TokenCreation(error.to_string()))
    }

    /// Check the signature and expiry of `token` and return its claims.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidToken] for malformed, mis-signed or expired
    /// tokens. The reason is only logged.
    pub fn verify(&self, token: &str) -> Result<Claims, Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|error| {
                tracing::debug!("Rejected token: {error}");
                Error::InvalidToken
            })
    }
}

#[cfg(test)]
mod token_tests {
    use time::{Duration, OffsetDateTime};

    use crate::{Error, UserID};

    use super::{DEFAULT_TOKEN_DURATION, TokenService};

    fn get_token_service() -> TokenService {
        TokenService::new("a test secret", DEFAULT_TOKEN_DURATION)
    }

    #[test]
    fn verify_returns_issued_identity() {
        let service = get_token_service();
        let token = service.issue(UserID::new(3), "a@x.com").unwrap();

        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.user_id, UserID::new(3));
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn claims_use_camel_case_keys() {
        let service = get_token_service();
        let token = service.issue(UserID::new(3), "a@x.com").unwrap();
        let claims = service.verify(&token).unwrap();

        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(value["userId"], 3);
        assert!(value.get("user_id").is_none());
    }

    #[test]
    fn expired_token_is_invalid() {
        let service = get_token_service();
        let issued_at = OffsetDateTime::now_utc() - Duration::hours(25);
        let token = service
            .issue_at(UserID::new(3), "a@x.com", issued_at)
            .unwrap();

        assert_eq!(service.verify(&token), Err(Error::InvalidToken));
    }

    #[test]
    fn token_signed_with_other_secret_is_invalid() {
        let other = TokenService::new("another secret", DEFAULT_TOKEN_DURATION);
        let token = other.issue(UserID::new(3), "a@x.com").unwrap();

        assert_eq!(get_token_service().verify(&token), Err(Error::InvalidToken));
    }

    #[test]
    fn tampered_token_is_invalid() {
        let service = get_token_service();
        let token = service.issue(UserID::new(3), "a@x.com").unwrap();
        let signature_start = token.rfind('.').unwrap() + 1;
        let first = &token[signature_start..=signature_start];
        let replacement = if first == "A" { "B" } else { "A" };
        let tampered = format!(
            "{}{}{}",
            &token[..signature_start],
            replacement,
            &token[signature_start + 1..]
        );

        assert_eq!(service.verify(&tampered), Err(Error::InvalidToken));
        assert_eq!(service.verify("not.a.token"), Err(Error::InvalidToken));
    }
}
