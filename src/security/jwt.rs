use crate::api::config::Config;
use crate::security::errors::AuthError;
use crate::security::session::Session;
use serde::{Deserialize, Serialize};

/// Verifies bearer tokens issued by the external identity provider.
/// This service never mints tokens for end users; it only checks the
/// shared-secret signature and lifts the claims into a `Session`.
pub struct JwtService;

impl JwtService {
    pub fn new() -> Self {
        JwtService
    }

    pub fn decode_token(&self, token: &str) -> Result<AccessClaims, AuthError> {
        let validation = jsonwebtoken::Validation::default();

        let token_data = jsonwebtoken::decode::<AccessClaims>(
            token,
            &jsonwebtoken::DecodingKey::from_secret(Config::default().jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

        Ok(token_data.claims)
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (the identity provider's uid)
    pub sub: String,
    /// Issued at (as UTC timestamp)
    pub iat: usize,
    /// Expiration time (as UTC timestamp)
    pub exp: usize,
    pub email: Option<String>,
    /// Anonymous/guest identities may carry tokens too; they are never
    /// allowed to place orders.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_anonymous: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub admin: bool,
}

impl AccessClaims {
    pub fn into_session(self) -> Session {
        Session {
            uid: self.sub,
            email: self.email,
            is_anonymous: self.is_anonymous,
            admin: self.admin,
        }
    }
}
