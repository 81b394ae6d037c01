use crate::api::errors::APIErrors;
use crate::security::jwt::{AccessClaims, JwtService};
use crate::security::session::Session;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::RequestPartsExt;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;

/// Header guests identify their device with when no bearer token is
/// present.
const GUEST_ID_HEADER: &str = "x-guest-id";

impl<S> FromRequestParts<S> for AccessClaims
where
    S: Send + Sync,
{
    type Rejection = APIErrors;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        decode_token_from_request_parts(parts).await
    }
}

/// The session a request acts under: claims when a valid bearer token
/// is present, a guest session from the device id header otherwise.
#[derive(Debug, Clone)]
pub struct ShopSession(pub Session);

impl<S> FromRequestParts<S> for ShopSession
where
    S: Send + Sync,
{
    type Rejection = APIErrors;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if parts.headers.contains_key(axum::http::header::AUTHORIZATION) {
            let claims = decode_token_from_request_parts(parts).await?;
            return Ok(ShopSession(claims.into_session()));
        }

        let guest_id = parts
            .headers
            .get(GUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                tracing::error!("Request carries neither bearer token nor guest id");
                APIErrors::Unauthorized
            })?;

        Ok(ShopSession(Session::guest(guest_id)))
    }
}

async fn decode_token_from_request_parts(parts: &mut Parts) -> Result<AccessClaims, APIErrors> {
    let tokenizer = JwtService::new();

    let TypedHeader(Authorization(bearer)) = parts
        .extract::<TypedHeader<Authorization<Bearer>>>()
        .await
        .map_err(|_| {
            tracing::error!("Invalid authorization header");
            APIErrors::Unauthorized
        })?;

    let claims = tokenizer.decode_token(bearer.token()).map_err(|e| {
        tracing::error!("Token decoding error: {:?}", e);
        APIErrors::Unauthorized
    })?;

    Ok(claims)
}
