//! The per-request session that identifies the user making a request.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use jsonwebtoken::DecodingKey;

use crate::{
    AppState, Error,
    auth::{UserID, token::decode_token},
};

/// The state needed to verify access tokens.
#[derive(Clone)]
pub struct AuthState {
    /// The key for verifying access tokens.
    pub decoding_key: DecodingKey,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            decoding_key: state.decoding_key.clone(),
        }
    }
}

/// The authenticated user for a single request.
///
/// Add a `session: Session` argument to a route handler to require a valid
/// `Authorization: Bearer <token>` header. Requests without one are rejected
/// with [Error::Unauthenticated] before the handler runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Session {
    /// The user the access token was issued to.
    pub user_id: UserID,
}

impl<S> FromRequestParts<S> for Session
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| Error::Unauthenticated)?;

        let auth_state = AuthState::from_ref(state);
        let claims = decode_token(bearer.token(), &auth_state.decoding_key)?;

        Ok(Session {
            user_id: claims.user_id,
        })
    }
}
