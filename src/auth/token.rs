//! Signed access tokens (JSON Web Tokens) that identify the user making a request.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{Error, auth::UserID};

/// How long an access token is valid for if not configured otherwise.
pub const DEFAULT_TOKEN_DURATION: Duration = Duration::days(30);

/// The contents of a JSON Web Token.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct Claims {
    /// The user the token was issued to.
    pub user_id: UserID,
    /// The time the token was issued as a Unix timestamp.
    pub iat: u64,
    /// The expiry time of the token as a Unix timestamp.
    pub exp: u64,
}

/// Create a signed token for `user_id` that expires after `duration`.
///
/// # Errors
/// Returns [Error::TokenCreation] if the expiry time is out of range or the
/// token could not be signed.
pub fn encode_token(
    user_id: UserID,
    duration: Duration,
    encoding_key: &EncodingKey,
) -> Result<String, Error> {
    let now = OffsetDateTime::now_utc();
    let expires_at = now.checked_add(duration).ok_or_else(|| {
        Error::TokenCreation(format!("token duration {duration} is out of range"))
    })?;
    let claims = Claims {
        user_id,
        iat: now.unix_timestamp().max(0) as u64,
        exp: expires_at.unix_timestamp().max(0) as u64,
    };

    encode(&Header::default(), &claims, encoding_key)
        .map_err(|error| Error::TokenCreation(error.to_string()))
}

/// Verify the signature and expiry of `token` and return its claims.
///
/// # Errors
/// Returns [Error::Unauthenticated] if the token is malformed, has an invalid signature or has expired.
pub fn decode_token(token: &str, decoding_key: &DecodingKey) -> Result<Claims, Error> {
    decode::<Claims>(token, decoding_key, &Validation::default())
        .map(|token_data| token_data.claims)
        .map_err(|error| {
            tracing::debug!("Rejected access token: {error}");
            Error::Unauthenticated
        })
}

#[cfg(test)]
mod token_tests {
    use jsonwebtoken::{DecodingKey, EncodingKey};
    use time::Duration;

    use crate::{
        Error, UserID,
        auth::token::{DEFAULT_TOKEN_DURATION, decode_token, encode_token},
    };

    const SECRET: &[u8] = b"foobar";

    #[test]
    fn decode_gives_original_user_id() {
        let user_id = UserID::new(7);
        let token = encode_token(
            user_id,
            DEFAULT_TOKEN_DURATION,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let claims = decode_token(&token, &DecodingKey::from_secret(SECRET)).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn decode_fails_with_wrong_secret() {
        let token = encode_token(
            UserID::new(7),
            DEFAULT_TOKEN_DURATION,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let result = decode_token(&token, &DecodingKey::from_secret(b"not the secret"));

        assert_eq!(result, Err(Error::Unauthenticated));
    }

    #[test]
    fn decode_fails_on_expired_token() {
        // Well past the default leeway of 60 seconds.
        let token = encode_token(
            UserID::new(7),
            Duration::minutes(-5),
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        let result = decode_token(&token, &DecodingKey::from_secret(SECRET));

        assert_eq!(result, Err(Error::Unauthenticated));
    }

    #[test]
    fn encode_fails_when_expiry_overflows() {
        let result = encode_token(
            UserID::new(7),
            Duration::MAX,
            &EncodingKey::from_secret(SECRET),
        );

        assert!(matches!(result, Err(Error::TokenCreation(_))));
    }

    #[test]
    fn decode_fails_on_garbage() {
        let result = decode_token("FOOBAR", &DecodingKey::from_secret(SECRET));

        assert_eq!(result, Err(Error::Unauthenticated));
    }
}
