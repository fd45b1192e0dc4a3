//! The endpoint for exchanging an email address and password for an access token.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    auth::{
        account::{AccountState, ProfileResponse, UserProfile},
        user::get_user_by_email,
    },
    extract::ApiJson,
};

/// The raw data entered by the user in the log-in form.
///
/// The password is stored as a plain string. There is no need for validation here since
/// it will be compared against the password in the database, which has been verified.
#[derive(Clone, Serialize, Deserialize)]
pub struct LogInForm {
    /// Email address entered during log-in.
    pub email: String,
    /// Password entered during log-in.
    pub password: String,
}

/// Handler for log-in requests.
///
/// # Errors
///
/// Returns [Error::InvalidCredentials] if the email address is unknown or the
/// password is wrong. The two cases are indistinguishable to the client.
pub async fn log_in(
    State(state): State<AccountState>,
    ApiJson(form): ApiJson<LogInForm>,
) -> Result<Json<ProfileResponse>, Error> {
    let email = form.email.trim().to_lowercase();

    let user = {
        let connection = state
            .db_connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        match get_user_by_email(&email, &connection) {
            Ok(user) => user,
            Err(Error::NotFound) => return Err(Error::InvalidCredentials),
            Err(error) => return Err(error),
        }
    };

    let is_password_valid = user.password_hash.verify(&form.password).map_err(|error| {
        tracing::error!("Unhandled error while verifying credentials: {error}");
        Error::HashingError(error.to_string())
    })?;

    if !is_password_valid {
        tracing::debug!("Failed log-in attempt for user {}", user.id);
        return Err(Error::InvalidCredentials);
    }

    let token = state.issue_token(user.id)?;

    Ok(Json(ProfileResponse::new(UserProfile::new(&user, Some(token)))))
}
