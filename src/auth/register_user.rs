//! The endpoint for creating a new user account.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    auth::{
        PasswordHash, ValidatedPassword,
        account::{AccountState, ProfileResponse, UserProfile},
        user::{create_user, validate_email, validate_name},
    },
    extract::ApiJson,
};

/// The data a client sends to create an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterForm {
    /// The name the user goes by.
    pub name: String,
    /// The email address the user logs in with.
    pub email: String,
    /// The user's chosen password, in plain text.
    pub password: String,
}

/// Create a new user and log them in.
///
/// Responds with `201 Created`, the new user's profile and an access token.
///
/// # Errors
///
/// Returns a:
/// - [Error::Validation] if the name or email address is invalid,
/// - [Error::TooWeak] if the password is too easy to guess,
/// - [Error::DuplicateEmail] if the email address is already registered.
pub async fn register_user(
    State(state): State<AccountState>,
    ApiJson(form): ApiJson<RegisterForm>,
) -> Result<(StatusCode, Json<ProfileResponse>), Error> {
    let name = validate_name(&form.name)?;
    let email = validate_email(&form.email)?;
    let password = ValidatedPassword::new(&form.password, &[&name, &email])?;
    let password_hash = PasswordHash::new(password, state.password_cost)?;

    let user = {
        let connection = state
            .db_connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        create_user(&name, &email, password_hash, &connection)?
    };

    tracing::info!("Registered user {}", user.id);

    let token = state.issue_token(user.id)?;

    Ok((
        StatusCode::CREATED,
        Json(ProfileResponse::new(UserProfile::new(&user, Some(token)))),
    ))
}
