//! Endpoints for viewing and editing the signed-in user's profile.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    auth::{
        PasswordHash, Session, ValidatedPassword,
        account::{AccountState, ProfileResponse, UserProfile},
        user::{get_user_by_id, update_user, validate_email, validate_name},
    },
    extract::ApiJson,
};

/// Get the profile of the user making the request.
pub async fn get_me(
    State(state): State<AccountState>,
    session: Session,
) -> Result<Json<ProfileResponse>, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let user = match get_user_by_id(session.user_id, &connection) {
        Ok(user) => user,
        // The token outlived its user.
        Err(Error::NotFound) => return Err(Error::Unauthenticated),
        Err(error) => return Err(error),
    };

    Ok(Json(ProfileResponse::new(UserProfile::new(&user, None))))
}

/// The fields a user may change on their profile. Omitted fields are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileForm {
    /// The new display name.
    pub name: Option<String>,
    /// The new email address.
    pub email: Option<String>,
    /// The new password, in plain text.
    pub password: Option<String>,
}

/// Update the profile of the user making the request.
///
/// Responds with the updated profile and a fresh access token.
///
/// # Errors
///
/// Returns a:
/// - [Error::Validation] or [Error::TooWeak] if a new value is invalid,
/// - [Error::DuplicateEmail] if the new email address belongs to another user.
pub async fn update_profile(
    State(state): State<AccountState>,
    session: Session,
    ApiJson(form): ApiJson<ProfileForm>,
) -> Result<Json<ProfileResponse>, Error> {
    let user = {
        let connection = state
            .db_connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        match get_user_by_id(session.user_id, &connection) {
            Ok(user) => user,
            Err(Error::NotFound) => return Err(Error::Unauthenticated),
            Err(error) => return Err(error),
        }
    };

    let name = match form.name {
        Some(name) => validate_name(&name)?,
        None => user.name,
    };

    let email = match form.email {
        Some(email) => validate_email(&email)?,
        None => user.email,
    };

    let password_hash = match form.password {
        Some(password) => {
            let password = ValidatedPassword::new(&password, &[&name, &email])?;
            PasswordHash::new(password, state.password_cost)?
        }
        None => user.password_hash,
    };

    let updated_user = {
        let connection = state
            .db_connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        update_user(user.id, &name, &email, &password_hash, &connection)?
    };

    tracing::info!("Updated profile of user {}", updated_user.id);

    let token = state.issue_token(updated_user.id)?;

    Ok(Json(ProfileResponse::new(UserProfile::new(&updated_user, Some(token)))))
}
