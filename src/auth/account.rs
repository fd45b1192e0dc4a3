//! The state and response types shared by the account endpoints.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use jsonwebtoken::EncodingKey;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Duration;

use crate::{
    AppState, Error,
    auth::{User, UserID, token::encode_token},
    response::ApiResponse,
};

/// The state needed to register users, log them in and edit their profile.
#[derive(Clone)]
pub struct AccountState {
    /// The key for signing access tokens.
    pub encoding_key: EncodingKey,
    /// How long an access token is valid for after it is issued.
    pub token_duration: Duration,
    /// The bcrypt cost used when hashing new passwords.
    pub password_cost: u32,
    /// The database connection for managing users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for AccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            encoding_key: state.encoding_key.clone(),
            token_duration: state.token_duration,
            password_cost: state.password_cost,
            db_connection: state.db_connection.clone(),
        }
    }
}

impl AccountState {
    /// Issue a new access token for `user_id`.
    pub fn issue_token(&self, user_id: UserID) -> Result<String, Error> {
        encode_token(user_id, self.token_duration, &self.encoding_key)
    }
}

/// The public view of a user. The password hash is never sent to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// The user's ID.
    pub id: UserID,
    /// The name the user goes by.
    pub name: String,
    /// The user's email address.
    pub email: String,
    /// A fresh access token, included when the user has just authenticated.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub token: Option<String>,
}

impl UserProfile {
    /// Create the public view of `user`, optionally with an access token.
    pub fn new(user: &User, token: Option<String>) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            token,
        }
    }
}

/// The response body for the account endpoints.
pub type ProfileResponse = ApiResponse<UserProfile>;
