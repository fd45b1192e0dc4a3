//! Code for creating the user table and fetching users from the database.

use std::fmt::Display;

use email_address::EmailAddress;
use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, PasswordHash};

/// The maximum number of characters in a user's display name.
pub const MAX_NAME_LENGTH: usize = 50;

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A user of the application.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The name the user goes by.
    pub name: String,
    /// The user's email address, always lower-case.
    pub email: String,
    /// The user's password hash.
    pub password_hash: PasswordHash,
    /// When the user registered.
    pub created_at: OffsetDateTime,
}

/// Check and normalise a display name.
///
/// # Errors
/// Returns [Error::Validation] if the name is empty or too long.
pub fn validate_name(name: &str) -> Result<String, Error> {
    let name = name.trim();

    if name.is_empty() {
        return Err(Error::Validation("Please provide a name".to_owned()));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(Error::Validation(format!(
            "Name cannot be more than {MAX_NAME_LENGTH} characters"
        )));
    }

    Ok(name.to_owned())
}

/// Check and normalise an email address.
///
/// Email addresses are compared case-insensitively, so they are stored in lower-case.
///
/// # Errors
/// Returns [Error::Validation] if the email address is not valid.
pub fn validate_email(email: &str) -> Result<String, Error> {
    let email = email.trim().to_lowercase();

    if EmailAddress::is_valid(&email) {
        Ok(email)
    } else {
        Err(Error::Validation("Please provide a valid email".to_owned()))
    }
}

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                created_at TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Create and insert a new user into the database.
///
/// `name` and `email` are expected to have been checked with [validate_name]
/// and [validate_email].
///
/// # Errors
///
/// Returns a:
/// - [Error::DuplicateEmail] if another user already has `email`,
/// - or [Error::SqlError] if an SQL related error occurred.
pub fn create_user(
    name: &str,
    email: &str,
    password_hash: PasswordHash,
    connection: &Connection,
) -> Result<User, Error> {
    connection
        .prepare(
            "INSERT INTO user (name, email, password, created_at) VALUES (?1, ?2, ?3, ?4)
             RETURNING id, name, email, password, created_at",
        )?
        .query_row(
            params![
                name,
                email,
                password_hash.as_ref(),
                OffsetDateTime::now_utc()
            ],
            map_user_row,
        )
        .map_err(Error::from)
}

/// Get the user from the database with an ID equal to `user_id`.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not belong to a registered user.
/// - there was an error trying to access the store.
pub fn get_user_by_id(user_id: UserID, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare("SELECT id, name, email, password, created_at FROM user WHERE id = :id")?
        .query_row(&[(":id", &user_id.as_i64())], map_user_row)
        .map_err(|error| error.into())
}

/// Get the user from the database with the (normalised) email address `email`.
///
/// # Errors
///
/// Returns [Error::NotFound] if no user has the email address.
pub fn get_user_by_email(email: &str, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare("SELECT id, name, email, password, created_at FROM user WHERE email = :email")?
        .query_row(&[(":email", &email)], map_user_row)
        .map_err(|error| error.into())
}

/// Overwrite the name, email and password hash of the user `user_id`.
///
/// # Errors
///
/// Returns a:
/// - [Error::NotFound] if the user does not exist,
/// - [Error::DuplicateEmail] if another user already has `email`,
/// - or [Error::SqlError] if an SQL related error occurred.
pub fn update_user(
    user_id: UserID,
    name: &str,
    email: &str,
    password_hash: &PasswordHash,
    connection: &Connection,
) -> Result<User, Error> {
    connection
        .prepare(
            "UPDATE user SET name = ?1, email = ?2, password = ?3 WHERE id = ?4
             RETURNING id, name, email, password, created_at",
        )?
        .query_row(
            params![name, email, password_hash.as_ref(), user_id.as_i64()],
            map_user_row,
        )
        .map_err(Error::from)
}

fn map_user_row(row: &Row) -> Result<User, rusqlite::Error> {
    let raw_password_hash: String = row.get(3)?;

    Ok(User {
        id: UserID::new(row.get(0)?),
        name: row.get(1)?,
        email: row.get(2)?,
        password_hash: PasswordHash::new_unchecked(&raw_password_hash),
        created_at: row.get(4)?,
    })
}
