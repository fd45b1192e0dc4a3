//! Defines the core data models and database queries for expenses and income entries.

use rusqlite::{Connection, Row, named_params};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    auth::UserID,
    database_id::RecordId,
    endpoints,
    record::category::{Category, ExpenseCategory, IncomeCategory},
};

// ============================================================================
// MODELS
// ============================================================================

/// The two kinds of record a user can keep. Both share the same shape and
/// queries and differ only in their table, categories and wording.
pub trait RecordKind: Send + Sync + 'static {
    /// The categories a record of this kind can be filed under.
    type Category: Category;

    /// The name of the database table holding records of this kind.
    const TABLE: &'static str;

    /// How a single record is referred to in messages, e.g. "expense".
    const NOUN: &'static str;

    /// The route for listing and creating records.
    const COLLECTION_ENDPOINT: &'static str;

    /// The route for accessing a single record.
    const ITEM_ENDPOINT: &'static str;

    /// The route for the yearly statistics.
    const STATS_ENDPOINT: &'static str;

    /// Whether a rise in the total is good news, e.g. earning more or spending less.
    const INCREASE_IS_FAVOURABLE: bool;
}

/// Money that was spent.
#[derive(Debug, Clone, Copy)]
pub enum Expense {}

impl RecordKind for Expense {
    type Category = ExpenseCategory;

    const TABLE: &'static str = "expense";
    const NOUN: &'static str = "expense";
    const COLLECTION_ENDPOINT: &'static str = endpoints::EXPENSES;
    const ITEM_ENDPOINT: &'static str = endpoints::EXPENSE;
    const STATS_ENDPOINT: &'static str = endpoints::EXPENSE_STATS;
    const INCREASE_IS_FAVOURABLE: bool = false;
}

/// Money that was earned.
#[derive(Debug, Clone, Copy)]
pub enum Income {}

impl RecordKind for Income {
    type Category = IncomeCategory;

    const TABLE: &'static str = "income";
    const NOUN: &'static str = "income entry";
    const COLLECTION_ENDPOINT: &'static str = endpoints::INCOME;
    const ITEM_ENDPOINT: &'static str = endpoints::INCOME_ENTRY;
    const STATS_ENDPOINT: &'static str = endpoints::INCOME_STATS;
    const INCREASE_IS_FAVOURABLE: bool = true;
}

/// An expense or an income entry belonging to a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record<C> {
    /// The ID of the record.
    pub id: RecordId,
    /// A short summary of what the money was for.
    pub title: String,
    /// How much money was spent or earned. Never negative.
    pub amount: f64,
    /// What the record is filed under.
    pub category: C,
    /// The day the money was spent or earned.
    pub date: Date,
    /// Optional longer notes.
    pub description: Option<String>,
    /// The user that owns the record.
    pub user: UserID,
    /// When the record was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the record was last changed.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// The user editable fields of a [Record] after validation.
///
/// Use [crate::record::RecordForm::into_draft] to build one from a request.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDraft<C> {
    /// A short summary, trimmed and at most 100 characters.
    pub title: String,
    /// A non-negative, finite amount.
    pub amount: f64,
    /// What the record is filed under.
    pub category: C,
    /// The day the money was spent or earned.
    pub date: Date,
    /// Trimmed notes, `None` rather than empty.
    pub description: Option<String>,
}

/// What a user is trying to do with a record, for authorization messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Reading a single record.
    Read,
    /// Replacing a record.
    Update,
    /// Deleting a record.
    Delete,
}

impl Access {
    fn verb(self) -> &'static str {
        match self {
            Access::Read => "access",
            Access::Update => "update",
            Access::Delete => "delete",
        }
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// The columns to select for [map_record_row], in order.
pub(crate) const RECORD_COLUMNS: &str =
    "id, title, amount, category, date, description, user_id, created_at, updated_at";

/// Create the table for records of kind `K`.
///
/// The user table must already exist.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_record_table<K: RecordKind>(connection: &Connection) -> Result<(), rusqlite::Error> {
    let table = K::TABLE;

    connection.execute(
        &format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                amount REAL NOT NULL CHECK (amount >= 0),
                category TEXT NOT NULL,
                date TEXT NOT NULL,
                description TEXT,
                user_id INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )"
        ),
        (),
    )?;

    // Every query filters by owner and most by date as well.
    connection.execute(
        &format!("CREATE INDEX IF NOT EXISTS idx_{table}_user_date ON {table}(user_id, date)"),
        (),
    )?;

    Ok(())
}

/// Create a new record owned by `owner` from a validated draft.
///
/// `now` is used for both the creation and modification time.
///
/// # Errors
/// This function will return a:
/// - [Error::Unauthenticated] if `owner` does not refer to an existing user,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_record<K: RecordKind>(
    owner: UserID,
    draft: RecordDraft<K::Category>,
    now: OffsetDateTime,
    connection: &Connection,
) -> Result<Record<K::Category>, Error> {
    connection
        .prepare(&format!(
            "INSERT INTO {} (title, amount, category, date, description, user_id, created_at, updated_at)
             VALUES (:title, :amount, :category, :date, :description, :user_id, :now, :now)
             RETURNING {RECORD_COLUMNS}",
            K::TABLE
        ))?
        .query_row(
            named_params! {
                ":title": draft.title,
                ":amount": draft.amount,
                ":category": draft.category,
                ":date": draft.date,
                ":description": draft.description,
                ":user_id": owner.as_i64(),
                ":now": now,
            },
            map_record_row,
        )
        .map_err(|error| match error {
            // A valid token can outlive its user.
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
                },
                _,
            ) => Error::Unauthenticated,
            error => error.into(),
        })
}

/// Retrieve a record of kind `K` by its `id`, regardless of who owns it.
///
/// # Errors
/// This function will return a:
/// - [Error::RecordNotFound] if `id` does not refer to a record of kind `K`,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_record<K: RecordKind>(
    id: RecordId,
    connection: &Connection,
) -> Result<Record<K::Category>, Error> {
    connection
        .prepare(&format!(
            "SELECT {RECORD_COLUMNS} FROM {} WHERE id = :id",
            K::TABLE
        ))?
        .query_row(&[(":id", &id)], map_record_row)
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::RecordNotFound(K::NOUN),
            error => error.into(),
        })
}

/// Retrieve a record and check that it belongs to `owner`.
///
/// # Errors
/// This function will return a:
/// - [Error::RecordNotFound] if the record does not exist,
/// - [Error::NotOwner] if the record belongs to another user,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_owned_record<K: RecordKind>(
    id: RecordId,
    owner: UserID,
    access: Access,
    connection: &Connection,
) -> Result<Record<K::Category>, Error> {
    let record = get_record::<K>(id, connection)?;

    if record.user != owner {
        tracing::warn!(
            "User {owner} tried to {} {} {id} owned by user {}",
            access.verb(),
            K::NOUN,
            record.user
        );
        return Err(Error::NotOwner {
            action: access.verb(),
            noun: K::NOUN,
        });
    }

    Ok(record)
}

/// Overwrite the user editable fields of the record `id`.
///
/// The owner and creation time are kept and the modification time is set to `now`.
///
/// # Errors
/// This function will return a:
/// - [Error::RecordNotFound] if `id` does not refer to a record of kind `K`,
/// - or [Error::SqlError] there is some other SQL error.
pub fn replace_record<K: RecordKind>(
    id: RecordId,
    draft: RecordDraft<K::Category>,
    now: OffsetDateTime,
    connection: &Connection,
) -> Result<Record<K::Category>, Error> {
    connection
        .prepare(&format!(
            "UPDATE {} SET title = :title, amount = :amount, category = :category, date = :date,
                description = :description, updated_at = :now
             WHERE id = :id
             RETURNING {RECORD_COLUMNS}",
            K::TABLE
        ))?
        .query_row(
            named_params! {
                ":title": draft.title,
                ":amount": draft.amount,
                ":category": draft.category,
                ":date": draft.date,
                ":description": draft.description,
                ":now": now,
                ":id": id,
            },
            map_record_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::RecordNotFound(K::NOUN),
            error => error.into(),
        })
}

/// Delete the record `id` and return the number of rows deleted.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn delete_record<K: RecordKind>(id: RecordId, connection: &Connection) -> Result<usize, Error> {
    connection
        .execute(
            &format!("DELETE FROM {} WHERE id = :id", K::TABLE),
            &[(":id", &id)],
        )
        .map_err(Error::from)
}

/// Map a database row selected with the record columns to a [Record].
pub(crate) fn map_record_row<C: Category>(row: &Row) -> Result<Record<C>, rusqlite::Error> {
    Ok(Record {
        id: row.get(0)?,
        title: row.get(1)?,
        amount: row.get(2)?,
        category: row.get(3)?,
        date: row.get(4)?,
        description: row.get(5)?,
        user: UserID::new(row.get(6)?),
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
