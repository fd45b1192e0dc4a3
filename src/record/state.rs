//! The state shared by the record endpoints.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::FromRef;
use rusqlite::Connection;
use time::Date;

use crate::{AppState, Error, timezone::local_today};

/// The state needed to list, create, edit and delete records.
#[derive(Debug, Clone)]
pub struct RecordState {
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// The database connection for managing records.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RecordState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

impl RecordState {
    /// Today's date in the server's timezone.
    pub fn today(&self) -> Result<Date, Error> {
        local_today(&self.local_timezone)
    }

    /// Lock the database connection.
    pub fn connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.db_connection.lock().map_err(|error| {
            tracing::error!("Could not acquire database lock: {error}");
            Error::DatabaseLockError
        })
    }
}
