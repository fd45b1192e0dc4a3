//! Creates the application's database schema.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{
    Error,
    auth::create_user_table,
    record::{Expense, Income, create_record_table},
};

/// Create the all of the database tables for the application.
///
/// Tables are only created if they do not already exist, so it is safe to
/// call this on an existing database.
///
/// # Errors
/// This function may return a [Error::SqlError] if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_record_table::<Expense>(&transaction)?;
    create_record_table::<Income>(&transaction)?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod db_tests {
    use rusqlite::Connection;

    use super::initialize;

    fn table_names(connection: &Connection) -> Vec<String> {
        connection
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .map(|name| name.unwrap())
            .collect()
    }

    #[test]
    fn creates_all_tables() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).expect("could not initialize database");

        let tables = table_names(&connection);
        for want in ["expense", "income", "user"] {
            assert!(
                tables.iter().any(|table| table == want),
                "missing table {want}, got {tables:?}"
            );
        }
    }

    #[test]
    fn initialize_is_idempotent() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).expect("could not initialize database");
        initialize(&connection).expect("could not initialize database a second time");
    }
}
