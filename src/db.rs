//! Database initialization.

use rusqlite::{Connection, TransactionBehavior};

use crate::{Error, expense::create_expense_table};

/// Create the application tables if they do not already exist.
///
/// Safe to call on an existing database, no data is modified.
///
/// # Errors
/// Returns an error if a table could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        rusqlite::Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_expense_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
