//! Database setup and connection helpers.

use std::sync::{Mutex, MutexGuard};

use rusqlite::{
    Connection, Transaction as SqlTransaction, TransactionBehavior, functions::FunctionFlags,
};

use crate::{Error, transaction::create_transaction_table};

/// The name of the SQL function that lowercases text using Unicode rules.
///
/// SQLite's built-in `lower()` only folds ASCII letters.
const UNICODE_LOWER: &str = "unicode_lower";

/// Create the application's tables if they do not exist yet and register the
/// SQL functions the queries rely on.
///
/// Functions live on the connection, so this must be called on every new
/// connection.
///
/// # Errors
/// Returns an [Error::SqlError] if a table cannot be created or a function
/// cannot be registered.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    register_functions(connection)?;

    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

fn register_functions(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.create_scalar_function(
        UNICODE_LOWER,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |context| {
            let text: String = context.get(0)?;
            Ok(text.to_lowercase())
        },
    )
}

/// Acquire the shared database connection.
///
/// # Errors
/// Returns [Error::DatabaseLockError] if the lock is poisoned.
pub(crate) fn lock_connection(
    db_connection: &Mutex<Connection>,
) -> Result<MutexGuard<'_, Connection>, Error> {
    db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
}
