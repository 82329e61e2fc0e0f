//! Defines the core data models and database queries for sale transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// Alias for the integer type used for transaction IDs.
pub type TransactionId = i64;

/// A product listed for sale, and whether and when it sold.
///
/// Transactions are only created by the ingestion step and are never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction, assigned by the database.
    #[serde(rename = "_id")]
    pub id: TransactionId,
    /// The product name.
    pub title: String,
    /// A text description of the product.
    pub description: String,
    /// The listed price, never negative.
    pub price: f64,
    /// A free-form category label, e.g. "electronics".
    pub category: String,
    /// Whether the product has been sold.
    pub sold: bool,
    /// When the sale was recorded, stored in UTC.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    /// A URI pointing to an image of the product.
    pub image: String,
}

/// A transaction that has not been stored yet.
///
/// This is also the shape of a record in the external JSON data set. Fields
/// the data set carries that are not listed here (e.g. the source `id`) are
/// ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    /// The product name.
    pub title: String,
    /// A text description of the product.
    pub description: String,
    /// The listed price.
    pub price: f64,
    /// A free-form category label.
    pub category: String,
    /// Whether the product has been sold, `false` when absent.
    #[serde(default)]
    pub sold: bool,
    /// When the sale was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub date_of_sale: OffsetDateTime,
    /// A URI pointing to an image of the product.
    pub image: String,
}

impl NewTransaction {
    /// Check that the record can be stored.
    ///
    /// # Errors
    /// Returns [Error::InvalidTransaction] if the price is negative or not a
    /// number, or if any of the text fields is blank.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(Error::InvalidTransaction(format!(
                "price must be a non-negative number, got {}",
                self.price
            )));
        }

        let text_fields = [
            ("title", &self.title),
            ("description", &self.description),
            ("category", &self.category),
            ("image", &self.image),
        ];

        for (name, value) in text_fields {
            if value.trim().is_empty() {
                return Err(Error::InvalidTransaction(format!("{name} cannot be empty")));
            }
        }

        Ok(())
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// The columns selected for a [Transaction], in the order [map_transaction_row] expects.
pub(crate) const TRANSACTION_COLUMNS: &str =
    "id, title, description, price, category, sold, date_of_sale, image";

/// Create a new transaction in the database.
///
/// The date of sale is converted to UTC before it is stored so that month
/// filters see the same calendar month regardless of the source offset.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidTransaction] if the record fails [NewTransaction::validate],
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    transaction.validate()?;

    let transaction = connection
        .prepare(&format!(
            "INSERT INTO sale_transaction (title, description, price, category, sold, date_of_sale, image)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING {TRANSACTION_COLUMNS}"
        ))?
        .query_row(
            (
                transaction.title,
                transaction.description,
                transaction.price,
                transaction.category,
                transaction.sold,
                transaction.date_of_sale.to_offset(UtcOffset::UTC),
                transaction.image,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u64, Error> {
    let count: i64 =
        connection.query_row("SELECT COUNT(id) FROM sale_transaction;", [], |row| {
            row.get(0)
        })?;

    Ok(count as u64)
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS sale_transaction (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL CHECK (price >= 0),
                category TEXT NOT NULL,
                sold INTEGER NOT NULL DEFAULT 0,
                date_of_sale TEXT NOT NULL,
                image TEXT NOT NULL
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_sale_transaction_date ON sale_transaction(date_of_sale);",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_sale_transaction_category ON sale_transaction(category);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub(crate) fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        category: row.get(4)?,
        sold: row.get(5)?,
        date_of_sale: row.get(6)?,
        image: row.get(7)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
