//! Database queries that apply a [TransactionFilter].
//!
//! Results are always ordered by ID, i.e. insertion order, so that paging
//! through an unchanged data set is stable.

use rusqlite::{Connection, ToSql, params_from_iter};

use crate::Error;

use super::{
    core::{TRANSACTION_COLUMNS, Transaction, map_transaction_row},
    filter::{DateScope, SoldFilter, TransactionFilter},
};

/// A SQL `WHERE` clause and the values bound to its placeholders, in order.
struct WhereClause {
    sql: String,
    params: Vec<Box<dyn ToSql>>,
}

impl WhereClause {
    fn from_filter(filter: &TransactionFilter) -> Self {
        let mut conditions: Vec<&str> = Vec::new();
        let mut params: Vec<Box<dyn ToSql>> = Vec::new();

        match filter.date_scope {
            // Dates are stored in UTC, so this compares the UTC month.
            Some(DateScope::Month(month)) => {
                conditions.push("CAST(strftime('%m', date_of_sale) AS INTEGER) = ?");
                params.push(Box::new(u8::from(month)));
            }
            Some(DateScope::Range { start, end }) => {
                conditions.push("julianday(date_of_sale) BETWEEN julianday(?) AND julianday(?)");
                params.push(Box::new(start));
                params.push(Box::new(end));
            }
            None => {}
        }

        match filter.sold {
            SoldFilter::Sold => {
                conditions.push("sold = ?");
                params.push(Box::new(true));
            }
            SoldFilter::Unsold => {
                conditions.push("sold = ?");
                params.push(Box::new(false));
            }
            SoldFilter::Both => {}
        }

        if let Some(title) = &filter.title_contains {
            conditions.push("instr(unicode_lower(title), unicode_lower(?)) > 0");
            params.push(Box::new(title.clone()));
        }

        if let Some(description) = &filter.description_contains {
            conditions.push("instr(unicode_lower(description), unicode_lower(?)) > 0");
            params.push(Box::new(description.clone()));
        }

        if let Some(min_price) = filter.min_price {
            conditions.push("price >= ?");
            params.push(Box::new(min_price));
        }

        if let Some(max_price) = filter.max_price {
            conditions.push("price <= ?");
            params.push(Box::new(max_price));
        }

        let sql = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        Self { sql, params }
    }
}

/// Get every transaction that matches `filter`.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails or a row cannot be mapped.
pub(crate) fn get_matching_transactions(
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let where_clause = WhereClause::from_filter(filter);
    let query = format!(
        "SELECT {TRANSACTION_COLUMNS} FROM sale_transaction{} ORDER BY id ASC",
        where_clause.sql
    );

    connection
        .prepare(&query)?
        .query_map(params_from_iter(where_clause.params.iter()), map_transaction_row)?
        .collect::<Result<Vec<Transaction>, rusqlite::Error>>()
        .map_err(|error| error.into())
}

/// Get at most `limit` transactions that match `filter`, skipping the first `offset`.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails or a row cannot be mapped.
pub(crate) fn get_transaction_page(
    filter: &TransactionFilter,
    offset: u64,
    limit: u64,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let mut where_clause = WhereClause::from_filter(filter);
    let query = format!(
        "SELECT {TRANSACTION_COLUMNS} FROM sale_transaction{} ORDER BY id ASC LIMIT ? OFFSET ?",
        where_clause.sql
    );

    where_clause
        .params
        .push(Box::new(i64::try_from(limit).unwrap_or(i64::MAX)));
    where_clause
        .params
        .push(Box::new(i64::try_from(offset).unwrap_or(i64::MAX)));

    connection
        .prepare(&query)?
        .query_map(params_from_iter(where_clause.params.iter()), map_transaction_row)?
        .collect::<Result<Vec<Transaction>, rusqlite::Error>>()
        .map_err(|error| error.into())
}

/// Count the transactions that match `filter`.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub(crate) fn count_matching_transactions(
    filter: &TransactionFilter,
    connection: &Connection,
) -> Result<u64, Error> {
    let where_clause = WhereClause::from_filter(filter);
    let query = format!("SELECT COUNT(id) FROM sale_transaction{}", where_clause.sql);

    let count: i64 = connection.query_row(
        &query,
        params_from_iter(where_clause.params.iter()),
        |row| row.get(0),
    )?;

    Ok(count as u64)
}
