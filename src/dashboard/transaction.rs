//! Database queries for retrieving dashboard transaction data.
//!
//! This module provides a simplified transaction view optimized for dashboard
//! aggregations, containing only the fields needed for charting and insights
//! (amount, type, category, date).

use rusqlite::{Connection, params_from_iter};
use time::Date;

use crate::{Error, transaction::TransactionType, user::UserId};

pub(super) const UNCATEGORIZED_LABEL: &str = "Other";

/// A simplified transaction view for dashboard aggregations.
///
/// This is separate from the main Transaction domain model because the
/// dashboard only needs amount, type, category, and date. The category has
/// already had the fallback label applied.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct TransactionRow {
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub category: String,
    pub date: Date,
}

/// Gets a user's transactions from `date_from` (inclusive) onwards.
///
/// # Arguments
/// * `user_id` - The profile whose transactions to fetch
/// * `date_from` - The inclusive lower bound of the date range
/// * `date_to` - Optional inclusive upper bound of the date range
/// * `type_filter` - Optional filter to a single transaction type
/// * `sorted_by_date` - Whether to order results by date ascending
/// * `connection` - Database connection reference
///
/// # Errors
/// Returns [Error::SqlError] if query preparation or execution fails.
pub(super) fn get_dashboard_transactions(
    user_id: UserId,
    date_from: Date,
    date_to: Option<Date>,
    type_filter: Option<TransactionType>,
    sorted_by_date: bool,
    connection: &Connection,
) -> Result<Vec<TransactionRow>, Error> {
    // CAST coerces any malformed amount values to 0 instead of failing the
    // whole fetch.
    let mut query = format!(
        "SELECT
            CAST(t.amount AS REAL),
            t.type,
            COALESCE(NULLIF(t.category, ''), '{UNCATEGORIZED_LABEL}') AS category,
            t.date
        FROM \"transaction\" t
        WHERE t.user_id = ?1 AND t.date >= ?2"
    );

    let mut params = vec![user_id.to_string(), date_from.to_string()];

    if let Some(date_to) = date_to {
        params.push(date_to.to_string());
        query.push_str(&format!(" AND t.date <= ?{}", params.len()));
    }

    if let Some(transaction_type) = type_filter {
        params.push(transaction_type.to_string());
        query.push_str(&format!(" AND t.type = ?{}", params.len()));
    }

    if sorted_by_date {
        query.push_str(" ORDER BY t.date ASC");
    }

    let mut stmt = connection.prepare(&query)?;
    stmt.query_map(params_from_iter(params), |row| {
        Ok(TransactionRow {
            amount: row.get(0)?,
            transaction_type: row.get(1)?,
            category: row.get(2)?,
            date: row.get(3)?,
        })
    })?
    .collect::<Result<Vec<TransactionRow>, rusqlite::Error>>()
    .map_err(|error| error.into())
}
