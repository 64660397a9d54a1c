//! Defines the core data models and database queries for transactions.

use std::{fmt::Display, str::FromStr};

use rusqlite::{
    Connection, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    user::{DatabaseId, UserId},
};

// ============================================================================
// MODELS
// ============================================================================

/// Whether a transaction brought money in or took money out.
///
/// Amounts are magnitudes; this enum is the only carrier of direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in, e.g. salary.
    Income,
    /// Money going out, e.g. groceries.
    Expense,
}

impl TransactionType {
    fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(Error::InvalidTransactionType(other.to_owned())),
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}

/// An income or expense, i.e. an event where money was either earned or spent.
///
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: DatabaseId,
    /// The ID of the user that owns the transaction.
    pub user_id: UserId,
    /// How much money was earned or spent. Always a non-negative magnitude.
    pub amount: f64,
    /// Whether the money came in or went out.
    pub transaction_type: TransactionType,
    /// A free-text category label, e.g. "Groceries". `None` is displayed
    /// under the fallback label "Other".
    pub category: Option<String>,
    /// When the transaction happened.
    pub date: Date,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(
        user_id: UserId,
        amount: f64,
        transaction_type: TransactionType,
        date: Date,
    ) -> TransactionBuilder {
        TransactionBuilder {
            user_id,
            amount,
            transaction_type,
            date,
            category: None,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// Call [create_transaction] to validate the builder and insert the row.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// The ID of the user that owns the transaction.
    pub user_id: UserId,

    /// The monetary amount of the transaction.
    ///
    /// Must be non-negative: direction is carried by `transaction_type`.
    pub amount: f64,

    /// Whether the money came in or went out.
    pub transaction_type: TransactionType,

    /// The date when the transaction occurred.
    pub date: Date,

    /// The category of the transaction, e.g. "Groceries", "Transport", "Rent".
    pub category: Option<String>,
}

impl TransactionBuilder {
    /// Set the category for the transaction. Empty strings become `None`.
    pub fn category(mut self, category: Option<String>) -> Self {
        self.category = category.filter(|name| !name.is_empty());
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::NegativeAmount] if the amount is negative,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    builder: TransactionBuilder,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if builder.amount < 0.0 {
        return Err(Error::NegativeAmount(builder.amount));
    }

    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (user_id, amount, type, category, date)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, user_id, amount, type, category, date",
        )?
        .query_row(
            (
                builder.user_id,
                builder.amount,
                builder.transaction_type,
                builder.category,
                builder.date,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a user's transactions ordered by date, most recent first.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_recent_transactions(
    user_id: UserId,
    limit: u32,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, amount, type, category, date FROM \"transaction\"
             WHERE user_id = ?1
             ORDER BY date DESC, id DESC
             LIMIT ?2",
        )?
        .query_map((user_id, limit), map_transaction_row)?
        .collect::<Result<Vec<Transaction>, rusqlite::Error>>()
        .map_err(|error| error.into())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                amount REAL NOT NULL,
                type TEXT NOT NULL,
                category TEXT,
                date TEXT NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id) ON DELETE CASCADE
                )",
        (),
    )?;

    // Composite index used by the dashboard queries.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_user_date ON \"transaction\"(user_id, date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let user_id = row.get(1)?;
    let amount = row.get(2)?;
    let transaction_type = row.get(3)?;
    let category = row.get(4)?;
    let date = row.get(5)?;

    Ok(Transaction {
        id,
        user_id,
        amount,
        transaction_type,
        category,
        date,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        transaction::{Transaction, TransactionType, count_transactions, create_transaction},
        user::{UserId, get_or_create_user},
    };

    fn get_test_connection() -> (Connection, UserId) {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let user_id = get_or_create_user("test@example.com", &conn).unwrap().id;
        (conn, user_id)
    }

    #[test]
    fn create_succeeds() {
        let (conn, user_id) = get_test_connection();
        let amount = 12.3;

        let result = create_transaction(
            Transaction::build(user_id, amount, TransactionType::Expense, date!(2025 - 10 - 05))
                .category(Some("Food".to_owned())),
            &conn,
        );

        match result {
            Ok(transaction) => {
                assert_eq!(transaction.amount, amount);
                assert_eq!(transaction.transaction_type, TransactionType::Expense);
                assert_eq!(transaction.category.as_deref(), Some("Food"));
            }
            Err(error) => panic!("Unexpected error: {error}"),
        }
    }

    #[test]
    fn create_fails_on_negative_amount() {
        let (conn, user_id) = get_test_connection();

        let result = create_transaction(
            Transaction::build(user_id, -50.0, TransactionType::Expense, date!(2025 - 10 - 05)),
            &conn,
        );

        assert_eq!(result, Err(Error::NegativeAmount(-50.0)));
    }

    #[test]
    fn empty_category_becomes_none() {
        let (conn, user_id) = get_test_connection();

        let transaction = create_transaction(
            Transaction::build(user_id, 10.0, TransactionType::Expense, date!(2025 - 10 - 05))
                .category(Some("".to_owned())),
            &conn,
        )
        .unwrap();

        assert_eq!(transaction.category, None);
    }

    #[test]
    fn get_count() {
        let (conn, user_id) = get_test_connection();
        let today = date!(2025 - 10 - 05);
        let want_count = 20;
        for i in 1..=want_count {
            create_transaction(
                Transaction::build(user_id, i as f64, TransactionType::Income, today),
                &conn,
            )
            .expect("Could not create transaction");
        }

        let got_count = count_transactions(&conn).expect("Could not get count");

        assert_eq!(want_count, got_count);
    }

    #[test]
    fn transaction_type_round_trips_through_text() {
        assert_eq!(
            "income".parse::<TransactionType>().unwrap(),
            TransactionType::Income
        );
        assert_eq!(
            "expense".parse::<TransactionType>().unwrap(),
            TransactionType::Expense
        );
        assert_eq!(
            "transfer".parse::<TransactionType>(),
            Err(Error::InvalidTransactionType("transfer".to_owned()))
        );
    }
}
