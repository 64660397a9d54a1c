//! Defines the core data model and database queries for bank accounts.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    user::{DatabaseId, UserId},
};

/// A bank account or credit card that transactions are drawn from.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// The ID of the account.
    pub id: DatabaseId,
    /// The ID of the user that owns the account.
    pub user_id: UserId,
    /// A short label, e.g. "Checking". Unique per user.
    pub name: String,
    /// The current balance. May be negative, e.g. for credit cards.
    pub balance: f64,
}

/// Create a new account in the database.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyAccountName] if the name is empty or just whitespace,
/// - [Error::DuplicateAccountName] if the user already has an account with
///   this name,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_account(
    user_id: UserId,
    name: &str,
    balance: f64,
    connection: &Connection,
) -> Result<Account, Error> {
    if name.trim().is_empty() {
        return Err(Error::EmptyAccountName);
    }

    connection
        .prepare(
            "INSERT INTO account (user_id, name, balance)
             VALUES (?1, ?2, ?3)
             RETURNING id, user_id, name, balance",
        )?
        .query_row((user_id, name, balance), map_account_row)
        .map_err(|error| match error {
            // Unique (user_id, name) constraint violation.
            rusqlite::Error::SqliteFailure(error, Some(_)) if error.extended_code == 2067 => {
                Error::DuplicateAccountName(name.to_owned())
            }
            error => error.into(),
        })
}

/// Retrieve a user's accounts, sorted by name.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_accounts(user_id: UserId, connection: &Connection) -> Result<Vec<Account>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, name, balance FROM account
             WHERE user_id = ?1
             ORDER BY name ASC",
        )?
        .query_map([user_id], map_account_row)?
        .collect::<Result<Vec<Account>, rusqlite::Error>>()
        .map_err(|error| error.into())
}

/// Get the total balance across all of a user's accounts.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_total_account_balance(user_id: UserId, connection: &Connection) -> Result<f64, Error> {
    connection
        .query_row(
            "SELECT COALESCE(SUM(balance), 0) FROM account WHERE user_id = ?1",
            [user_id],
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Create the account table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_account_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS account (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                balance REAL NOT NULL DEFAULT 0,
                UNIQUE(user_id, name),
                FOREIGN KEY(user_id) REFERENCES user(id) ON DELETE CASCADE
                )",
        (),
    )?;

    Ok(())
}

fn map_account_row(row: &Row) -> Result<Account, rusqlite::Error> {
    Ok(Account {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        balance: row.get(3)?,
    })
}
