//! The user profile that owns transactions and goals.
//!
//! Authentication is out of scope for this application: the server resolves a
//! single active profile at startup and passes its id explicitly into every
//! query. There is deliberately no ambient "current user" state.

use rusqlite::Connection;

use crate::Error;

/// Alias for integer IDs used in the database.
pub type DatabaseId = i64;

/// The integer ID of a user profile row.
pub type UserId = DatabaseId;

/// A user profile that owns transactions and savings goals.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// The ID of the user.
    pub id: UserId,
    /// The email address identifying the profile.
    pub email: String,
}

/// Create the user table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE
                )",
        (),
    )?;

    Ok(())
}

/// Get the user with `email`, creating it if it does not exist yet.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_or_create_user(email: &str, connection: &Connection) -> Result<User, Error> {
    connection.execute("INSERT OR IGNORE INTO user (email) VALUES (?1)", (email,))?;

    let user = connection
        .prepare("SELECT id, email FROM user WHERE email = :email")?
        .query_one(&[(":email", email)], |row| {
            Ok(User {
                id: row.get(0)?,
                email: row.get(1)?,
            })
        })?;

    Ok(user)
}
