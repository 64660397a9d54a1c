//! Defines the core data model and database queries for savings goals.

use rusqlite::{Connection, Row};
use time::Date;

use crate::{
    Error,
    user::{DatabaseId, UserId},
};

/// A savings goal, e.g. "Emergency fund: $5,000 by December".
#[derive(Debug, Clone, PartialEq)]
pub struct Goal {
    /// The ID of the goal.
    pub id: DatabaseId,
    /// The ID of the user that owns the goal.
    pub user_id: UserId,
    /// A short label describing the goal.
    pub name: String,
    /// How much money the goal aims to save. Always non-negative.
    pub target_amount: f64,
    /// How much money has been put towards the goal so far.
    pub current_amount: f64,
    /// An optional date by which the goal should be reached.
    pub deadline: Option<Date>,
}

impl Goal {
    /// How far along the goal is, as a percentage clamped to [0, 100].
    ///
    /// A goal with a zero target has no meaningful progress and reports 0.
    pub fn progress_percentage(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 0.0;
        }

        (self.current_amount / self.target_amount * 100.0).clamp(0.0, 100.0)
    }
}

/// A builder holding the fields for a goal before it is inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalBuilder {
    /// The ID of the user that owns the goal.
    pub user_id: UserId,
    /// A short label describing the goal.
    pub name: String,
    /// How much money the goal aims to save.
    pub target_amount: f64,
    /// How much money has been put towards the goal so far.
    pub current_amount: f64,
    /// An optional date by which the goal should be reached.
    pub deadline: Option<Date>,
}

impl Goal {
    /// Create a new goal. Call [create_goal] to validate and insert it.
    pub fn build(user_id: UserId, name: &str, target_amount: f64) -> GoalBuilder {
        GoalBuilder {
            user_id,
            name: name.to_owned(),
            target_amount,
            current_amount: 0.0,
            deadline: None,
        }
    }
}

impl GoalBuilder {
    /// Set how much money has already been saved towards the goal.
    pub fn current_amount(mut self, current_amount: f64) -> Self {
        self.current_amount = current_amount;
        self
    }

    /// Set the date by which the goal should be reached.
    pub fn deadline(mut self, deadline: Option<Date>) -> Self {
        self.deadline = deadline;
        self
    }
}

/// Create a new goal in the database from a builder.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyGoalName] if the name is empty or just whitespace,
/// - [Error::NegativeAmount] if the target or current amount is negative,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_goal(builder: GoalBuilder, connection: &Connection) -> Result<Goal, Error> {
    if builder.name.trim().is_empty() {
        return Err(Error::EmptyGoalName);
    }

    if builder.target_amount < 0.0 {
        return Err(Error::NegativeAmount(builder.target_amount));
    }

    if builder.current_amount < 0.0 {
        return Err(Error::NegativeAmount(builder.current_amount));
    }

    let goal = connection
        .prepare(
            "INSERT INTO goal (user_id, name, target_amount, current_amount, deadline)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, user_id, name, target_amount, current_amount, deadline",
        )?
        .query_row(
            (
                builder.user_id,
                builder.name,
                builder.target_amount,
                builder.current_amount,
                builder.deadline,
            ),
            map_goal_row,
        )?;

    Ok(goal)
}

/// Retrieve a user's goals, most recently created first.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is some SQL error.
pub fn get_goals(user_id: UserId, connection: &Connection) -> Result<Vec<Goal>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, name, target_amount, current_amount, deadline FROM goal
             WHERE user_id = ?1
             ORDER BY id DESC",
        )?
        .query_map([user_id], map_goal_row)?
        .collect::<Result<Vec<Goal>, rusqlite::Error>>()
        .map_err(|error| error.into())
}

/// Create the goal table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_goal_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS goal (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                target_amount REAL NOT NULL,
                current_amount REAL NOT NULL DEFAULT 0,
                deadline TEXT,
                FOREIGN KEY(user_id) REFERENCES user(id) ON DELETE CASCADE
                )",
        (),
    )?;

    Ok(())
}

fn map_goal_row(row: &Row) -> Result<Goal, rusqlite::Error> {
    Ok(Goal {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        target_amount: row.get(3)?,
        current_amount: row.get(4)?,
        deadline: row.get(5)?,
    })
}

#[cfg(test)]
mod goal_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        goal::{Goal, create_goal, get_goals},
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

        let goal = create_goal(
            Goal::build(user_id, "Emergency fund", 5000.0)
                .current_amount(1250.0)
                .deadline(Some(date!(2025 - 12 - 31))),
            &conn,
        )
        .unwrap();

        assert_eq!(goal.name, "Emergency fund");
        assert_eq!(goal.target_amount, 5000.0);
        assert_eq!(goal.current_amount, 1250.0);
        assert_eq!(goal.deadline, Some(date!(2025 - 12 - 31)));
    }

    #[test]
    fn create_fails_on_empty_name() {
        let (conn, user_id) = get_test_connection();

        let result = create_goal(Goal::build(user_id, "  \t", 100.0), &conn);

        assert_eq!(result, Err(Error::EmptyGoalName));
    }

    #[test]
    fn create_fails_on_negative_target() {
        let (conn, user_id) = get_test_connection();

        let result = create_goal(Goal::build(user_id, "Holiday", -1.0), &conn);

        assert_eq!(result, Err(Error::NegativeAmount(-1.0)));
    }

    #[test]
    fn get_goals_returns_newest_first() {
        let (conn, user_id) = get_test_connection();
        create_goal(Goal::build(user_id, "First", 100.0), &conn).unwrap();
        create_goal(Goal::build(user_id, "Second", 200.0), &conn).unwrap();

        let goals = get_goals(user_id, &conn).unwrap();

        assert_eq!(goals.len(), 2);
        assert_eq!(goals[0].name, "Second");
        assert_eq!(goals[1].name, "First");
    }

    #[test]
    fn progress_is_clamped_to_one_hundred() {
        let goal = Goal {
            id: 1,
            user_id: 1,
            name: "Holiday".to_owned(),
            target_amount: 100.0,
            current_amount: 250.0,
            deadline: None,
        };

        assert_eq!(goal.progress_percentage(), 100.0);
    }

    #[test]
    fn progress_with_zero_target_is_zero() {
        let goal = Goal {
            id: 1,
            user_id: 1,
            name: "Holiday".to_owned(),
            target_amount: 0.0,
            current_amount: 50.0,
            deadline: None,
        };

        assert_eq!(goal.progress_percentage(), 0.0);
    }

    #[test]
    fn progress_is_proportional() {
        let goal = Goal {
            id: 1,
            user_id: 1,
            name: "Holiday".to_owned(),
            target_amount: 200.0,
            current_amount: 50.0,
            deadline: None,
        };

        assert_eq!(goal.progress_percentage(), 25.0);
    }
}
