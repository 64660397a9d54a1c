//! Savings goal management for the finance tracker.

pub mod core;
mod create_goal_endpoint;
mod goals_page;
mod new_goal_page;

pub use core::{Goal, GoalBuilder, create_goal, create_goal_table, get_goals};
pub use create_goal_endpoint::create_goal_endpoint;
pub use goals_page::get_goals_page;
pub use new_goal_page::get_new_goal_page;
