//! The API endpoints URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The landing page showing charts and insights.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for displaying a user's transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for creating a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transactions/new";
/// The page for displaying a user's savings goals.
pub const GOALS_VIEW: &str = "/goals";
/// The page for creating a new savings goal.
pub const NEW_GOAL_VIEW: &str = "/goals/new";
/// The page for displaying a user's bank accounts.
pub const ACCOUNTS_VIEW: &str = "/accounts";
/// The page for registering a new bank account.
pub const NEW_ACCOUNT_VIEW: &str = "/accounts/new";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to request a cup of coffee (experimental).
pub const COFFEE: &str = "/api/coffee";
/// The route to create a transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to create a savings goal.
pub const GOALS_API: &str = "/api/goals";
/// The route to register a bank account.
pub const ACCOUNTS_API: &str = "/api/accounts";
/// The route to recompute the dashboard insight card.
pub const REFRESH_INSIGHTS: &str = "/api/insights";
