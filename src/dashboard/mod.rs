//! Dashboard functionality: aggregation, insights, charts, and handlers.

mod aggregation;
mod cards;
mod charts;
mod handlers;
mod insights;
mod transaction;

pub use handlers::{DashboardState, get_dashboard_page, refresh_insights};
