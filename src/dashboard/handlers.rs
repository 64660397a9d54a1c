//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - Route handlers for displaying the dashboard and refreshing insights
//! - HTML view functions for rendering the dashboard UI
//! - The state type shared by the handlers

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use time::{Date, Duration, OffsetDateTime};

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::{daily_expense_trend, expenses_by_category, monthly_income_expense},
        cards::insight_card,
        charts::{
            DashboardChart, category_chart, charts_script, charts_view, monthly_summary_chart,
            trend_chart,
        },
        insights::{InsightSnapshot, compute_insights},
        transaction::get_dashboard_transactions,
    },
    endpoints,
    html::{HeadElement, base, link},
    navigation::NavBar,
    timezone::get_local_offset,
    transaction::TransactionType,
    user::UserId,
};

/// Days of history for the monthly income/expense chart (~six months).
const MONTHLY_SUMMARY_WINDOW_DAYS: i64 = 180;

/// Days of history for the category breakdown (~one month).
const CATEGORY_WINDOW_DAYS: i64 = 30;

/// Days of history for the daily spending trend.
const TREND_WINDOW_DAYS: i64 = 90;

/// Days of history the insight scorer looks at (~three months).
const INSIGHT_WINDOW_DAYS: i64 = 90;

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
    /// The ID of the active user profile.
    pub user_id: UserId,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
            user_id: state.user_id,
        }
    }
}

/// Holds all the data needed to render the dashboard.
struct DashboardData {
    charts: [DashboardChart; 3],
    insights: Option<InsightSnapshot>,
}

/// Display a page with an overview of the user's finances.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);
    let today = local_date_today(&state.local_timezone)?;

    match build_dashboard_data(state.user_id, today, &connection)? {
        Some(data) => Ok(dashboard_view(nav_bar, &data.charts, data.insights.as_ref())
            .into_response()),
        None => Ok(dashboard_no_data_view(nav_bar).into_response()),
    }
}

/// htmx endpoint that recomputes the insight card and returns it as a partial.
///
/// Every invocation re-fetches the window and recomputes from scratch;
/// nothing is cached between requests.
pub async fn refresh_insights(State(state): State<DashboardState>) -> Response {
    let today = match local_date_today(&state.local_timezone) {
        Ok(today) => today,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let insight_rows = match get_dashboard_transactions(
        state.user_id,
        today - Duration::days(INSIGHT_WINDOW_DAYS),
        None,
        None,
        false,
        &connection,
    ) {
        Ok(rows) => rows,
        Err(error) => {
            tracing::error!("could not get transactions for insights: {error}");
            return error.into_alert_response();
        }
    };

    insight_card(compute_insights(&insight_rows, today).as_ref()).into_response()
}

fn local_date_today(local_timezone: &str) -> Result<Date, Error> {
    let local_offset = get_local_offset(local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {local_timezone}");
        Error::InvalidTimezoneError(local_timezone.to_owned())
    })?;

    Ok(OffsetDateTime::now_utc().to_offset(local_offset).date())
}

/// Fetches and builds all data needed for the dashboard display.
///
/// Each chart has its own trailing window, so the fetches are issued
/// separately rather than sliced from one result set.
///
/// # Returns
/// All dashboard data ready for rendering, or `None` if no transaction data
/// exists in the widest window.
fn build_dashboard_data(
    user_id: UserId,
    today: Date,
    connection: &Connection,
) -> Result<Option<DashboardData>, Error> {
    let summary_rows = get_dashboard_transactions(
        user_id,
        today - Duration::days(MONTHLY_SUMMARY_WINDOW_DAYS),
        None,
        None,
        false,
        connection,
    )
    .inspect_err(|error| tracing::error!("could not get transactions for summary: {error}"))?;

    if summary_rows.is_empty() {
        return Ok(None);
    }

    let category_rows = get_dashboard_transactions(
        user_id,
        today - Duration::days(CATEGORY_WINDOW_DAYS),
        None,
        Some(TransactionType::Expense),
        false,
        connection,
    )
    .inspect_err(|error| tracing::error!("could not get transactions for categories: {error}"))?;

    let trend_rows = get_dashboard_transactions(
        user_id,
        today - Duration::days(TREND_WINDOW_DAYS),
        None,
        Some(TransactionType::Expense),
        true,
        connection,
    )
    .inspect_err(|error| tracing::error!("could not get transactions for trend: {error}"))?;

    let insight_rows = get_dashboard_transactions(
        user_id,
        today - Duration::days(INSIGHT_WINDOW_DAYS),
        None,
        None,
        false,
        connection,
    )
    .inspect_err(|error| tracing::error!("could not get transactions for insights: {error}"))?;

    let charts = [
        DashboardChart {
            id: "monthly-summary-chart",
            options: monthly_summary_chart(&monthly_income_expense(&summary_rows)).to_string(),
        },
        DashboardChart {
            id: "category-chart",
            options: category_chart(&expenses_by_category(&category_rows)).to_string(),
        },
        DashboardChart {
            id: "trend-chart",
            options: trend_chart(&daily_expense_trend(&trend_rows)).to_string(),
        },
    ];

    Ok(Some(DashboardData {
        charts,
        insights: compute_insights(&insight_rows, today),
    }))
}

/// Renders the dashboard page when no transaction data exists.
fn dashboard_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "adding a transaction");

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Charts and insights will show up here once you add some
                transactions. Start by " (new_transaction_link) "."
            }
        }
    );

    base("Dashboard", &[], &content)
}

/// Renders the main dashboard page with the insight card and charts.
fn dashboard_view(
    nav_bar: NavBar,
    charts: &[DashboardChart],
    insights: Option<&InsightSnapshot>,
) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (insight_card(insights))

            (charts_view(charts))
        }
    );

    let scripts = [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        charts_script(charts),
    ];

    base("Dashboard", &scripts, &content)
}
