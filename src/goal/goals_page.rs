//! Defines the route handler for the page that displays savings goals.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    goal::{Goal, core::get_goals},
    html::{BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, base, format_currency},
    navigation::NavBar,
    user::UserId,
};

fn goal_card(goal: &Goal) -> Markup {
    let progress = goal.progress_percentage();

    html! {
        div class="w-full p-4 rounded-lg bg-white dark:bg-gray-800 space-y-2"
        {
            div class="flex flex-row items-center justify-between"
            {
                h3 class="font-semibold" { (goal.name) }

                @if let Some(deadline) = goal.deadline {
                    span class="text-sm text-gray-500 dark:text-gray-400" { "by " (deadline) }
                }
            }

            div class="w-full h-3 rounded-full bg-gray-200 dark:bg-gray-700"
            {
                div
                    class="h-3 rounded-full bg-blue-600 dark:bg-blue-500"
                    style=(format!("width: {progress:.0}%;")) {}
            }

            p class="text-sm text-gray-500 dark:text-gray-400"
            {
                (format_currency(goal.current_amount))
                " of "
                (format_currency(goal.target_amount))
                " (" (format!("{progress:.0}")) "%)"
            }
        }
    }
}

fn goals_view(goals: &[Goal]) -> Markup {
    let nav_bar = NavBar::new(endpoints::GOALS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-3xl space-y-4"
            {
                div class="flex flex-row items-center justify-between"
                {
                    h2 class="text-xl font-bold" { "Goals" }

                    a
                        href=(endpoints::NEW_GOAL_VIEW)
                        class=(format!("{BUTTON_PRIMARY_STYLE} max-w-fit"))
                    {
                        "New Goal"
                    }
                }

                @if goals.is_empty() {
                    p class="text-gray-500 dark:text-gray-400"
                    {
                        "No goals yet. Create one to start tracking your savings."
                    }
                } @else {
                    @for goal in goals {
                        (goal_card(goal))
                    }
                }
            }
        }
    };

    base("Goals", &[], &content)
}

/// The state needed for the goals page.
#[derive(Debug, Clone)]
pub struct GoalsViewState {
    /// The database connection for managing goals.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The ID of the active user profile.
    pub user_id: UserId,
}

impl FromRef<AppState> for GoalsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            user_id: state.user_id,
        }
    }
}

/// Render an overview of the user's savings goals.
pub async fn get_goals_page(State(state): State<GoalsViewState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let goals = get_goals(state.user_id, &connection)
        .inspect_err(|error| tracing::error!("could not get goals: {error}"))?;

    Ok(goals_view(&goals).into_response())
}
