//! Defines the route handler for the page that displays bank accounts.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    account::{
        Account,
        core::{get_accounts, get_total_account_balance},
    },
    html::{BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, base, format_currency},
    navigation::NavBar,
    user::UserId,
};

fn account_row(account: &Account) -> Markup {
    let balance_color = if account.balance < 0.0 {
        "text-red-600 dark:text-red-500"
    } else {
        "text-gray-900 dark:text-white"
    };

    html! {
        div class="w-full p-4 rounded-lg bg-white dark:bg-gray-800 flex flex-row items-center justify-between"
        {
            h3 class="font-semibold" { (account.name) }

            span class=(format!("font-semibold {balance_color}"))
            {
                (format_currency(account.balance))
            }
        }
    }
}

fn accounts_view(accounts: &[Account], total_balance: f64) -> Markup {
    let nav_bar = NavBar::new(endpoints::ACCOUNTS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-3xl space-y-4"
            {
                div class="flex flex-row items-center justify-between"
                {
                    h2 class="text-xl font-bold" { "Accounts" }

                    a
                        href=(endpoints::NEW_ACCOUNT_VIEW)
                        class=(format!("{BUTTON_PRIMARY_STYLE} max-w-fit"))
                    {
                        "New Account"
                    }
                }

                @if accounts.is_empty() {
                    p class="text-gray-500 dark:text-gray-400"
                    {
                        "No accounts yet. Register a bank account to get started."
                    }
                } @else {
                    p class="text-sm text-gray-500 dark:text-gray-400"
                    {
                        "Total balance: " (format_currency(total_balance))
                    }

                    @for account in accounts {
                        (account_row(account))
                    }
                }
            }
        }
    };

    base("Accounts", &[], &content)
}

/// The state needed for the accounts page.
#[derive(Debug, Clone)]
pub struct AccountsViewState {
    /// The database connection for managing accounts.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The ID of the active user profile.
    pub user_id: UserId,
}

impl FromRef<AppState> for AccountsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            user_id: state.user_id,
        }
    }
}

/// Render an overview of the user's bank accounts.
pub async fn get_accounts_page(State(state): State<AccountsViewState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let accounts = get_accounts(state.user_id, &connection)
        .inspect_err(|error| tracing::error!("could not get accounts: {error}"))?;
    let total_balance = get_total_account_balance(state.user_id, &connection)
        .inspect_err(|error| tracing::error!("could not get total balance: {error}"))?;

    Ok(accounts_view(&accounts, total_balance).into_response())
}
