//! Defines the route handler for the page that displays transactions as a table.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, base, format_currency,
    },
    navigation::NavBar,
    transaction::{Transaction, TransactionType, core::get_recent_transactions},
    user::UserId,
};

/// How many transactions the table shows, most recent first.
const TRANSACTION_TABLE_LIMIT: u32 = 50;

fn transactions_view(transactions: &[Transaction]) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-3xl space-y-4"
            {
                div class="flex flex-row items-center justify-between"
                {
                    h2 class="text-xl font-bold" { "Transactions" }

                    a
                        href=(endpoints::NEW_TRANSACTION_VIEW)
                        class=(format!("{BUTTON_PRIMARY_STYLE} max-w-fit"))
                    {
                        "New Transaction"
                    }
                }

                @if transactions.is_empty() {
                    p class="text-gray-500 dark:text-gray-400"
                    {
                        "No transactions yet. Create one to get started."
                    }
                } @else {
                    table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(format!("{TABLE_CELL_STYLE} text-right")) { "Amount" }
                            }
                        }

                        tbody
                        {
                            @for transaction in transactions {
                                tr class=(TABLE_ROW_STYLE)
                                {
                                    td class=(TABLE_CELL_STYLE) { (transaction.date) }

                                    td class=(TABLE_CELL_STYLE)
                                    {
                                        (transaction.category.as_deref().unwrap_or("Other"))
                                    }

                                    @let (sign, amount_color) = match transaction.transaction_type {
                                        TransactionType::Income => ("+", "text-green-600 dark:text-green-500"),
                                        TransactionType::Expense => ("-", "text-red-600 dark:text-red-500"),
                                    };

                                    td class=(format!("{TABLE_CELL_STYLE} text-right {amount_color}"))
                                    {
                                        (sign) (format_currency(transaction.amount))
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    base("Transactions", &[], &content)
}

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The ID of the active user profile.
    pub user_id: UserId,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            user_id: state.user_id,
        }
    }
}

/// Render an overview of the user's transactions.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions =
        get_recent_transactions(state.user_id, TRANSACTION_TABLE_LIMIT, &connection)
            .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;

    Ok(transactions_view(&transactions).into_response())
}
