//! Defines the route handler for the page for creating a new transaction.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE,
        FORM_RADIO_INPUT_STYLE, FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
        dollar_input_styles, loading_spinner,
    },
    navigation::NavBar,
    timezone::get_local_offset,
    transaction::TransactionType,
};

fn new_transaction_view(max_date: Date) -> Markup {
    let create_transaction_route = endpoints::TRANSACTIONS_API;
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();
    let spinner = loading_spinner();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(create_transaction_route)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "New Transaction" }

                div
                {
                    label
                        for="amount"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Amount"
                    }

                    // w-full needed to ensure input takes the full width when prefilled with a value
                    div class="input-wrapper w-full"
                    {
                        input
                            name="amount"
                            id="amount"
                            type="number"
                            min="0"
                            step="0.01"
                            placeholder="0.00"
                            required
                            autofocus
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                fieldset
                {
                    legend class=(FORM_LABEL_STYLE) { "Type" }

                    div class=(FORM_RADIO_GROUP_STYLE)
                    {
                        @for (transaction_type, label) in [
                            (TransactionType::Expense, "Expense"),
                            (TransactionType::Income, "Income"),
                        ] {
                            div class="flex-1 flex"
                            {
                                input
                                    name="type"
                                    id=(format!("type-{transaction_type}"))
                                    type="radio"
                                    value=(transaction_type)
                                    checked[transaction_type == TransactionType::Expense]
                                    class=(format!("{FORM_RADIO_INPUT_STYLE} sr-only"));

                                label
                                    for=(format!("type-{transaction_type}"))
                                    class=(format!("{FORM_RADIO_LABEL_STYLE} text-center"))
                                {
                                    (label)
                                }
                            }
                        }
                    }
                }

                div
                {
                    label
                        for="category"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Category"
                    }

                    input
                        name="category"
                        id="category"
                        type="text"
                        placeholder="e.g. Groceries"
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label
                        for="date"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Date"
                    }

                    input
                        name="date"
                        id="date"
                        type="date"
                        max=(max_date)
                        required
                        value=(max_date)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span
                        id="indicator"
                        class="inline htmx-indicator"
                    {
                        (spinner)
                    }
                    " Create Transaction"
                }
            }
        }
    };

    base("New Transaction", &[dollar_input_styles()], &content)
}

/// The state needed for the new transaction page.
#[derive(Debug, Clone)]
pub struct NewTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "America/Sao_Paulo".
    pub local_timezone: String,
}

impl FromRef<AppState> for NewTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the page for creating a transaction.
pub async fn get_new_transaction_page(
    State(state): State<NewTransactionPageState>,
) -> Result<Response, Error> {
    let local_timezone = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone)
    })?;

    let max_date = OffsetDateTime::now_utc().to_offset(local_timezone).date();

    Ok(new_transaction_view(max_date).into_response())
}
