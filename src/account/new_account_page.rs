//! Defines the route handler for the page for registering a new bank account.

use axum::response::{IntoResponse, Response};
use maud::{Markup, html};

use crate::{
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
        dollar_input_styles, loading_spinner,
    },
    navigation::NavBar,
};

fn new_account_view() -> Markup {
    let create_account_route = endpoints::ACCOUNTS_API;
    let nav_bar = NavBar::new(endpoints::NEW_ACCOUNT_VIEW).into_html();
    let spinner = loading_spinner();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(create_account_route)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "New Account" }

                div
                {
                    label
                        for="name"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Name"
                    }

                    input
                        name="name"
                        id="name"
                        type="text"
                        placeholder="e.g. Checking"
                        required
                        autofocus
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label
                        for="balance"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Balance"
                    }

                    // No min attribute: credit card balances are negative.
                    div class="input-wrapper w-full"
                    {
                        input
                            name="balance"
                            id="balance"
                            type="number"
                            step="0.01"
                            placeholder="0.00"
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span
                        id="indicator"
                        class="inline htmx-indicator"
                    {
                        (spinner)
                    }
                    " Create Account"
                }
            }
        }
    };

    base("New Account", &[dollar_input_styles()], &content)
}

/// Renders the page for registering a bank account.
pub async fn get_new_account_page() -> Response {
    new_account_view().into_response()
}
