//! Defines the route handler for the page for creating a new savings goal.

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

fn new_goal_view() -> Markup {
    let create_goal_route = endpoints::GOALS_API;
    let nav_bar = NavBar::new(endpoints::NEW_GOAL_VIEW).into_html();
    let spinner = loading_spinner();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(create_goal_route)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "New Goal" }

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
                        placeholder="e.g. Emergency fund"
                        required
                        autofocus
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label
                        for="target_amount"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Target Amount"
                    }

                    div class="input-wrapper w-full"
                    {
                        input
                            name="target_amount"
                            id="target_amount"
                            type="number"
                            min="0"
                            step="0.01"
                            placeholder="0.00"
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                div
                {
                    label
                        for="current_amount"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Already Saved"
                    }

                    div class="input-wrapper w-full"
                    {
                        input
                            name="current_amount"
                            id="current_amount"
                            type="number"
                            min="0"
                            step="0.01"
                            placeholder="0.00"
                            value="0"
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                div
                {
                    label
                        for="deadline"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Deadline (optional)"
                    }

                    input
                        name="deadline"
                        id="deadline"
                        type="date"
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
                    " Create Goal"
                }
            }
        }
    };

    base("New Goal", &[dollar_input_styles()], &content)
}

/// Renders the page for creating a savings goal.
pub async fn get_new_goal_page() -> Response {
    new_goal_view().into_response()
}

#[cfg(test)]
mod view_tests {
    use axum::{body::Body, http::StatusCode, response::Response};
    use scraper::{ElementRef, Html};

    use crate::{endpoints, goal::get_new_goal_page};

    #[tokio::test]
    async fn new_goal_returns_form() {
        let response = get_new_goal_page().await;

        assert_eq!(response.status(), StatusCode::OK);
        let document = parse_html(response).await;
        assert!(
            document.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            document.errors
        );
        assert_correct_form(&document);
    }

    #[track_caller]
    fn assert_correct_form(document: &Html) {
        let form_selector = scraper::Selector::parse("form").unwrap();
        let forms = document.select(&form_selector).collect::<Vec<_>>();
        assert_eq!(forms.len(), 1, "want 1 form, got {}", forms.len());

        let form = forms.first().unwrap();
        let hx_post = form.value().attr("hx-post");
        assert_eq!(
            hx_post,
            Some(endpoints::GOALS_API),
            "want form with attribute hx-post=\"{}\", got {:?}",
            endpoints::GOALS_API,
            hx_post
        );

        for (name, element_type) in [
            ("name", "text"),
            ("target_amount", "number"),
            ("deadline", "date"),
        ] {
            assert_has_input(form, name, element_type);
        }
    }

    #[track_caller]
    fn assert_has_input(form: &ElementRef, name: &str, element_type: &str) {
        let selector_string = format!("input[name={name}]");
        let input_selector = scraper::Selector::parse(&selector_string).unwrap();
        let inputs = form.select(&input_selector).collect::<Vec<_>>();
        assert_eq!(inputs.len(), 1, "want 1 {name} input, got {}", inputs.len());

        let input_type = inputs.first().unwrap().value().attr("type");
        assert_eq!(
            input_type,
            Some(element_type),
            "want {name} input with type=\"{element_type}\", got {input_type:?}"
        );
    }

    async fn parse_html(response: Response<Body>) -> Html {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX)
            .await
            .expect("Could not get response body");
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }
}
