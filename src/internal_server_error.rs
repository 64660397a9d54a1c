//! The 500 internal server error page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

/// The text shown on the internal server error page.
pub struct InternalServerErrorPageTemplate<'a> {
    /// A short description of what went wrong.
    pub description: &'a str,
    /// What the user can do about it.
    pub fix: &'a str,
}

impl Default for InternalServerErrorPageTemplate<'_> {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong.",
            fix: "Try again later or check the server logs",
        }
    }
}

pub async fn get_internal_server_error_page() -> Response {
    render_internal_server_error(Default::default())
}

pub fn render_internal_server_error(template: InternalServerErrorPageTemplate) -> Response {
    let page = error_view("Error", "500", template.description, template.fix);

    (StatusCode::INTERNAL_SERVER_ERROR, page).into_response()
}
