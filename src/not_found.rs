//! The 404 not found page.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

pub fn get_404_not_found_response() -> Response {
    let page = error_view(
        "Not Found",
        "404",
        "Sorry, this page does not exist.",
        "Check the address for typos, or head back to the dashboard.",
    );

    (StatusCode::NOT_FOUND, page).into_response()
}

#[cfg(test)]
mod not_found_tests {
    use axum::http::StatusCode;

    use super::get_404_not_found;

    #[tokio::test]
    async fn returns_not_found_status() {
        let response = get_404_not_found().await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
