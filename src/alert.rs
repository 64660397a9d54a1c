//! Alert fragments for displaying success and error messages to users.
//!
//! Handlers return these fragments for htmx requests, which swap them into
//! the page's `#alert-container` via `hx-target-error`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// Alert message types for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertType {
    /// A green alert confirming that an action succeeded.
    Success,
    /// A red alert explaining why an action failed.
    Error,
}

/// An alert message with a short headline and optional details.
pub struct AlertTemplate<'a> {
    alert_type: AlertType,
    message: &'a str,
    details: &'a str,
}

impl<'a> AlertTemplate<'a> {
    /// Create a new success alert
    pub fn success(message: &'a str, details: &'a str) -> Self {
        Self {
            alert_type: AlertType::Success,
            message,
            details,
        }
    }

    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self {
            alert_type: AlertType::Error,
            message,
            details,
        }
    }

    /// Render the alert as markup.
    pub fn into_markup(self) -> Markup {
        let container_style = match self.alert_type {
            AlertType::Success => {
                "p-4 mb-4 rounded-lg border-l-4 border-green-500 bg-green-50 \
                text-green-800 dark:bg-gray-800 dark:text-green-400"
            }
            AlertType::Error => {
                "p-4 mb-4 rounded-lg border-l-4 border-red-500 bg-red-50 \
                text-red-800 dark:bg-gray-800 dark:text-red-400"
            }
        };

        html!(
            div class=(container_style) role="alert"
            {
                p class="font-medium" { (self.message) }

                @if !self.details.is_empty() {
                    p class="text-sm" { (self.details) }
                }
            }
        )
    }

    /// Render the alert as a response with the given status code.
    pub fn into_response(self, status_code: StatusCode) -> Response {
        (status_code, self.into_markup()).into_response()
    }
}
