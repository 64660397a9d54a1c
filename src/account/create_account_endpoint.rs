//! Defines the endpoint for registering a new bank account.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::IntoResponse,
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{AppState, Error, account::core::create_account, endpoints, user::UserId};

/// The state needed to create an account.
#[derive(Debug, Clone)]
pub struct CreateAccountState {
    /// The database connection for managing accounts.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The ID of the active user profile.
    pub user_id: UserId,
}

impl FromRef<AppState> for CreateAccountState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            user_id: state.user_id,
        }
    }
}

/// The form data for creating an account.
#[derive(Debug, Deserialize)]
pub struct AccountForm {
    /// A short label for the account, e.g. "Checking".
    pub name: String,
    /// The current balance in dollars. May be negative.
    pub balance: f64,
}

/// A route handler for registering a new account, redirects to the accounts view on success.
pub async fn create_account_endpoint(
    State(state): State<CreateAccountState>,
    Form(form): Form<AccountForm>,
) -> impl IntoResponse {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = create_account(state.user_id, &form.name, form.balance, &connection) {
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::ACCOUNTS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
