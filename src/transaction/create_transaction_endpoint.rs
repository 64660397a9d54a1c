//! Defines the endpoint for creating a new transaction.
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
use time::{Date, OffsetDateTime};

use crate::{
    AppState, Error, endpoints,
    forms::empty_string_as_none,
    timezone::get_local_offset,
    transaction::{Transaction, TransactionType, core::create_transaction},
    user::UserId,
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name.
    pub local_timezone: String,
    /// The ID of the active user profile.
    pub user_id: UserId,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
            user_id: state.user_id,
        }
    }
}

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// The value of the transaction in dollars. Always non-negative.
    pub amount: f64,
    /// Whether the money came in or went out.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The category label for the transaction. Submitted as an empty string
    /// when left blank, meaning uncategorized.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub category: Option<String>,
    /// The date when the transaction occurred.
    pub date: Date,
}

/// A route handler for creating a new transaction, redirects to transactions view on success.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> impl IntoResponse {
    let Some(local_timezone) = get_local_offset(&state.local_timezone) else {
        return Error::InvalidTimezoneError(state.local_timezone).into_alert_response();
    };

    let today = OffsetDateTime::now_utc().to_offset(local_timezone).date();

    if form.date > today {
        return Error::FutureDate(form.date).into_alert_response();
    }

    let transaction = Transaction::build(
        state.user_id,
        form.amount,
        form.transaction_type,
        form.date,
    )
    .category(form.category);

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = create_transaction(transaction, &connection) {
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::TRANSACTIONS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{body::Body, extract::State, http::Response, response::IntoResponse};
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use axum::http::StatusCode;
    use rusqlite::Connection;
    use time::{Duration, OffsetDateTime};

    use crate::{
        db::initialize,
        transaction::{
            TransactionType,
            create_transaction_endpoint::{
                CreateTransactionState, TransactionForm, create_transaction_endpoint,
            },
            get_recent_transactions,
        },
        user::{UserId, get_or_create_user},
    };

    fn get_test_state() -> (CreateTransactionState, UserId) {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let user_id = get_or_create_user("test@example.com", &conn).unwrap().id;

        (
            CreateTransactionState {
                db_connection: Arc::new(Mutex::new(conn)),
                local_timezone: "Etc/UTC".to_owned(),
                user_id,
            },
            user_id,
        )
    }

    #[tokio::test]
    async fn can_create_transaction() {
        let (state, user_id) = get_test_state();

        let form = TransactionForm {
            amount: 12.3,
            transaction_type: TransactionType::Expense,
            category: Some("Food".to_owned()),
            date: OffsetDateTime::now_utc().date(),
        };

        let response = create_transaction_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_redirects_to_transactions_view(response);

        let connection = state.db_connection.lock().unwrap();
        let transactions = get_recent_transactions(user_id, 10, &connection).unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].amount, 12.3);
        assert_eq!(transactions[0].category.as_deref(), Some("Food"));
    }

    #[tokio::test]
    async fn rejects_future_date() {
        let (state, user_id) = get_test_state();

        let form = TransactionForm {
            amount: 12.3,
            transaction_type: TransactionType::Expense,
            category: None,
            date: OffsetDateTime::now_utc().date() + Duration::days(2),
        };

        let response = create_transaction_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let connection = state.db_connection.lock().unwrap();
        let transactions = get_recent_transactions(user_id, 10, &connection).unwrap();
        assert!(transactions.is_empty());
    }

    #[tokio::test]
    async fn rejects_negative_amount() {
        let (state, user_id) = get_test_state();

        let form = TransactionForm {
            amount: -5.0,
            transaction_type: TransactionType::Income,
            category: None,
            date: OffsetDateTime::now_utc().date(),
        };

        let response = create_transaction_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let connection = state.db_connection.lock().unwrap();
        let transactions = get_recent_transactions(user_id, 10, &connection).unwrap();
        assert!(transactions.is_empty());
    }

    #[test]
    fn form_parses_type_and_optional_category() {
        let form: TransactionForm =
            serde_html_form::from_str("amount=9.99&type=income&category=&date=2025-06-01").unwrap();

        assert_eq!(form.transaction_type, TransactionType::Income);
        assert_eq!(form.category, None);
        assert_eq!(form.amount, 9.99);
    }

    #[track_caller]
    fn assert_redirects_to_transactions_view(response: Response<Body>) {
        let location = response
            .headers()
            .get(HX_REDIRECT)
            .expect("expected response to have the header hx-redirect");
        assert_eq!(
            location, "/transactions",
            "got redirect to {location:?}, want redirect to /transactions"
        );
    }
}
