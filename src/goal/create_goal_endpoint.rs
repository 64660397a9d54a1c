//! Defines the endpoint for creating a new savings goal.
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
use time::Date;

use crate::{
    AppState, Error, endpoints,
    forms::{empty_date_as_none, empty_string_as_none},
    goal::{Goal, core::create_goal},
    user::UserId,
};

/// The state needed to create a goal.
#[derive(Debug, Clone)]
pub struct CreateGoalState {
    /// The database connection for managing goals.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The ID of the active user profile.
    pub user_id: UserId,
}

impl FromRef<AppState> for CreateGoalState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            user_id: state.user_id,
        }
    }
}

/// The form data for creating a goal.
#[derive(Debug, Deserialize)]
pub struct GoalForm {
    /// A short label describing the goal.
    pub name: String,
    /// How much money the goal aims to save.
    pub target_amount: f64,
    /// How much money has already been saved towards the goal. Submitted as
    /// an empty string when left blank.
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub current_amount: Option<f64>,
    /// An optional date by which the goal should be reached. Submitted as an
    /// empty string when left blank.
    #[serde(default, deserialize_with = "empty_date_as_none")]
    pub deadline: Option<Date>,
}

/// A route handler for creating a new goal, redirects to the goals view on success.
pub async fn create_goal_endpoint(
    State(state): State<CreateGoalState>,
    Form(form): Form<GoalForm>,
) -> impl IntoResponse {
    let builder = Goal::build(state.user_id, &form.name, form.target_amount)
        .current_amount(form.current_amount.unwrap_or(0.0))
        .deadline(form.deadline);

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = create_goal(builder, &connection) {
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::GOALS_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode, response::IntoResponse};
    use axum_extra::extract::Form;
    use axum_htmx::HX_REDIRECT;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        goal::{
            create_goal_endpoint::{CreateGoalState, GoalForm, create_goal_endpoint},
            get_goals,
        },
        user::{UserId, get_or_create_user},
    };

    fn get_test_state() -> (CreateGoalState, UserId) {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let user_id = get_or_create_user("test@example.com", &conn).unwrap().id;

        (
            CreateGoalState {
                db_connection: Arc::new(Mutex::new(conn)),
                user_id,
            },
            user_id,
        )
    }

    #[tokio::test]
    async fn can_create_goal() {
        let (state, user_id) = get_test_state();

        let form = GoalForm {
            name: "Emergency fund".to_owned(),
            target_amount: 5000.0,
            current_amount: Some(100.0),
            deadline: Some(date!(2025 - 12 - 31)),
        };

        let response = create_goal_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(HX_REDIRECT).unwrap(),
            "/goals",
            "want redirect to /goals"
        );

        let connection = state.db_connection.lock().unwrap();
        let goals = get_goals(user_id, &connection).unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].name, "Emergency fund");
        assert_eq!(goals[0].current_amount, 100.0);
    }

    #[tokio::test]
    async fn rejects_empty_name() {
        let (state, user_id) = get_test_state();

        let form = GoalForm {
            name: "   ".to_owned(),
            target_amount: 100.0,
            current_amount: None,
            deadline: None,
        };

        let response = create_goal_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let connection = state.db_connection.lock().unwrap();
        assert!(get_goals(user_id, &connection).unwrap().is_empty());
    }

    #[test]
    fn form_parses_optional_fields_as_none() {
        let form: GoalForm =
            serde_html_form::from_str("name=Holiday&target_amount=1000&current_amount=&deadline=")
                .unwrap();

        assert_eq!(form.name, "Holiday");
        assert_eq!(form.current_amount, None);
        assert_eq!(form.deadline, None);
    }

    #[test]
    fn form_parses_filled_optional_fields() {
        let form: GoalForm = serde_html_form::from_str(
            "name=Holiday&target_amount=1000&current_amount=250&deadline=2025-12-31",
        )
        .unwrap();

        assert_eq!(form.current_amount, Some(250.0));
        assert_eq!(form.deadline, Some(date!(2025 - 12 - 31)));
    }

    #[tokio::test]
    async fn creates_goal_when_optional_fields_are_blank() {
        let (state, user_id) = get_test_state();

        let form: GoalForm =
            serde_html_form::from_str("name=Holiday&target_amount=1000&current_amount=&deadline=")
                .unwrap();

        let response = create_goal_endpoint(State(state.clone()), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let connection = state.db_connection.lock().unwrap();
        let goals = get_goals(user_id, &connection).unwrap();
        assert_eq!(goals.len(), 1);
        assert_eq!(goals[0].current_amount, 0.0);
        assert_eq!(goals[0].deadline, None);
    }
}
