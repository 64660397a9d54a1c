//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    account::{create_account_endpoint, get_accounts_page, get_new_account_page},
    dashboard::{get_dashboard_page, refresh_insights},
    endpoints,
    goal::{create_goal_endpoint, get_goals_page, get_new_goal_page},
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    transaction::{create_transaction_endpoint, get_new_transaction_page, get_transactions_page},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::COFFEE, get(get_coffee))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_new_transaction_page),
        )
        .route(endpoints::GOALS_VIEW, get(get_goals_page))
        .route(endpoints::NEW_GOAL_VIEW, get(get_new_goal_page))
        .route(endpoints::ACCOUNTS_VIEW, get(get_accounts_page))
        .route(endpoints::NEW_ACCOUNT_VIEW, get(get_new_account_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(endpoints::GOALS_API, post(create_goal_endpoint))
        .route(endpoints::ACCOUNTS_API, post(create_account_endpoint))
        .route(endpoints::REFRESH_INSIGHTS, post(refresh_insights))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> Response {
    (StatusCode::IM_A_TEAPOT, Html("I'm a teapot")).into_response()
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

#[cfg(test)]
mod route_tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{
        AppState, endpoints, routing::build_router, routing::get_index_page,
        user::get_or_create_user,
    };

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::DASHBOARD_VIEW);
    }

    fn get_test_server() -> TestServer {
        let conn = Connection::open_in_memory().unwrap();
        let user_id = {
            crate::db::initialize(&conn).unwrap();
            get_or_create_user("test@example.com", &conn).unwrap().id
        };
        let state = AppState::new(conn, "Etc/UTC", user_id).unwrap();

        TestServer::new(build_router(state))
    }

    #[tokio::test]
    async fn pages_respond_ok() {
        let server = get_test_server();

        for endpoint in [
            endpoints::DASHBOARD_VIEW,
            endpoints::TRANSACTIONS_VIEW,
            endpoints::NEW_TRANSACTION_VIEW,
            endpoints::GOALS_VIEW,
            endpoints::NEW_GOAL_VIEW,
            endpoints::ACCOUNTS_VIEW,
            endpoints::NEW_ACCOUNT_VIEW,
        ] {
            let response = server.get(endpoint).await;
            response.assert_status_ok();
        }
    }

    #[tokio::test]
    async fn unknown_route_returns_not_found() {
        let server = get_test_server();

        let response = server.get("/does-not-exist").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn coffee_route_is_a_teapot() {
        let server = get_test_server();

        let response = server.get(endpoints::COFFEE).await;

        response.assert_status(StatusCode::IM_A_TEAPOT);
    }
}
