use axum::http::StatusCode;
use axum_test::TestServer;
use rusqlite::Connection;
use serde_json::{Value, json};

use crate::{AppState, build_router, endpoints};

/// A password that is strong enough to pass validation.
pub(crate) const TEST_PASSWORD: &str = "thisisaverysecurepassword!!!!";

/// The lowest cost bcrypt accepts, so that tests that register users run quickly.
const TEST_PASSWORD_COST: u32 = 4;

pub(crate) fn must_create_test_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not create in-memory SQLite database");

    AppState::new(connection, "42", "Etc/UTC")
        .expect("Could not create app state")
        .with_password_cost(TEST_PASSWORD_COST)
}

pub(crate) fn must_create_test_server() -> (TestServer, AppState) {
    let state = must_create_test_state();
    let server =
        TestServer::try_new(build_router(state.clone())).expect("Could not create test server.");

    (server, state)
}

/// Register a user with `email` and [TEST_PASSWORD] and return their access token.
pub(crate) async fn must_register(server: &TestServer, email: &str) -> String {
    let response = server
        .post(endpoints::REGISTER)
        .json(&json!({
            "name": "Test User",
            "email": email,
            "password": TEST_PASSWORD,
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    response.json::<Value>()["data"]["token"]
        .as_str()
        .expect("Registration response is missing the token")
        .to_owned()
}
