use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use uuid::Uuid;

/// A registered and logged-in user.
pub struct TestUser {
    pub user_id: Uuid,
    pub email: String,
    pub password: String,
    pub token: String,
}

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Register through the API, then log in and keep the token.
pub async fn register_test_user(client: &TestServer, email: &str) -> TestUser {
    let response = client
        .post("/register")
        .json(&json!({
            "username": "tester",
            "email": email,
            "password": TEST_PASSWORD,
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let user_id: Uuid = response.json::<Value>()["user_id"]
        .as_str()
        .and_then(|id| id.parse().ok())
        .expect("register response carries user_id");

    let response = client
        .post("/login")
        .json(&json!({ "email": email, "password": TEST_PASSWORD }))
        .await;
    response.assert_status_ok();
    let token = response.json::<Value>()["token"]
        .as_str()
        .expect("login response carries token")
        .to_string();

    TestUser {
        user_id,
        email: email.to_string(),
        password: TEST_PASSWORD.to_string(),
        token,
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
