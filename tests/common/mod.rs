use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use http_body_util::BodyExt;
use ridegate::router::init_router;
use ridegate::state::AppState;
use ridegate_auth::create_token;
use ridegate_config::jwt::DEFAULT_TOKEN_EXPIRY;
use ridegate_config::{CorsConfig, JwtConfig, PasswordConfig, RateLimitConfig};
use ridegate_core::Role;
use ridegate_db::{MemoryUserRepository, UserRepository};
use ridegate_models::{Status, UserRecord};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

#[allow(dead_code)]
pub const TEST_BCRYPT_COST: u32 = 4;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub users: Arc<MemoryUserRepository>,
}

#[allow(dead_code)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub token: String,
}

#[allow(dead_code)]
pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret".to_string(),
        token_expiry: DEFAULT_TOKEN_EXPIRY,
    }
}

#[allow(dead_code)]
pub fn setup_test_app_with_rate_limit(rate_limit_config: RateLimitConfig) -> TestApp {
    let users = Arc::new(MemoryUserRepository::new());
    let state = AppState::new(
        users.clone(),
        test_jwt_config(),
        PasswordConfig {
            bcrypt_cost: TEST_BCRYPT_COST,
        },
        CorsConfig::from_list("http://localhost:3000"),
        rate_limit_config,
    );

    TestApp {
        router: init_router(state.clone()),
        state,
        users,
    }
}

#[allow(dead_code)]
/// App backed by an empty in-memory repository, rate limiting disabled.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with_rate_limit(RateLimitConfig {
        max_requests: 0,
        window_secs: 900,
        trust_proxy: false,
    })
}

#[allow(dead_code)]
pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Inserts a user straight into the repository and issues a token for it.
#[allow(dead_code)]
pub async fn create_test_user(app: &TestApp, email: &str, password: &str, role: Role) -> TestUser {
    let now = Utc::now();
    let record = UserRecord {
        id: Uuid::new_v4(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        middle_name: None,
        email: email.to_string(),
        password: bcrypt::hash(password, TEST_BCRYPT_COST).unwrap(),
        role,
        status: Status::Active,
        avatar: None,
        metadata: None,
        is_deleted: false,
        created_at: now,
        updated_at: now,
    };
    let record = app.users.create(record).await.unwrap();

    TestUser {
        id: record.id,
        email: record.email,
        password: password.to_string(),
        token: create_token(record.id, &app.state.jwt_config).unwrap(),
    }
}

/// Sends one request through the router and returns the status and JSON body
/// (`Value::Null` for an empty body).
#[allow(dead_code)]
pub async fn send(
    app: &TestApp,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}
