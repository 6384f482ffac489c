mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_test_user, generate_unique_email, send, setup_test_app};
use http_body_util::BodyExt;
use ridegate_core::Role;
use ridegate_db::{Lookup, Scope, UserRepository};
use ridegate_models::Status;
use serde_json::{Value, json};
use tower::ServiceExt;

fn register_body(email: &str, role: &str) -> Value {
    json!({
        "firstName": "John",
        "lastName": "Doe",
        "email": email,
        "password": "pw123456",
        "role": role
    })
}

#[tokio::test]
async fn test_register_login_and_list() {
    let app = setup_test_app();
    let email = generate_unique_email();

    let (status, body) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(register_body(&email, "passenger")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["data"]["user"]["email"], email.as_str());
    assert_eq!(body["data"]["user"]["role"], "passenger");
    assert_eq!(body["data"]["user"]["status"], "active");
    assert!(body["data"]["user"].get("password").is_none());
    assert!(body["data"]["token"].as_str().is_some());

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": email, "password": "pw123456", "role": "passenger"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["data"]["user"]["firstName"], "John");
    assert!(body["data"]["user"].get("status").is_none());
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "GET", "/user", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    let keys: Vec<&String> = data[0].as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["id"]);
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["pagination"]["page"], 1);
}

#[tokio::test]
async fn test_register_defaults_to_passenger() {
    let app = setup_test_app();
    let email = generate_unique_email();

    let (status, body) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "firstName": "Jane",
            "lastName": "Roe",
            "email": email,
            "password": "pw123456"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["user"]["role"], "passenger");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = setup_test_app();
    let email = generate_unique_email();

    let (status, _) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(register_body(&email, "driver")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(register_body(&email, "passenger")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "User already exists");
}

#[tokio::test]
async fn test_register_duplicate_email_of_deleted_user() {
    let app = setup_test_app();
    let email = generate_unique_email();
    let existing = create_test_user(&app, &email, "pw123456", Role::Driver).await;

    let mut record = app
        .users
        .find_one(&Lookup::Id(existing.id), Scope::All)
        .await
        .unwrap()
        .unwrap();
    record.is_deleted = true;
    app.users.update(record).await.unwrap();

    let (status, body) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(register_body(&email, "passenger")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User already exists");
}

#[tokio::test]
async fn test_register_as_admin_forbidden() {
    let app = setup_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(register_body(&generate_unique_email(), "admin")),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Insufficient permissions");
    assert!(app.users.is_empty().await);
}

#[tokio::test]
async fn test_register_without_last_name_rejected() {
    let app = setup_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "firstName": "John",
            "email": generate_unique_email(),
            "password": "pw123456"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "lastName is required");
    assert!(app.users.is_empty().await);
}

#[tokio::test]
async fn test_register_invalid_role() {
    let app = setup_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(register_body(&generate_unique_email(), "pilot")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid value: pilot");
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = setup_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "firstName": "John",
            "lastName": "Doe",
            "email": "not-an-email",
            "password": "short"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("email must be a valid email address"));
    assert!(message.contains("password must be at least 8 characters"));
}

#[tokio::test]
async fn test_register_without_content_type() {
    let app = setup_test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/auth/register")
        .body(Body::from(
            serde_json::to_string(&register_body(&generate_unique_email(), "driver")).unwrap(),
        ))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        json["message"],
        "Missing 'Content-Type: application/json' header"
    );
}

#[tokio::test]
async fn test_login_role_mismatch() {
    let app = setup_test_app();
    let email = generate_unique_email();
    create_test_user(&app, &email, "pw123456", Role::Driver).await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": email, "password": "pw123456", "role": "passenger"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Role does not match this account");
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = setup_test_app();
    let email = generate_unique_email();
    create_test_user(&app, &email, "pw123456", Role::Driver).await;

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": email, "password": "wrong-password", "role": "driver"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_unknown_email() {
    let app = setup_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({
            "email": generate_unique_email(),
            "password": "pw123456",
            "role": "driver"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_deleted_user() {
    let app = setup_test_app();
    let email = generate_unique_email();
    let user = create_test_user(&app, &email, "pw123456", Role::Passenger).await;

    let mut record = app
        .users
        .find_one(&Lookup::Id(user.id), Scope::All)
        .await
        .unwrap()
        .unwrap();
    record.is_deleted = true;
    app.users.update(record).await.unwrap();

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": email, "password": "pw123456", "role": "passenger"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_inactive_user() {
    let app = setup_test_app();
    let email = generate_unique_email();
    let user = create_test_user(&app, &email, "pw123456", Role::Driver).await;

    let mut record = app
        .users
        .find_one(&Lookup::Id(user.id), Scope::All)
        .await
        .unwrap()
        .unwrap();
    record.status = Status::Banned;
    app.users.update(record).await.unwrap();

    let (status, body) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({"email": email, "password": "pw123456", "role": "driver"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Account is not active");
}

#[tokio::test]
async fn test_token_of_deactivated_user_rejected() {
    let app = setup_test_app();
    let user = create_test_user(&app, &generate_unique_email(), "pw123456", Role::Driver).await;

    let (status, _) = send(&app, "GET", "/user", Some(&user.token), None).await;
    assert_eq!(status, StatusCode::OK);

    let mut record = app
        .users
        .find_one(&Lookup::Id(user.id), Scope::All)
        .await
        .unwrap()
        .unwrap();
    record.status = Status::Inactive;
    app.users.update(record).await.unwrap();

    let (status, body) = send(&app, "GET", "/user", Some(&user.token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token is not valid");
}

#[tokio::test]
async fn test_missing_token() {
    let app = setup_test_app();

    let (status, body) = send(&app, "GET", "/user", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "No token provided");
}

#[tokio::test]
async fn test_invalid_token() {
    let app = setup_test_app();

    let (status, body) = send(&app, "GET", "/user", Some("not-a-jwt"), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token is not valid");
}

#[tokio::test]
async fn test_token_for_unknown_user_rejected() {
    let app = setup_test_app();
    let token =
        ridegate_auth::create_token(uuid::Uuid::new_v4(), &common::test_jwt_config()).unwrap();

    let (status, body) = send(&app, "GET", "/user", Some(&token), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token is not valid");
}
