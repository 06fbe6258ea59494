use serde_json::{json, Value};

use crate::helpers::{register_body, second_register_body, spawn_app};

#[tokio::test]
async fn test_register_returns_201_with_the_new_account() {
    let app = spawn_app().await;

    let response = app.post_json("/api/user/register", &register_body()).await;

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(
        body["message"],
        "account created, a confirmation code was sent to your email"
    );
    assert_eq!(body["data"]["email"], "omar@example.com");
    assert_eq!(body["data"]["userName"], "omar_khaled");
    assert_eq!(body["data"]["verified"], false);
    assert_eq!(body["data"]["role"], "user");
    assert_eq!(body["data"]["avatar"], "uploads/default.png");
    // The hash never leaves the service.
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_sends_a_confirmation_code() {
    let app = spawn_app().await;

    app.register_default().await;

    assert_eq!(app.notifier.sent().len(), 1);
    let code = app.notifier.last_code().unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn test_register_rejects_a_duplicate_email() {
    let app = spawn_app().await;
    app.register_default().await;

    let mut body = second_register_body();
    body["email"] = json!("omar@example.com");
    let response = app.post_json("/api/user/register", &body).await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "The email is already signed");
    assert_eq!(body["details"]["field"], "email");
}

#[tokio::test]
async fn test_register_rejects_a_duplicate_username() {
    let app = spawn_app().await;
    app.register_default().await;

    let mut body = second_register_body();
    body["userName"] = json!("omar_khaled");
    let response = app.post_json("/api/user/register", &body).await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "The userName is already signed");
    assert_eq!(body["details"]["field"], "userName");
}

#[tokio::test]
async fn test_register_rejects_the_same_phone_in_international_form() {
    let app = spawn_app().await;
    app.register_default().await;

    // Same mobile number as the first account, written with the country code.
    let mut body = second_register_body();
    body["phoneNumber"] = json!("+20 101 234 5678");
    let response = app.post_json("/api/user/register", &body).await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["details"]["field"], "phoneNumber");
}

#[tokio::test]
async fn test_register_rejects_invalid_input() {
    let app = spawn_app().await;

    for (field, value) in [
        ("email", json!("not-an-email")),
        ("password", json!("short")),
        ("phoneNumber", json!("abc")),
        ("dateOfBirth", json!("1998-01-15")),
    ] {
        let mut body = register_body();
        body[field] = value;
        let response = app.post_json("/api/user/register", &body).await;
        assert_eq!(response.status(), 400, "field {field} should be rejected");
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["status"], "fail");
        assert_eq!(body["data"], Value::Null);
    }
}

#[tokio::test]
async fn test_worker_registration_requires_a_national_id() {
    let app = spawn_app().await;

    let mut body = register_body();
    body["role"] = json!("worker");
    let response = app.post_json("/api/user/register", &body).await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "worker accounts must provide a national id");
}

#[tokio::test]
async fn test_worker_registration_with_a_national_id_succeeds() {
    let app = spawn_app().await;

    let mut body = register_body();
    body["role"] = json!("worker");
    body["nationalId"] = json!("29801151234567");
    let response = app.post_json("/api/user/register", &body).await;

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"]["role"], "worker");
    assert_eq!(body["data"]["nationalId"], "29801151234567");
}

#[tokio::test]
async fn test_unknown_route_returns_the_envelope_404() {
    let app = spawn_app().await;

    let response = app.post_json("/api/user/nope", &json!({})).await;

    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "this resource is not available");
}
