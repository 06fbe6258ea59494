use serde_json::{json, Value};

use crate::helpers::spawn_app;

#[tokio::test]
async fn test_login_returns_a_token_and_the_account() {
    let app = spawn_app().await;
    app.register_default().await;

    let response = app
        .post_json(
            "/api/user/login",
            &json!({ "email": "omar@example.com", "password": "Str0ngPass!" }),
        )
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "logged in successfully");
    assert!(body["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["data"]["account"]["email"], "omar@example.com");
}

#[tokio::test]
async fn test_unknown_email_and_wrong_password_fail_the_same_way() {
    let app = spawn_app().await;
    app.register_default().await;

    let unknown = app
        .post_json(
            "/api/user/login",
            &json!({ "email": "nobody@example.com", "password": "Str0ngPass!" }),
        )
        .await;
    assert_eq!(unknown.status(), 401);
    let unknown_body: Value = unknown.json().await.unwrap();

    let wrong = app
        .post_json(
            "/api/user/login",
            &json!({ "email": "omar@example.com", "password": "WrongPass1!" }),
        )
        .await;
    assert_eq!(wrong.status(), 401);
    let wrong_body: Value = wrong.json().await.unwrap();

    // Both shapes are identical so callers cannot probe for accounts.
    assert_eq!(unknown_body, wrong_body);
    assert_eq!(wrong_body["message"], "email and password doesn't match");
}

#[tokio::test]
async fn test_login_token_grants_access_to_protected_routes() {
    let app = spawn_app().await;
    let (token, _) = app.register_and_login().await;

    let response = app.get_authed("/api/user/", &token).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}
