use serde_json::Value;

use crate::helpers::spawn_app;

#[tokio::test]
async fn test_logout_revokes_the_session_token() {
    let app = spawn_app().await;
    let (token, _) = app.register_and_login().await;

    let response = app.post_authed("/api/user/logout", &token, None).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "logged out successfully");

    // The revoked token is dead on every protected route.
    let reuse = app.get_authed("/api/user/", &token).await;
    assert_eq!(reuse.status(), 401);
    let body: Value = reuse.json().await.unwrap();
    assert_eq!(body["message"], "your session is ended");
}

#[tokio::test]
async fn test_a_fresh_login_is_unaffected_by_an_earlier_logout() {
    let app = spawn_app().await;
    let (token, _) = app.register_and_login().await;
    app.post_authed("/api/user/logout", &token, None).await;

    let (fresh_token, _) = app.login("omar@example.com", "Str0ngPass!").await;

    let response = app.get_authed("/api/user/", &fresh_token).await;
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_the_bearer_prefix_is_case_sensitive() {
    let app = spawn_app().await;
    let (token, _) = app.register_and_login().await;

    let response = app
        .client
        .get(format!("{}/api/user/", app.address))
        .header("Authorization", format!("Bearer {token}"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "The token is invalid");
}

#[tokio::test]
async fn test_register_confirm_login_logout_round_trip() {
    let app = spawn_app().await;
    app.register_default().await;
    let code = app.notifier.last_code().unwrap();

    let (token, _) = app.login("omar@example.com", "Str0ngPass!").await;
    let confirm = app
        .post_authed(
            "/api/user/confirmEmail",
            &token,
            Some(&serde_json::json!({ "otp": code })),
        )
        .await;
    assert_eq!(confirm.status(), 200);

    let logout = app.post_authed("/api/user/logout", &token, None).await;
    assert_eq!(logout.status(), 200);

    let reuse = app.get_authed("/api/user/", &token).await;
    assert_eq!(reuse.status(), 401);
    let body: Value = reuse.json().await.unwrap();
    assert_eq!(body["message"], "your session is ended");
}

#[tokio::test]
async fn test_garbage_tokens_are_rejected() {
    let app = spawn_app().await;

    let response = app.get_authed("/api/user/", "not-a-jwt").await;

    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "The token is invalid");
}
