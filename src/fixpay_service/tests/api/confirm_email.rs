use serde_json::{json, Value};

use crate::helpers::spawn_app;

#[tokio::test]
async fn test_confirm_email_with_the_sent_code_verifies_the_account() {
    let app = spawn_app().await;
    let (token, _) = app.register_and_login().await;
    let code = app.notifier.last_code().unwrap();

    let response = app
        .post_authed("/api/user/confirmEmail", &token, Some(&json!({ "otp": code })))
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "email confirmed successfully");
    assert_eq!(body["data"]["verified"], true);
}

#[tokio::test]
async fn test_confirm_email_rejects_a_wrong_code() {
    let app = spawn_app().await;
    let (token, _) = app.register_and_login().await;

    let response = app
        .post_authed(
            "/api/user/confirmEmail",
            &token,
            Some(&json!({ "otp": "000000" })),
        )
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "fail");
    assert_eq!(body["message"], "the otp is invalid");
}

#[tokio::test]
async fn test_confirm_email_requires_a_session() {
    let app = spawn_app().await;

    let response = app
        .post_json("/api/user/confirmEmail", &json!({ "otp": "123456" }))
        .await;

    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "The token is required");
}

#[tokio::test]
async fn test_resend_inside_the_cooldown_is_rate_limited() {
    let app = spawn_app().await;
    let (token, _) = app.register_and_login().await;

    // The registration code is still fresh.
    let response = app
        .post_authed("/api/user/resend-confirmation-otp", &token, None)
        .await;

    assert_eq!(response.status(), 429);
    assert!(response.headers().contains_key("retry-after"));
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "fail");
    assert!(body["details"]["retryAfterSeconds"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_resend_after_the_cooldown_invalidates_the_old_code() {
    let app = spawn_app().await;
    let (token, id) = app.register_and_login().await;
    let old_code = app.notifier.last_code().unwrap();
    app.age_confirmation_past_cooldown(&id).await;

    let response = app
        .post_authed("/api/user/resend-confirmation-otp", &token, None)
        .await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "a new confirmation code was sent to your email"
    );

    let new_code = app.notifier.last_code().unwrap();
    assert_ne!(old_code, new_code);

    // The superseded code no longer confirms.
    let stale = app
        .post_authed(
            "/api/user/confirmEmail",
            &token,
            Some(&json!({ "otp": old_code })),
        )
        .await;
    assert_eq!(stale.status(), 400);

    let fresh = app
        .post_authed(
            "/api/user/confirmEmail",
            &token,
            Some(&json!({ "otp": new_code })),
        )
        .await;
    assert_eq!(fresh.status(), 200);
}

#[tokio::test]
async fn test_confirming_an_already_verified_email_fails() {
    let app = spawn_app().await;
    let (token, id) = app.register_and_login().await;
    let code = app.notifier.last_code().unwrap();
    app.force_verify(&id).await;

    let response = app
        .post_authed("/api/user/confirmEmail", &token, Some(&json!({ "otp": code })))
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "the email is already verified");
}
