use chrono::{Duration, Utc};
use serde_json::{json, Value};

use crate::helpers::spawn_app;

#[tokio::test]
async fn test_delete_soft_deletes_and_ends_the_session() {
    let app = spawn_app().await;
    let (token, id) = app.register_and_login().await;

    let response = app.delete_authed("/api/user/", &token).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "account deleted, it can be restored within 30 days"
    );

    // The deleting session is revoked with the account.
    let reuse = app.get_authed("/api/user/", &token).await;
    assert_eq!(reuse.status(), 401);
    let body: Value = reuse.json().await.unwrap();
    assert_eq!(body["message"], "your session is ended");

    app.accounts
        .with_account(&id, |account| {
            assert!(account.deletion().is_some());
        })
        .await;
}

#[tokio::test]
async fn test_login_inside_the_window_restores_the_account() {
    let app = spawn_app().await;
    let (token, id) = app.register_and_login().await;
    app.delete_authed("/api/user/", &token).await;

    app.login("omar@example.com", "Str0ngPass!").await;

    app.accounts
        .with_account(&id, |account| {
            assert!(account.deletion().is_none());
        })
        .await;
}

#[tokio::test]
async fn test_restore_endpoint_restores_with_credentials() {
    let app = spawn_app().await;
    let (token, id) = app.register_and_login().await;
    app.delete_authed("/api/user/", &token).await;

    let response = app
        .post_json(
            "/api/user/restoreAccount",
            &json!({ "email": "omar@example.com", "password": "Str0ngPass!" }),
        )
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "account restored successfully");
    assert_eq!(body["data"]["email"], "omar@example.com");

    app.accounts
        .with_account(&id, |account| {
            assert!(account.deletion().is_none());
        })
        .await;
}

#[tokio::test]
async fn test_restore_rejects_wrong_credentials() {
    let app = spawn_app().await;
    let (token, _) = app.register_and_login().await;
    app.delete_authed("/api/user/", &token).await;

    let response = app
        .post_json(
            "/api/user/restoreAccount",
            &json!({ "email": "omar@example.com", "password": "WrongPass1!" }),
        )
        .await;

    assert_eq!(response.status(), 401);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "email and password doesn't match");
}

#[tokio::test]
async fn test_restoring_a_live_account_fails() {
    let app = spawn_app().await;
    app.register_default().await;

    let response = app
        .post_json(
            "/api/user/restoreAccount",
            &json!({ "email": "omar@example.com", "password": "Str0ngPass!" }),
        )
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "the account is not deleted");
}

#[tokio::test]
async fn test_restore_past_the_window_is_terminal() {
    let app = spawn_app().await;
    let (token, id) = app.register_and_login().await;
    app.delete_authed("/api/user/", &token).await;

    // Push the deletion past its restore window.
    app.accounts
        .with_account(&id, |account| {
            account.restore();
            account.schedule_deletion(Utc::now() - Duration::days(31));
        })
        .await;

    let restore = app
        .post_json(
            "/api/user/restoreAccount",
            &json!({ "email": "omar@example.com", "password": "Str0ngPass!" }),
        )
        .await;
    assert_eq!(restore.status(), 403);
    let body: Value = restore.json().await.unwrap();
    assert_eq!(
        body["message"],
        "the restore window has passed, the account cannot be recovered"
    );

    // Login hits the same wall.
    let login = app
        .post_json(
            "/api/user/login",
            &json!({ "email": "omar@example.com", "password": "Str0ngPass!" }),
        )
        .await;
    assert_eq!(login.status(), 403);
}
