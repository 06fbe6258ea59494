use serde_json::{json, Value};

use crate::helpers::{account_id, second_register_body, spawn_app};

#[tokio::test]
async fn test_listing_and_fetching_accounts_requires_a_session() {
    let app = spawn_app().await;
    let body = app.register_default().await;
    let id = account_id(&body);

    let list = app.client.get(format!("{}/api/user/", app.address)).send().await.unwrap();
    assert_eq!(list.status(), 401);

    let get = app
        .client
        .get(format!("{}/api/user/{id}", app.address))
        .send()
        .await
        .unwrap();
    assert_eq!(get.status(), 401);
}

#[tokio::test]
async fn test_get_account_by_id() {
    let app = spawn_app().await;
    let (token, id) = app.register_and_login().await;

    let response = app.get_authed(&format!("/api/user/{id}"), &token).await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "account");
    assert_eq!(body["data"]["id"], id.to_string());
    assert_eq!(body["data"]["userName"], "omar_khaled");
}

#[tokio::test]
async fn test_get_account_rejects_a_malformed_id() {
    let app = spawn_app().await;
    let (token, _) = app.register_and_login().await;

    let response = app.get_authed("/api/user/not-a-uuid", &token).await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "invalid account id");
}

#[tokio::test]
async fn test_get_unknown_account_returns_404() {
    let app = spawn_app().await;
    let (token, _) = app.register_and_login().await;

    let response = app
        .get_authed(
            &format!("/api/user/{}", uuid::Uuid::new_v4()),
            &token,
        )
        .await;

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_patching_your_own_profile_succeeds() {
    let app = spawn_app().await;
    let (token, id) = app.register_and_login().await;

    let response = app
        .patch_authed(
            &format!("/api/user/{id}"),
            &token,
            &json!({
                "firstName": "Omar",
                "lastName": "Mahmoud",
                "address": { "government": "Cairo", "city": "Nasr City", "street": "Abbas El Akkad" }
            }),
        )
        .await;

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "profile updated successfully");
    assert_eq!(body["data"]["name"]["last"], "Mahmoud");
    assert_eq!(body["data"]["address"]["city"], "Nasr City");
}

#[tokio::test]
async fn test_name_parts_must_change_together() {
    let app = spawn_app().await;
    let (token, id) = app.register_and_login().await;

    let response = app
        .patch_authed(
            &format!("/api/user/{id}"),
            &token,
            &json!({ "firstName": "Omar" }),
        )
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["message"],
        "firstName and lastName must be changed together"
    );
}

#[tokio::test]
async fn test_patching_someone_else_is_forbidden() {
    let app = spawn_app().await;
    let (token, _) = app.register_and_login().await;
    let other = app
        .post_json("/api/user/register", &second_register_body())
        .await;
    let other_body: Value = other.json().await.unwrap();
    let other_id = account_id(&other_body);

    let response = app
        .patch_authed(
            &format!("/api/user/{other_id}"),
            &token,
            &json!({ "gender": true }),
        )
        .await;

    assert_eq!(response.status(), 403);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "you may only edit your own profile");
}
