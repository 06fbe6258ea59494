use std::str::FromStr;
use std::sync::Arc;

use fixpay_adapters::{
    auth::SessionTokenConfig,
    crypto::Argon2Hasher,
    http::AppState,
    notifier::CapturingNotifier,
    persistence::{InMemoryAccountStore, InMemoryRevokedTokenStore},
    storage::LocalObjectStorage,
};
use fixpay_core::AccountId;
use fixpay_service::AccountService;
use secrecy::Secret;
use serde_json::{json, Value};

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub accounts: InMemoryAccountStore,
    pub notifier: CapturingNotifier,
}

/// Boots the service on a random port with in-memory adapters, a light
/// Argon2 profile and a notifier the tests read OTP codes from.
pub async fn spawn_app() -> TestApp {
    let accounts = InMemoryAccountStore::new();
    let revoked_tokens = InMemoryRevokedTokenStore::new();
    let notifier = CapturingNotifier::new();
    let uploads_dir =
        std::env::temp_dir().join(format!("fixpay-api-{}", uuid::Uuid::new_v4()));

    let state = AppState {
        accounts: accounts.clone(),
        revoked_tokens,
        hasher: Arc::new(Argon2Hasher::with_params(1024, 1, 1)),
        notifier: Arc::new(notifier.clone()),
        storage: Arc::new(LocalObjectStorage::new(uploads_dir.clone())),
        token_config: SessionTokenConfig {
            jwt_secret: Secret::from("api-test-secret".to_string()),
            ttl_seconds: 1800,
        },
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind a random port");
    let address = format!("http://{}", listener.local_addr().unwrap());

    let service = AccountService::new(state, uploads_dir.to_string_lossy().into_owned());
    tokio::spawn(service.run_standalone(listener));

    TestApp {
        address,
        client: reqwest::Client::new(),
        accounts,
        notifier,
    }
}

pub fn register_body() -> Value {
    json!({
        "email": "omar@example.com",
        "userName": "omar_khaled",
        "password": "Str0ngPass!",
        "phoneNumber": "01012345678",
        "firstName": "Omar",
        "lastName": "Khaled",
        "dateOfBirth": "15-01-1998",
        "gender": false
    })
}

pub fn second_register_body() -> Value {
    json!({
        "email": "mona@example.com",
        "userName": "mona_adel",
        "password": "An0therPass!",
        "phoneNumber": "01112345678",
        "firstName": "Mona",
        "lastName": "Adel",
        "dateOfBirth": "02-07-2000",
        "gender": true
    })
}

pub fn account_id(body: &Value) -> AccountId {
    AccountId::from_str(body["data"]["id"].as_str().expect("response carries an id"))
        .expect("id is a uuid")
}

impl TestApp {
    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("request failed")
    }

    pub async fn post_authed(
        &self,
        path: &str,
        token: &str,
        body: Option<&Value>,
    ) -> reqwest::Response {
        let mut request = self
            .client
            .post(format!("{}{}", self.address, path))
            .header("Authorization", format!("bearer {token}"));
        if let Some(body) = body {
            request = request.json(body);
        }
        request.send().await.expect("request failed")
    }

    pub async fn get_authed(&self, path: &str, token: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .header("Authorization", format!("bearer {token}"))
            .send()
            .await
            .expect("request failed")
    }

    pub async fn patch_authed(&self, path: &str, token: &str, body: &Value) -> reqwest::Response {
        self.client
            .patch(format!("{}{}", self.address, path))
            .header("Authorization", format!("bearer {token}"))
            .json(body)
            .send()
            .await
            .expect("request failed")
    }

    pub async fn delete_authed(&self, path: &str, token: &str) -> reqwest::Response {
        self.client
            .delete(format!("{}{}", self.address, path))
            .header("Authorization", format!("bearer {token}"))
            .send()
            .await
            .expect("request failed")
    }

    /// Registers the default account and returns its response body.
    pub async fn register_default(&self) -> Value {
        let response = self.post_json("/api/user/register", &register_body()).await;
        assert_eq!(response.status(), 201);
        response.json().await.expect("register body is json")
    }

    /// Logs in and returns the session token plus the full body.
    pub async fn login(&self, email: &str, password: &str) -> (String, Value) {
        let response = self
            .post_json(
                "/api/user/login",
                &json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(response.status(), 200);
        let body: Value = response.json().await.expect("login body is json");
        let token = body["data"]["token"]
            .as_str()
            .expect("login returns a token")
            .to_string();
        (token, body)
    }

    /// Register + login shortcut for tests that just need a session.
    pub async fn register_and_login(&self) -> (String, AccountId) {
        let body = self.register_default().await;
        let id = account_id(&body);
        let (token, _) = self.login("omar@example.com", "Str0ngPass!").await;
        (token, id)
    }

    /// Marks the account's email verified directly in the store.
    pub async fn force_verify(&self, id: &AccountId) {
        self.accounts
            .with_account(id, |account| account.confirm_email(chrono::Utc::now()))
            .await;
    }

    /// Rewinds the outstanding confirmation challenge past the resend
    /// cooldown without expiring it.
    pub async fn age_confirmation_past_cooldown(&self, id: &AccountId) {
        self.accounts
            .with_account(id, |account| {
                if let Some(challenge) = account.confirmation_otp().cloned() {
                    let mut aged = challenge;
                    aged.created_at -= chrono::Duration::seconds(61);
                    account.start_confirmation(aged);
                }
            })
            .await;
    }

    /// Same rewind for the reset challenge.
    pub async fn age_reset_past_cooldown(&self, id: &AccountId) {
        self.accounts
            .with_account(id, |account| {
                if let Some(challenge) = account.reset_otp().cloned() {
                    let mut aged = challenge;
                    aged.created_at -= chrono::Duration::seconds(61);
                    account.start_password_reset(aged);
                }
            })
            .await;
    }
}
