use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use fixpay_adapters::{
    auth::SessionTokenConfig,
    config::Settings,
    crypto::Argon2Hasher,
    email::PostmarkEmailClient,
    http::{routes::set_production_mode, AppState},
    notifier::notification_channel,
    persistence::{PostgresAccountStore, RedisRevokedTokenStore},
    storage::LocalObjectStorage,
};
use fixpay_core::Email;
use fixpay_service::AccountService;
use redis::Client;
use reqwest::Client as HttpClient;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::Mutex;
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");
    dotenvy::dotenv().ok();

    let settings = Settings::load();
    set_production_mode(settings.app.production);

    // Database pool and embedded migrations
    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(settings.postgres.url.expose_secret())
        .await?;
    sqlx::migrate!().run(&pg_pool).await?;

    // Redis connection for the revocation list
    let redis_client = Client::open(format!("redis://{}/", settings.redis.host_name))?;
    let redis_conn = Arc::new(Mutex::new(redis_client.get_connection()?));

    let accounts = Arc::new(PostgresAccountStore::new(pg_pool));
    let revoked_tokens = RedisRevokedTokenStore::new(redis_conn);

    // Email delivery: Postmark behind the notification channel
    let http_client = HttpClient::builder()
        .timeout(Duration::from_millis(settings.email_client.timeout_in_millis))
        .build()?;
    let email_client = PostmarkEmailClient::new(
        settings.email_client.base_url.clone(),
        Email::try_from(settings.email_client.sender.clone())?,
        settings.email_client.auth_token.clone(),
        http_client,
    );
    let (notifier, worker) = notification_channel(email_client);
    tokio::spawn(worker.run());

    let state = AppState {
        accounts,
        revoked_tokens,
        hasher: Arc::new(Argon2Hasher::new()),
        notifier: Arc::new(notifier),
        storage: Arc::new(LocalObjectStorage::new(settings.app.uploads_dir.clone())),
        token_config: SessionTokenConfig {
            jwt_secret: settings.auth.jwt_secret.clone(),
            ttl_seconds: settings.auth.session_ttl_seconds,
        },
    };

    let service = AccountService::new(state, settings.app.uploads_dir.clone());

    let listener = tokio::net::TcpListener::bind(&settings.app.address).await?;
    service.run_standalone(listener).await?;

    Ok(())
}

fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
