pub mod in_memory_account_store;
pub mod in_memory_revoked_token_store;
pub mod postgres_account_store;
pub mod redis_revoked_token_store;

pub use in_memory_account_store::InMemoryAccountStore;
pub use in_memory_revoked_token_store::InMemoryRevokedTokenStore;
pub use postgres_account_store::PostgresAccountStore;
pub use redis_revoked_token_store::RedisRevokedTokenStore;
