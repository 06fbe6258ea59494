use async_trait::async_trait;
use fixpay_core::{
    Account, AccountId, AccountStore, AccountStoreError, DuplicateField, Email, UniqueIdentity,
};
use secrecy::ExposeSecret;
use sqlx::{PgPool, Pool, Postgres, Row};

/// Account store on PostgreSQL. The account lives in a JSONB document
/// column; the unique identity fields are mirrored into their own columns
/// so the database enforces uniqueness.
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresAccountStore { pool }
    }
}

#[async_trait]
impl AccountStore for PostgresAccountStore {
    #[tracing::instrument(name = "Adding account to PostgreSQL", skip_all)]
    async fn insert(&self, account: Account) -> Result<(), AccountStoreError> {
        let doc = serde_json::to_value(&account)
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        let query = sqlx::query(
            r#"
                INSERT INTO accounts (id, email, username, phone, national_id, doc)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(*account.id().as_uuid())
        .bind(account.email().as_ref().expose_secret())
        .bind(account.username().as_str())
        .bind(account.phone().as_str())
        .bind(account.national_id().map(|id| id.as_str()))
        .bind(doc);

        query.execute(&self.pool).await.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if let Some(constraint) = db_err.constraint() {
                    return AccountStoreError::Duplicate(duplicate_field(constraint));
                }
            }
            AccountStoreError::UnexpectedError(e.to_string())
        })?;

        Ok(())
    }

    #[tracing::instrument(name = "Updating account in PostgreSQL", skip_all)]
    async fn update(&self, account: &Account) -> Result<(), AccountStoreError> {
        let doc = serde_json::to_value(account)
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        // Identity columns are written once at insert; every later write is
        // a document replace.
        let query = sqlx::query(
            r#"
                UPDATE accounts
                SET doc = $2
                WHERE id = $1
            "#,
        )
        .bind(*account.id().as_uuid())
        .bind(doc);

        let result = query
            .execute(&self.pool)
            .await
            .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountStoreError::AccountNotFound);
        }

        Ok(())
    }

    #[tracing::instrument(name = "Retrieving account by id from PostgreSQL", skip_all)]
    async fn find_by_id(&self, id: &AccountId) -> Result<Account, AccountStoreError> {
        let row = sqlx::query(
            r#"
                SELECT doc
                FROM accounts
                WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(AccountStoreError::AccountNotFound);
        };

        decode_account(row)
    }

    #[tracing::instrument(name = "Retrieving account by email from PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &Email) -> Result<Account, AccountStoreError> {
        let row = sqlx::query(
            r#"
                SELECT doc
                FROM accounts
                WHERE email = $1
            "#,
        )
        .bind(email.as_ref().expose_secret())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        let Some(row) = row else {
            return Err(AccountStoreError::AccountNotFound);
        };

        decode_account(row)
    }

    #[tracing::instrument(name = "Listing accounts from PostgreSQL", skip_all)]
    async fn list(&self) -> Result<Vec<Account>, AccountStoreError> {
        let rows = sqlx::query(
            r#"
                SELECT doc
                FROM accounts
                ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        rows.into_iter().map(decode_account).collect()
    }

    #[tracing::instrument(name = "Checking identity conflicts in PostgreSQL", skip_all)]
    async fn find_conflict(
        &self,
        identity: UniqueIdentity<'_>,
    ) -> Result<Option<DuplicateField>, AccountStoreError> {
        // One query over every unique column; the first match in field
        // order wins when several collide.
        let row = sqlx::query(
            r#"
                SELECT
                    bool_or(email = $1) AS email_taken,
                    bool_or(username = $2) AS username_taken,
                    bool_or(phone = $3) AS phone_taken,
                    bool_or(national_id = $4) AS national_id_taken
                FROM accounts
                WHERE email = $1
                    OR username = $2
                    OR phone = $3
                    OR national_id = $4
            "#,
        )
        .bind(identity.email.as_ref().expose_secret())
        .bind(identity.username.as_str())
        .bind(identity.phone.as_str())
        .bind(identity.national_id.map(|id| id.as_str()))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;

        let taken = |column: &str| -> Result<bool, AccountStoreError> {
            row.try_get::<Option<bool>, _>(column)
                .map(|flag| flag.unwrap_or(false))
                .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))
        };

        if taken("email_taken")? {
            return Ok(Some(DuplicateField::Email));
        }
        if taken("username_taken")? {
            return Ok(Some(DuplicateField::Username));
        }
        if taken("phone_taken")? {
            return Ok(Some(DuplicateField::Phone));
        }
        if taken("national_id_taken")? {
            return Ok(Some(DuplicateField::NationalId));
        }
        Ok(None)
    }
}

fn decode_account(row: sqlx::postgres::PgRow) -> Result<Account, AccountStoreError> {
    let doc: serde_json::Value = row
        .try_get("doc")
        .map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))?;
    serde_json::from_value(doc).map_err(|e| AccountStoreError::UnexpectedError(e.to_string()))
}

/// Maps a violated unique constraint to the API name of its field. Unknown
/// constraints fall back to the email message rather than leaking SQL
/// details to clients.
fn duplicate_field(constraint: &str) -> DuplicateField {
    match constraint {
        "accounts_username_key" => DuplicateField::Username,
        "accounts_phone_key" => DuplicateField::Phone,
        "accounts_national_id_key" => DuplicateField::NationalId,
        _ => DuplicateField::Email,
    }
}
