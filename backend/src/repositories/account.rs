//! Account repository for credential-store operations
//!
//! Emails compare case-insensitively (unique index on `LOWER(email)`).
//! The reset-token pair (`reset_token`, `reset_token_expiration`) is either
//! both null or both set, enforced by a table constraint.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Account record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AccountRecord {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub reset_token: Option<String>,
    pub reset_token_expiration: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an account
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

const ACCOUNT_COLUMNS: &str = "id, email, password_hash, first_name, last_name, phone, \
     reset_token, reset_token_expiration, created_at, updated_at";

/// Account repository for database operations
pub struct AccountRepository;

impl AccountRepository {
    /// Create a new account
    pub async fn create(pool: &PgPool, account: NewAccount) -> Result<AccountRecord> {
        let record = sqlx::query_as::<_, AccountRecord>(&format!(
            r#"
            INSERT INTO accounts (email, password_hash, first_name, last_name, phone)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {ACCOUNT_COLUMNS}
            "#,
        ))
        .bind(account.email)
        .bind(account.password_hash)
        .bind(account.first_name)
        .bind(account.last_name)
        .bind(account.phone)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Find account by email (case-insensitive)
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<AccountRecord>> {
        let record = sqlx::query_as::<_, AccountRecord>(&format!(
            r#"
            SELECT {ACCOUNT_COLUMNS}
            FROM accounts
            WHERE LOWER(email) = LOWER($1)
            "#,
        ))
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Check if email exists (case-insensitive)
    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM accounts WHERE LOWER(email) = LOWER($1))
            "#,
        )
        .bind(email)
        .fetch_one(pool)
        .await?;

        Ok(result)
    }

    /// Store a reset token and its expiry on an account
    ///
    /// Overwrites any prior token: a newer reset request silently
    /// supersedes an older one.
    pub async fn set_reset_token(
        pool: &PgPool,
        id: Uuid,
        token: &str,
        expiry: DateTime<Utc>,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE accounts
            SET reset_token = $2, reset_token_expiration = $3, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(token)
        .bind(expiry)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Find account by reset token
    pub async fn find_by_reset_token(pool: &PgPool, token: &str) -> Result<Option<AccountRecord>> {
        let record = sqlx::query_as::<_, AccountRecord>(&format!(
            r#"
            SELECT {ACCOUNT_COLUMNS}
            FROM accounts
            WHERE reset_token = $1
            "#,
        ))
        .bind(token)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Atomically consume a reset token: set the new password hash and
    /// clear the token pair in one conditional update.
    ///
    /// The `WHERE reset_token = $1 AND reset_token_expiration > NOW()`
    /// predicate serializes concurrent consumers on the token value; at
    /// most one caller observes an affected row. Returns whether this
    /// caller won.
    pub async fn consume_reset_token(pool: &PgPool, token: &str, new_hash: &str) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET password_hash = $2,
                reset_token = NULL,
                reset_token_expiration = NULL,
                updated_at = NOW()
            WHERE reset_token = $1
              AND reset_token_expiration > NOW()
            "#,
        )
        .bind(token)
        .bind(new_hash)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
