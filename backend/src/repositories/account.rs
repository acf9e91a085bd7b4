//! Account repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Account record from database
///
/// The role column is the stored discriminator ('patient' or
/// 'doctor'); the service layer parses it into `Role`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AccountRecord {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Account repository for database operations
pub struct AccountRepository;

impl AccountRepository {
    /// Find account by email
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<AccountRecord>> {
        let account = sqlx::query_as::<_, AccountRecord>(
            r#"
            SELECT id, email, password_hash, role, created_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(account)
    }

    /// Check if email exists
    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)
            "#,
        )
        .bind(email)
        .fetch_one(pool)
        .await?;

        Ok(result)
    }
}
