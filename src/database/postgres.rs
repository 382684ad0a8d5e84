use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::models::{Account, NewAccount};
use crate::database::store::{AccountStore, DatabaseError};

const ACCOUNT_COLUMNS: &str =
    "id, first_name, last_name, number, balance, created_at, encrypted_password";

/// PostgreSQL-backed account store
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url)
            .await?;

        info!("Created database pool (max {} connections)", config.max_connections);
        Ok(Self { pool })
    }

    /// Create the account table if it does not exist yet
    pub async fn init(&self) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS account (
                id                 SERIAL PRIMARY KEY,
                first_name         VARCHAR(50) NOT NULL,
                last_name          VARCHAR(50) NOT NULL,
                number             BIGINT NOT NULL UNIQUE,
                balance            BIGINT NOT NULL DEFAULT 0,
                created_at         TIMESTAMPTZ NOT NULL,
                encrypted_password VARCHAR(255) NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("Account table ready");
        Ok(())
    }
}

/// Map unique violations (SQLSTATE 23505) onto `Conflict`
fn map_write_error(err: sqlx::Error) -> DatabaseError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            return DatabaseError::Conflict(db_err.message().to_string());
        }
    }
    DatabaseError::Sqlx(err)
}

#[async_trait]
impl AccountStore for PostgresStore {
    async fn create_account(&self, account: NewAccount) -> Result<Account, DatabaseError> {
        let query = format!(
            "INSERT INTO account (first_name, last_name, number, balance, created_at, encrypted_password)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {ACCOUNT_COLUMNS}"
        );

        sqlx::query_as::<_, Account>(&query)
            .bind(&account.first_name)
            .bind(&account.last_name)
            .bind(account.number)
            .bind(account.balance)
            .bind(account.created_at)
            .bind(&account.encrypted_password)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)
    }

    async fn delete_account(&self, id: i32) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM account WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("Account {} not found", id)));
        }
        Ok(())
    }

    async fn update_account(&self, account: &Account) -> Result<Account, DatabaseError> {
        let query = format!(
            "UPDATE account SET first_name = $2, last_name = $3
             WHERE id = $1
             RETURNING {ACCOUNT_COLUMNS}"
        );

        sqlx::query_as::<_, Account>(&query)
            .bind(account.id)
            .bind(&account.first_name)
            .bind(&account.last_name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Account {} not found", account.id)))
    }

    async fn get_accounts(&self) -> Result<Vec<Account>, DatabaseError> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM account ORDER BY id");
        let accounts = sqlx::query_as::<_, Account>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(accounts)
    }

    async fn get_account_by_id(&self, id: i32) -> Result<Account, DatabaseError> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM account WHERE id = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Account {} not found", id)))
    }

    async fn get_account_by_number(&self, number: i64) -> Result<Account, DatabaseError> {
        let query = format!("SELECT {ACCOUNT_COLUMNS} FROM account WHERE number = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(number)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Account with number {} not found", number)))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}
