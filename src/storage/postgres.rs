//! PostgreSQL account store
//!
//! The only code that issues SQL against the `account` table.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::{Account, NewAccount};

use super::{AccountService, StorageError};

/// SQLSTATE `numeric_value_out_of_range`
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

/// A balance update that overflows `integer` is reported the same way as
/// the in-memory store reports it.
fn classify_update_error(err: sqlx::Error, id: i32) -> StorageError {
    let out_of_range = matches!(
        &err,
        sqlx::Error::Database(db) if db.code().as_deref() == Some(NUMERIC_VALUE_OUT_OF_RANGE)
    );

    if out_of_range {
        StorageError::BalanceOverflow(id)
    } else {
        StorageError::Database(err)
    }
}

/// Account store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    /// Create a new PgAccountStore with a database pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `account` table if it does not exist yet
    pub async fn init(&self) -> Result<(), StorageError> {
        crate::db::init_schema(&self.pool).await?;
        Ok(())
    }

    /// Apply `balance = balance + delta` to one row.
    ///
    /// The delta is widened so negating the amount cannot overflow; the
    /// narrowing back to `integer` is range-checked by PostgreSQL.
    async fn add_funds(
        tx: &mut Transaction<'_, Postgres>,
        id: i32,
        delta: i64,
    ) -> Result<(), StorageError> {
        let result = sqlx::query(
            r#"
            UPDATE account
            SET balance = balance + $1::bigint
            WHERE id = $2
            "#,
        )
        .bind(delta)
        .bind(id)
        .execute(&mut **tx)
        .await
        .map_err(|e| classify_update_error(e, id))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::AccountNotFound(id));
        }

        Ok(())
    }
}

#[async_trait]
impl AccountService for PgAccountStore {
    async fn list_accounts(&self) -> Result<Vec<Account>, StorageError> {
        let accounts = sqlx::query_as::<_, Account>(
            "SELECT id, first_name, last_name, number, balance, created_at FROM account",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    async fn get_account_by_id(&self, id: i32) -> Result<Option<Account>, StorageError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, first_name, last_name, number, balance, created_at
            FROM account
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn create_account(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Account, StorageError> {
        let new_account = NewAccount::new(first_name, last_name);

        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO account (first_name, last_name, balance, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, first_name, last_name, number, balance, created_at
            "#,
        )
        .bind(&new_account.first_name)
        .bind(&new_account.last_name)
        .bind(new_account.balance)
        .bind(new_account.created_at)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created account {} (number {})", account.id, account.number);

        Ok(account)
    }

    async fn delete_account(&self, id: i32) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM account WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Deleted account {} ({} rows)", id, result.rows_affected());

        Ok(())
    }

    async fn transfer(&self, from: i32, to: i32, amount: i32) -> Result<(), StorageError> {
        let amount = i64::from(amount);

        // Dropping `tx` without commit rolls back both updates.
        let mut tx = self.pool.begin().await?;

        Self::add_funds(&mut tx, from, -amount).await?;
        Self::add_funds(&mut tx, to, amount).await?;

        tx.commit().await?;

        tracing::debug!("Transferred {} from account {} to account {}", amount, from, to);

        Ok(())
    }
}
