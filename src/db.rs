//! Database module
//!
//! Database connection and schema utilities.

use sqlx::PgPool;

/// Verify database connectivity
pub async fn verify_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Create the `account` table if it does not exist
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS account (
            id serial primary key,
            first_name varchar(50),
            last_name varchar(50),
            number serial,
            balance serial,
            created_at timestamp
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Schema ready: account");
    Ok(())
}
