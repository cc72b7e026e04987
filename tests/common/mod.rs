//! Common test utilities

use gobank::PgAccountStore;
use sqlx::postgres::PgPoolOptions;

/// Connect to the test database and make sure the schema exists.
///
/// Tests share the table, so each one creates its own accounts and only
/// asserts on those.
pub async fn setup_test_store() -> PgAccountStore {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for tests");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    let store = PgAccountStore::new(pool);
    store.init().await.expect("Failed to create schema");
    store
}
