//! Storage module
//!
//! The account service facade and its backing stores.
//! The HTTP layer only ever talks to [`AccountService`]; which store sits
//! behind it is decided once, at startup.

mod error;
mod memory;
mod postgres;

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::Account;

pub use error::StorageError;
pub use memory::InMemoryAccountStore;
pub use postgres::PgAccountStore;

/// Shared handle injected into the router.
pub type SharedAccountService = Arc<dyn AccountService>;

/// Capability set the transport layer programs against.
///
/// Every call maps to exactly one store operation. Nothing is retried,
/// cached or batched.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// All accounts, in no particular order. Empty when there are none.
    async fn list_accounts(&self) -> Result<Vec<Account>, StorageError>;

    /// `Ok(None)` when no account has this id.
    async fn get_account_by_id(&self, id: i32) -> Result<Option<Account>, StorageError>;

    /// Open an account with a zero balance and return it with its
    /// store-assigned `id` and `number`.
    async fn create_account(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Account, StorageError>;

    /// Remove the account. Deleting an unknown id is not an error.
    async fn delete_account(&self, id: i32) -> Result<(), StorageError>;

    /// Move `amount` from `from` to `to` atomically.
    ///
    /// No overdraft, sign or self-transfer checks are made. Either both
    /// balances change or neither does.
    async fn transfer(&self, from: i32, to: i32, amount: i32) -> Result<(), StorageError>;
}
