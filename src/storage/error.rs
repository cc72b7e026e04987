//! Storage Errors
//!
//! Faults raised by the account stores.

/// Errors that can occur in an account store
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Connectivity, constraint or commit failure in the database
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A transfer referenced an account that does not exist
    #[error("Account not found: {0}")]
    AccountNotFound(i32),

    /// Applying a transfer would push a balance out of range
    #[error("Balance out of range for account {0}")]
    BalanceOverflow(i32),
}
