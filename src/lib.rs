//! gobank Library
//!
//! Bank accounts over a relational table, with atomic transfers.
//! Re-exports modules for the binary and integration tests.

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod storage;
mod error;

pub use config::Config;
pub use domain::{Account, NewAccount};
pub use error::{AppError, AppResult, ErrorResponse};
pub use storage::{AccountService, InMemoryAccountStore, PgAccountStore, SharedAccountService, StorageError};
