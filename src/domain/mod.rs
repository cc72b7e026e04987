//! Domain module
//!
//! Core domain types.

pub mod account;

pub use account::{Account, NewAccount};
