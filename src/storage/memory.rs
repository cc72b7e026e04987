//! In-memory account store
//!
//! Stand-in for [`PgAccountStore`](super::PgAccountStore) in tests and local
//! runs. Mirrors its observable behavior, including id and number sequences
//! that are never reused.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Account, NewAccount};

use super::{AccountService, StorageError};

#[derive(Debug)]
struct Inner {
    accounts: BTreeMap<i32, Account>,
    next_id: i32,
    next_number: i32,
}

/// Account store held entirely in process memory
#[derive(Debug)]
pub struct InMemoryAccountStore {
    inner: Mutex<Inner>,
}

impl InMemoryAccountStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                accounts: BTreeMap::new(),
                next_id: 1,
                next_number: 1,
            }),
        }
    }
}

impl Default for InMemoryAccountStore {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_delta(account: &Account, delta: i64) -> Result<i32, StorageError> {
    i32::try_from(i64::from(account.balance) + delta)
        .map_err(|_| StorageError::BalanceOverflow(account.id))
}

#[async_trait]
impl AccountService for InMemoryAccountStore {
    async fn list_accounts(&self) -> Result<Vec<Account>, StorageError> {
        let inner = self.inner.lock().await;
        Ok(inner.accounts.values().cloned().collect())
    }

    async fn get_account_by_id(&self, id: i32) -> Result<Option<Account>, StorageError> {
        let inner = self.inner.lock().await;
        Ok(inner.accounts.get(&id).cloned())
    }

    async fn create_account(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Account, StorageError> {
        let mut inner = self.inner.lock().await;

        let id = inner.next_id;
        let number = inner.next_number;
        inner.next_id += 1;
        inner.next_number += 1;

        let account = NewAccount::new(first_name, last_name).into_account(id, number);
        inner.accounts.insert(id, account.clone());

        Ok(account)
    }

    async fn delete_account(&self, id: i32) -> Result<(), StorageError> {
        let mut inner = self.inner.lock().await;
        inner.accounts.remove(&id);
        Ok(())
    }

    async fn transfer(&self, from: i32, to: i32, amount: i32) -> Result<(), StorageError> {
        let amount = i64::from(amount);
        let mut inner = self.inner.lock().await;

        // Compute both balances before touching either.
        let source = inner
            .accounts
            .get(&from)
            .ok_or(StorageError::AccountNotFound(from))?;
        let debited = apply_delta(source, -amount)?;

        let target = inner
            .accounts
            .get(&to)
            .ok_or(StorageError::AccountNotFound(to))?;
        let credited = if from == to {
            i32::try_from(i64::from(debited) + amount)
                .map_err(|_| StorageError::BalanceOverflow(to))?
        } else {
            apply_delta(target, amount)?
        };

        if let Some(account) = inner.accounts.get_mut(&from) {
            account.balance = debited;
        }
        if let Some(account) = inner.accounts.get_mut(&to) {
            account.balance = credited;
        }

        Ok(())
    }
}
