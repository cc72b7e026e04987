//! Account entity
//!
//! The only persisted entity: a named balance record.

use chrono::{NaiveDateTime, Utc};
use serde::Serialize;

/// A bank account as stored in the `account` table.
///
/// `id` and `number` are assigned by the store on creation. Only `balance`
/// changes afterwards, and only through a transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub number: i32,
    /// Smallest currency unit. May be negative.
    pub balance: i32,
    pub created_at: NaiveDateTime,
}

/// Values supplied when opening an account, before the store assigns
/// `id` and `number`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub first_name: String,
    pub last_name: String,
    pub balance: i32,
    pub created_at: NaiveDateTime,
}

impl NewAccount {
    /// Zero balance, stamped with the current UTC time.
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            balance: 0,
            created_at: Utc::now().naive_utc(),
        }
    }

    /// Attach the store-assigned identifiers.
    pub fn into_account(self, id: i32, number: i32) -> Account {
        Account {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            number,
            balance: self.balance,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_starts_at_zero() {
        let account = NewAccount::new("Ada", "Lovelace");

        assert_eq!(account.first_name, "Ada");
        assert_eq!(account.last_name, "Lovelace");
        assert_eq!(account.balance, 0);
    }

    #[test]
    fn test_into_account_keeps_fields() {
        let new_account = NewAccount::new("Ada", "Lovelace");
        let created_at = new_account.created_at;

        let account = new_account.into_account(7, 1007);

        assert_eq!(account.id, 7);
        assert_eq!(account.number, 1007);
        assert_eq!(account.balance, 0);
        assert_eq!(account.created_at, created_at);
    }

    #[test]
    fn test_account_json_uses_camel_case() {
        let account = NewAccount::new("Ada", "Lovelace").into_account(1, 2);
        let json = serde_json::to_value(&account).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["lastName"], "Lovelace");
        assert_eq!(json["number"], 2);
        assert_eq!(json["balance"], 0);
        assert!(json.get("createdAt").is_some());
    }
}
