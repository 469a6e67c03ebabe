// storefront/src/models/bank_account.rs

use super::{Price, UserId};
use serde::{Deserialize, Serialize};

/// A user's bank account as reported by the payments service. At most one per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
  pub id: String,
  pub balance: Price,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub user_id: Option<UserId>,
}
