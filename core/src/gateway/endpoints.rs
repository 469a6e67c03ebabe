// storefront/src/gateway/endpoints.rs

use crate::models::UserId;
use std::fmt;

/// Gateway routes. Paths are relative to the configured base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
  Orders,
  UserOrders(UserId),
  OrderStatus(String),
  Payments,
  UserAccounts(UserId),
  AccountBalance(String),
}

impl Endpoint {
  pub fn path(&self) -> String {
    match self {
      Endpoint::Orders => "/orders".to_string(),
      Endpoint::UserOrders(user_id) => format!("/orders/{}", user_id),
      Endpoint::OrderStatus(order_id) => format!("/orders/status/{}", order_id),
      Endpoint::Payments => "/payments".to_string(),
      Endpoint::UserAccounts(user_id) => format!("/payments/accounts/{}", user_id),
      Endpoint::AccountBalance(account_id) => format!("/payments/balance/{}", account_id),
    }
  }

  pub fn url(&self, base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), self.path())
  }
}

impl fmt::Display for Endpoint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.path())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn paths_match_the_gateway_routes() {
    assert_eq!(Endpoint::Orders.path(), "/orders");
    assert_eq!(Endpoint::UserOrders(12).path(), "/orders/12");
    assert_eq!(Endpoint::OrderStatus("o-1".into()).path(), "/orders/status/o-1");
    assert_eq!(Endpoint::Payments.path(), "/payments");
    assert_eq!(Endpoint::UserAccounts(12).path(), "/payments/accounts/12");
    assert_eq!(Endpoint::AccountBalance("a-9".into()).path(), "/payments/balance/a-9");
  }

  #[test]
  fn url_joins_without_double_slash() {
    assert_eq!(Endpoint::Orders.url("http://gateway:8000/"), "http://gateway:8000/orders");
    assert_eq!(Endpoint::Payments.to_string(), "/payments");
  }
}
