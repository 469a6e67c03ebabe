// storefront/src/models/dto.rs

//! Request and response bodies for the gateway endpoints.

use super::{OrderStatus, Price, ProductId, UserId};
use serde::{Deserialize, Serialize};

/// Body of `POST /orders`: the cart line, the session user and the
/// description, with the unit price captured at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
  pub user_id: UserId,
  pub product_id: ProductId,
  pub amount: u32,
  pub description: String,
  pub product_price: Price,
}

/// Body of `POST /payments`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAccountRequest {
  pub user_id: UserId,
}

/// Body of `PUT /payments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositRequest {
  pub account_id: String,
  pub amount: Price,
  pub user_id: UserId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceResponse {
  pub balance: Price,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusResponse {
  pub status: OrderStatus,
}

/// Error body the gateway sends with non-2xx responses. Either field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub message: Option<String>,
}
