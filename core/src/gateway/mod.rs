// storefront/src/gateway/mod.rs

//! Access to the remote gateway that owns orders, accounts and balances.
//!
//! Flows depend on the [`GatewayApi`] trait rather than on the HTTP client, so
//! they can be driven by an in-memory gateway in tests.

pub mod client;
pub mod endpoints;

pub use client::GatewayClient;
pub use endpoints::Endpoint;

use crate::error::ApiError;
use crate::models::{
  BankAccount, CreateAccountRequest, CreateOrderRequest, DepositRequest, Order, OrderStatus, Price, UserId,
};
use async_trait::async_trait;

/// One method per gateway endpoint.
#[async_trait]
pub trait GatewayApi: Send + Sync {
  /// `GET /orders/{userId}`
  async fn list_orders(&self, user_id: UserId) -> Result<Vec<Order>, ApiError>;

  /// `POST /orders`
  async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, ApiError>;

  /// `GET /orders/status/{orderId}`
  async fn order_status(&self, order_id: &str) -> Result<OrderStatus, ApiError>;

  /// `POST /payments`
  async fn create_account(&self, request: &CreateAccountRequest) -> Result<BankAccount, ApiError>;

  /// `PUT /payments`, returning the new balance.
  async fn deposit(&self, request: &DepositRequest) -> Result<Price, ApiError>;

  /// `GET /payments/accounts/{userId}`
  async fn user_account(&self, user_id: UserId) -> Result<BankAccount, ApiError>;

  /// `GET /payments/balance/{accountId}`
  async fn account_balance(&self, account_id: &str) -> Result<Price, ApiError>;
}
