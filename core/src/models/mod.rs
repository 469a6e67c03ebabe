// storefront/src/models/mod.rs

//! Wire types exchanged with the gateway, plus the scalar aliases used across the crate.

pub mod bank_account;
pub mod dto;
pub mod order;

pub use bank_account::BankAccount;
pub use dto::{
  BalanceResponse, CreateAccountRequest, CreateOrderRequest, DepositRequest, ErrorResponse, OrderStatusResponse,
};
pub use order::{Order, OrderStatus};

/// Numeric user id entered for the session.
pub type UserId = i64;

/// Catalog product id.
pub type ProductId = i64;

/// Monetary amount in whole currency units, as the gateway reports it.
pub type Price = i64;
