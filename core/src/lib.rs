// src/lib.rs

//! Storefront: client-side state for a small shop backed by a remote gateway.
//!
//! The crate models what a storefront UI needs to keep in memory:
//!  - A fixed product catalog and a single-line cart.
//!  - A session holding the user id currently entered.
//!  - Flows for submitting orders, managing the user's bank account, listing
//!    past orders and looking up an order's status.
//!  - A JSON/HTTP gateway client with a uniform error shape.
//!
//! Flows catch their own failures and expose them as state, with transient
//! notices that clear themselves after a few seconds. When the session user
//! changes, responses still in flight for the previous user are ignored.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod flows;
pub mod gateway;
pub mod models;
pub mod session;
pub mod state;
pub mod storefront;

// --- Re-exports for the Public API ---

pub use crate::cart::{Cart, CartItem, CartLine};
pub use crate::catalog::{Catalog, Product};
pub use crate::config::{ExecutionContext, StorefrontConfig};
pub use crate::error::{error_message, ApiError, Result, StorefrontError};

pub use crate::flows::{
  AccountFlow, AccountState, OrderHistoryFlow, OrderHistoryState, OrderResult, OrderStatusFlow, OrderStatusState,
  OrderSubmissionFlow, OrderSubmissionState,
};
pub use crate::gateway::{Endpoint, GatewayApi, GatewayClient};
pub use crate::models::{BankAccount, Order, OrderStatus, Price, ProductId, UserId};
pub use crate::session::{Session, SessionWatcher};
pub use crate::state::{AsyncPhase, AsyncResult, FlowOutcome};

// The assembled client most callers start from.
pub use crate::storefront::Storefront;
