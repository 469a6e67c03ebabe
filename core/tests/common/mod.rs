// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use std::time::Duration;
use storefront::models::{CreateAccountRequest, CreateOrderRequest, DepositRequest, ErrorResponse};
use storefront::{ApiError, BankAccount, GatewayApi, Order, OrderStatus, Price, UserId};
use tracing::Level;

// --- Operation names, used to script failures and read call counts ---
pub const LIST_ORDERS: &str = "list_orders";
pub const CREATE_ORDER: &str = "create_order";
pub const ORDER_STATUS: &str = "order_status";
pub const CREATE_ACCOUNT: &str = "create_account";
pub const DEPOSIT: &str = "deposit";
pub const USER_ACCOUNT: &str = "user_account";
pub const ACCOUNT_BALANCE: &str = "account_balance";

/// A scripted failure for one operation.
#[derive(Debug, Clone)]
pub enum Failure {
  /// Non-2xx with an optional `{error, message}` body.
  Http {
    status: u16,
    error: Option<&'static str>,
    message: Option<&'static str>,
  },
  /// Non-2xx whose error carries no text at all.
  Blank(u16),
  Unreachable,
}

impl Failure {
  pub fn http(status: u16, error: &'static str) -> Self {
    Failure::Http {
      status,
      error: Some(error),
      message: None,
    }
  }

  pub fn http_with_message(status: u16, error: &'static str, message: &'static str) -> Self {
    Failure::Http {
      status,
      error: Some(error),
      message: Some(message),
    }
  }

  fn to_error(&self, op: &str) -> ApiError {
    match self {
      Failure::Http { status, error, message } => ApiError::http(
        *status,
        Some(ErrorResponse {
          error: error.map(str::to_string),
          message: message.map(str::to_string),
        }),
      ),
      Failure::Blank(status) => ApiError::Http {
        status: *status,
        message: String::new(),
        payload: None,
      },
      Failure::Unreachable => ApiError::Unreachable {
        url: format!("http://mock-gateway/{}", op),
        reason: "connection refused".to_string(),
      },
    }
  }
}

/// In-memory gateway with per-operation call counters, scripted failures and
/// per-user response delays (driven by Tokio's clock, so paused-time tests
/// control them with `tokio::time::advance`).
#[derive(Default)]
pub struct MockGateway {
  orders: Mutex<HashMap<UserId, Vec<Order>>>,
  accounts: Mutex<HashMap<UserId, BankAccount>>,
  statuses: Mutex<HashMap<String, OrderStatus>>,
  failures: Mutex<HashMap<&'static str, Failure>>,
  user_delays: Mutex<HashMap<UserId, Duration>>,
  delay: Mutex<Duration>,
  calls: Mutex<HashMap<&'static str, usize>>,
  pub order_requests: Mutex<Vec<CreateOrderRequest>>,
  pub deposit_requests: Mutex<Vec<DepositRequest>>,
  next_order: AtomicUsize,
}

impl MockGateway {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  pub fn with_account(&self, user_id: UserId, account_id: &str, balance: Price) {
    self.accounts.lock().insert(
      user_id,
      BankAccount {
        id: account_id.to_string(),
        balance,
        user_id: Some(user_id),
      },
    );
  }

  pub fn with_orders(&self, user_id: UserId, orders: Vec<Order>) {
    self.orders.lock().insert(user_id, orders);
  }

  pub fn with_status(&self, order_id: &str, status: OrderStatus) {
    self.statuses.lock().insert(order_id.to_string(), status);
  }

  pub fn fail(&self, op: &'static str, failure: Failure) {
    self.failures.lock().insert(op, failure);
  }

  pub fn recover(&self, op: &'static str) {
    self.failures.lock().remove(op);
  }

  /// Every response for `user_id` waits `delay` first.
  pub fn delay_user(&self, user_id: UserId, delay: Duration) {
    self.user_delays.lock().insert(user_id, delay);
  }

  /// Every response not covered by [`MockGateway::delay_user`] waits `delay` first.
  pub fn delay_all(&self, delay: Duration) {
    *self.delay.lock() = delay;
  }

  pub fn calls(&self, op: &str) -> usize {
    self.calls.lock().get(op).copied().unwrap_or(0)
  }

  pub fn total_calls(&self) -> usize {
    self.calls.lock().values().sum()
  }

  pub fn balance_of(&self, user_id: UserId) -> Option<Price> {
    self.accounts.lock().get(&user_id).map(|a| a.balance)
  }

  async fn enter(&self, op: &'static str, user_id: Option<UserId>) -> Result<(), ApiError> {
    *self.calls.lock().entry(op).or_default() += 1;

    let user_delay = user_id.and_then(|id| self.user_delays.lock().get(&id).copied());
    let delay = match user_delay {
      Some(delay) => delay,
      None => *self.delay.lock(),
    };
    if !delay.is_zero() {
      tokio::time::sleep(delay).await;
    }

    let failure = self.failures.lock().get(op).cloned();
    match failure {
      Some(failure) => {
        tracing::debug!(target: "mock_gateway", op, ?failure, "scripted failure");
        Err(failure.to_error(op))
      }
      None => Ok(()),
    }
  }
}

#[async_trait]
impl GatewayApi for MockGateway {
  async fn list_orders(&self, user_id: UserId) -> Result<Vec<Order>, ApiError> {
    self.enter(LIST_ORDERS, Some(user_id)).await?;
    Ok(self.orders.lock().get(&user_id).cloned().unwrap_or_default())
  }

  async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, ApiError> {
    self.enter(CREATE_ORDER, Some(request.user_id)).await?;
    self.order_requests.lock().push(request.clone());
    let n = self.next_order.fetch_add(1, Ordering::SeqCst) + 1;
    let order = Order {
      id: format!("order-{}", n),
      user_id: request.user_id,
      product_id: request.product_id,
      product_price: request.product_price,
      amount: request.amount,
      description: request.description.clone(),
      status: OrderStatus::Pending,
    };
    self.orders.lock().entry(request.user_id).or_default().push(order.clone());
    Ok(order)
  }

  async fn order_status(&self, order_id: &str) -> Result<OrderStatus, ApiError> {
    self.enter(ORDER_STATUS, None).await?;
    let status = self.statuses.lock().get(order_id).copied();
    status.ok_or_else(|| Failure::http(404, "Order not found").to_error(ORDER_STATUS))
  }

  async fn create_account(&self, request: &CreateAccountRequest) -> Result<BankAccount, ApiError> {
    self.enter(CREATE_ACCOUNT, Some(request.user_id)).await?;
    let account = BankAccount {
      id: format!("acct-{}", request.user_id),
      balance: 0,
      user_id: Some(request.user_id),
    };
    self.accounts.lock().insert(request.user_id, account.clone());
    Ok(account)
  }

  async fn deposit(&self, request: &DepositRequest) -> Result<Price, ApiError> {
    self.enter(DEPOSIT, Some(request.user_id)).await?;
    self.deposit_requests.lock().push(request.clone());
    let mut accounts = self.accounts.lock();
    match accounts.values_mut().find(|a| a.id == request.account_id) {
      Some(account) => {
        account.balance += request.amount;
        Ok(account.balance)
      }
      None => Err(Failure::http(404, "Account not found").to_error(DEPOSIT)),
    }
  }

  async fn user_account(&self, user_id: UserId) -> Result<BankAccount, ApiError> {
    self.enter(USER_ACCOUNT, Some(user_id)).await?;
    let account = self.accounts.lock().get(&user_id).cloned();
    account.ok_or_else(|| Failure::http(404, "Account not found").to_error(USER_ACCOUNT))
  }

  async fn account_balance(&self, account_id: &str) -> Result<Price, ApiError> {
    self.enter(ACCOUNT_BALANCE, None).await?;
    let balance = self
      .accounts
      .lock()
      .values()
      .find(|a| a.id == account_id)
      .map(|a| a.balance);
    balance.ok_or_else(|| Failure::http(404, "Account not found").to_error(ACCOUNT_BALANCE))
  }
}

pub fn order(id: &str, user_id: UserId, product_id: i64, price: Price, amount: u32, status: OrderStatus) -> Order {
  Order {
    id: id.to_string(),
    user_id,
    product_id,
    product_price: price,
    amount,
    description: format!("order {}", id),
    status,
  }
}

/// Lets spawned tasks and woken futures run without moving the clock.
pub async fn settle() {
  for _ in 0..8 {
    tokio::task::yield_now().await;
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
