// storefront/src/storefront.rs

//! The assembled client: one gateway, one session, the cart and every flow.
//!
//! Changing the session user triggers one refetch of the account and one of
//! the order history. Responses that belong to the previous user are dropped
//! by the flows' own request sequencing.

use crate::cart::{Cart, CartItem};
use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::error::{Result, StorefrontError};
use crate::flows::{AccountFlow, OrderHistoryFlow, OrderStatusFlow, OrderSubmissionFlow};
use crate::gateway::{GatewayApi, GatewayClient};
use crate::models::{Price, ProductId, UserId};
use crate::session::Session;
use crate::state::{FlowOutcome, StateCell};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

pub struct Storefront {
  catalog: Arc<Catalog>,
  session: Session,
  cart: StateCell<Cart>,
  orders: Arc<OrderSubmissionFlow>,
  account: Arc<AccountFlow>,
  history: Arc<OrderHistoryFlow>,
  status: Arc<OrderStatusFlow>,
  listeners: Mutex<Vec<JoinHandle<()>>>,
  shut_down: AtomicBool,
}

impl Storefront {
  /// Wires the flows to `gateway` and `session` and starts listening for
  /// session changes. Must be called from within a Tokio runtime.
  ///
  /// If the session already has a user, the account and order history are
  /// fetched right away.
  pub fn new(gateway: Arc<dyn GatewayApi>, catalog: Catalog, session: Session, notice_ttl: Duration) -> Result<Self> {
    let handle = Handle::try_current()
      .map_err(|e| StorefrontError::Config(format!("Storefront needs a Tokio runtime: {}", e)))?;

    let orders = Arc::new(OrderSubmissionFlow::new(gateway.clone(), session.clone(), notice_ttl));
    let account = Arc::new(AccountFlow::new(gateway.clone(), session.clone(), notice_ttl));
    let history = Arc::new(OrderHistoryFlow::new(gateway.clone(), session.clone()));
    let status = Arc::new(OrderStatusFlow::new(gateway));

    let listeners = vec![
      spawn_session_listener(&handle, &session, &account, |flow: Arc<AccountFlow>| async move {
        flow.fetch_account().await
      }),
      spawn_session_listener(&handle, &session, &history, |flow: Arc<OrderHistoryFlow>| async move {
        flow.fetch_orders().await
      }),
    ];

    if let Some(user_id) = session.user_id() {
      debug!(user_id, "Session already has a user; loading account and orders.");
      let flow = account.clone();
      handle.spawn(async move { flow.fetch_account().await });
      let flow = history.clone();
      handle.spawn(async move { flow.fetch_orders().await });
    }

    Ok(Self {
      catalog: Arc::new(catalog),
      session,
      cart: StateCell::default(),
      orders,
      account,
      history,
      status,
      listeners: Mutex::new(listeners),
      shut_down: AtomicBool::new(false),
    })
  }

  /// Builds the HTTP gateway client from `config` and uses the built-in catalog.
  pub fn from_config(config: &StorefrontConfig, session: Session) -> Result<Self> {
    let gateway = Arc::new(GatewayClient::new(config)?);
    info!(base_url = %gateway.base_url(), context = ?config.context, "Storefront connecting to gateway.");
    Self::new(gateway, Catalog::builtin(), session, config.notice_ttl)
  }

  pub fn catalog(&self) -> &Catalog {
    &self.catalog
  }

  pub fn session(&self) -> &Session {
    &self.session
  }

  pub fn user_id(&self) -> Option<UserId> {
    self.session.user_id()
  }

  /// Returns whether the user actually changed.
  pub fn set_user_id(&self, user_id: Option<UserId>) -> bool {
    self.session.set_user_id(user_id)
  }

  pub fn orders(&self) -> &Arc<OrderSubmissionFlow> {
    &self.orders
  }

  pub fn account(&self) -> &Arc<AccountFlow> {
    &self.account
  }

  pub fn history(&self) -> &Arc<OrderHistoryFlow> {
    &self.history
  }

  pub fn status(&self) -> &Arc<OrderStatusFlow> {
    &self.status
  }

  // --- Cart ---

  pub fn cart(&self) -> Cart {
    *self.cart.read()
  }

  pub fn cart_item(&self) -> Option<CartItem> {
    self.cart.read().item(&self.catalog)
  }

  pub fn cart_total(&self) -> Price {
    self.cart.read().total(&self.catalog)
  }

  /// Adds one of `product_id`, replacing a line for any other product.
  /// Ids missing from the catalog are rejected.
  pub fn add_to_cart(&self, product_id: ProductId) -> Result<()> {
    if self.catalog.get(product_id).is_none() {
      return Err(StorefrontError::validation(format!("Unknown product {}", product_id)));
    }
    self.cart.write().add(product_id);
    Ok(())
  }

  pub fn remove_one_from_cart(&self, product_id: ProductId) {
    self.cart.write().remove_one(product_id);
  }

  pub fn clear_cart(&self) {
    self.cart.write().clear();
  }

  // --- Orders ---

  pub fn set_description(&self, description: impl Into<String>) {
    self.orders.set_description(Some(description.into()));
  }

  /// Submits the cart line. On success the description is cleared, and so is
  /// the cart unless it changed while the order was in flight.
  #[instrument(name = "Storefront::place_order", skip_all)]
  pub async fn place_order(&self) -> Result<FlowOutcome> {
    let cart = self.cart();
    let cart_cell = self.cart.clone();
    let orders = &self.orders;
    self
      .orders
      .submit_cart(&cart, &self.catalog, move || {
        let mut current = cart_cell.write();
        if *current == cart {
          current.clear();
        } else {
          debug!("Cart changed during submission; keeping the new line.");
        }
        drop(current);
        orders.set_description(None);
      })
      .await
  }

  // --- Account ---

  pub fn set_deposit_amount(&self, amount: Option<Price>) {
    self.account.set_deposit_amount(amount);
  }

  pub async fn create_account(&self) -> FlowOutcome {
    self.account.create_account(|| {}).await
  }

  /// Deposits the entered amount. On success the amount field is emptied.
  pub async fn deposit(&self) -> FlowOutcome {
    let account = &self.account;
    self.account.deposit(move || account.set_deposit_amount(None)).await
  }

  /// Refetches the account and the order history together.
  pub async fn refresh(&self) -> (FlowOutcome, FlowOutcome) {
    tokio::join!(self.account.fetch_account(), self.history.fetch_orders())
  }

  pub async fn order_status(&self, order_id: &str) -> FlowOutcome {
    self.status.fetch_status(Some(order_id)).await
  }

  /// Stops listening for session changes and disposes every flow. Pending
  /// notices are not cleared afterwards and in-flight responses are dropped.
  pub fn shutdown(&self) {
    if self.shut_down.swap(true, Ordering::SeqCst) {
      return;
    }
    for listener in self.listeners.lock().drain(..) {
      listener.abort();
    }
    self.orders.dispose();
    self.account.dispose();
    self.history.dispose();
    self.status.dispose();
    debug!("Storefront shut down.");
  }
}

impl Drop for Storefront {
  fn drop(&mut self) {
    self.shutdown();
  }
}

impl std::fmt::Debug for Storefront {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Storefront")
      .field("user_id", &self.session.user_id())
      .field("cart", &*self.cart.read())
      .field("shut_down", &self.shut_down.load(Ordering::SeqCst))
      .finish()
  }
}

/// Spawns a task that calls `fetch` once per session change.
///
/// The task holds only a weak reference to `flow` and ends when the flow is
/// gone or the session is dropped. Each fetch runs as its own task so that a
/// slow response never delays reacting to the next change.
fn spawn_session_listener<T, F, Fut>(handle: &Handle, session: &Session, flow: &Arc<T>, fetch: F) -> JoinHandle<()>
where
  T: Send + Sync + 'static,
  F: Fn(Arc<T>) -> Fut + Send + 'static,
  Fut: Future<Output = FlowOutcome> + Send + 'static,
{
  let mut watcher = session.watch();
  let weak = Arc::downgrade(flow);
  let spawner = handle.clone();
  handle.spawn(async move {
    while let Some(user_id) = watcher.changed().await {
      let Some(flow) = weak.upgrade() else {
        break;
      };
      debug!(user_id = ?user_id, flow = std::any::type_name::<T>(), "Session changed; refetching.");
      spawner.spawn(fetch(flow));
    }
  })
}
