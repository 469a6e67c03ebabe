// storefront/src/flows/order_history.rs

//! The session user's past orders.
//!
//! Failures here are logged only; the list is emptied and no message is shown.

use crate::gateway::GatewayApi;
use crate::models::Order;
use crate::session::Session;
use crate::state::{FlowOutcome, RequestSequencer, StateCell};
use std::sync::Arc;
use tracing::{error, event, info, instrument, Level};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderHistoryState {
  pub orders: Vec<Order>,
  pub loading: bool,
}

pub struct OrderHistoryFlow {
  gateway: Arc<dyn GatewayApi>,
  session: Session,
  state: StateCell<OrderHistoryState>,
  sequencer: RequestSequencer,
}

impl OrderHistoryFlow {
  pub fn new(gateway: Arc<dyn GatewayApi>, session: Session) -> Self {
    Self {
      gateway,
      session,
      state: StateCell::default(),
      sequencer: RequestSequencer::new(),
    }
  }

  pub fn snapshot(&self) -> OrderHistoryState {
    self.state.snapshot()
  }

  /// Replaces the cached list with the session user's orders.
  ///
  /// Without a session user nothing is requested and the current list stays;
  /// any request still in flight is made stale.
  #[instrument(name = "OrderHistoryFlow::fetch_orders", skip_all, fields(user_id = ?self.session.user_id()))]
  pub async fn fetch_orders(&self) -> FlowOutcome {
    if self.sequencer.is_disposed() {
      return FlowOutcome::Skipped;
    }

    let Some(user_id) = self.session.user_id() else {
      self.sequencer.invalidate();
      self.state.write().loading = false;
      return FlowOutcome::Skipped;
    };

    let ticket = self.sequencer.issue();
    self.state.write().loading = true;

    let response = self.gateway.list_orders(user_id).await;

    let mut state = self.state.write();
    if !self.sequencer.is_current(ticket) {
      event!(Level::DEBUG, seq = ticket.seq(), "Discarding superseded order list.");
      return FlowOutcome::Discarded;
    }
    state.loading = false;
    match response {
      Ok(orders) => {
        info!(count = orders.len(), "Order history loaded.");
        state.orders = orders;
        FlowOutcome::Succeeded
      }
      Err(err) => {
        error!(error = %err, status = err.status(), "Failed to load order history.");
        state.orders.clear();
        FlowOutcome::Failed
      }
    }
  }

  pub fn dispose(&self) {
    self.sequencer.dispose();
  }
}

impl std::fmt::Debug for OrderHistoryFlow {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let state = self.state.read();
    f.debug_struct("OrderHistoryFlow")
      .field("orders", &state.orders.len())
      .field("loading", &state.loading)
      .field("disposed", &self.sequencer.is_disposed())
      .finish()
  }
}
