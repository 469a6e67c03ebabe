// storefront/src/flows/order_status.rs

//! Status lookup for a single order id.

use super::message_or;
use crate::gateway::GatewayApi;
use crate::models::OrderStatus;
use crate::state::{AsyncResult, FlowOutcome, RequestSequencer, StateCell};
use std::sync::Arc;
use tracing::{event, instrument, warn, Level};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderStatusState {
  /// The order the status belongs to.
  pub order_id: Option<String>,
  pub status: AsyncResult<OrderStatus>,
}

pub struct OrderStatusFlow {
  gateway: Arc<dyn GatewayApi>,
  state: StateCell<OrderStatusState>,
  sequencer: RequestSequencer,
}

impl OrderStatusFlow {
  pub fn new(gateway: Arc<dyn GatewayApi>) -> Self {
    Self {
      gateway,
      state: StateCell::default(),
      sequencer: RequestSequencer::new(),
    }
  }

  pub fn snapshot(&self) -> OrderStatusState {
    self.state.snapshot()
  }

  /// Looks up the status of `order_id`. `None` (or a blank id) resets the
  /// state without a request.
  #[instrument(name = "OrderStatusFlow::fetch_status", skip_all, fields(order_id = ?order_id))]
  pub async fn fetch_status(&self, order_id: Option<&str>) -> FlowOutcome {
    if self.sequencer.is_disposed() {
      return FlowOutcome::Skipped;
    }

    let Some(order_id) = order_id.map(str::trim).filter(|id| !id.is_empty()) else {
      self.sequencer.invalidate();
      *self.state.write() = OrderStatusState::default();
      return FlowOutcome::Skipped;
    };

    let ticket = self.sequencer.issue();
    {
      let mut state = self.state.write();
      if state.order_id.as_deref() != Some(order_id) {
        state.status.reset();
        state.order_id = Some(order_id.to_string());
      }
      state.status.start();
    }

    let response = self.gateway.order_status(order_id).await;

    let mut state = self.state.write();
    if !self.sequencer.is_current(ticket) {
      event!(Level::DEBUG, seq = ticket.seq(), "Discarding superseded order status.");
      return FlowOutcome::Discarded;
    }
    match response {
      Ok(status) => {
        event!(Level::INFO, %status, "Order status loaded.");
        state.status.succeed(status);
        FlowOutcome::Succeeded
      }
      Err(err) => {
        warn!(error = %err, status = err.status(), "Order status lookup failed.");
        state.status.fail(message_or(err.user_message(), "Could not load the order status"));
        FlowOutcome::Failed
      }
    }
  }

  /// Repeats the lookup for the order currently shown.
  pub async fn refetch(&self) -> FlowOutcome {
    let order_id = self.state.read().order_id.clone();
    match order_id {
      Some(order_id) => self.fetch_status(Some(&order_id)).await,
      None => FlowOutcome::Skipped,
    }
  }

  pub fn dispose(&self) {
    self.sequencer.dispose();
  }
}

impl std::fmt::Debug for OrderStatusFlow {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("OrderStatusFlow")
      .field("state", &*self.state.read())
      .field("disposed", &self.sequencer.is_disposed())
      .finish()
  }
}
