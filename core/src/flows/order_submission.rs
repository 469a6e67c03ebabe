// storefront/src/flows/order_submission.rs

//! Turns the cart line into a remote order and shows the outcome for a while.

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::error::{Result, StorefrontError};
use crate::gateway::GatewayApi;
use crate::models::CreateOrderRequest;
use crate::session::Session;
use crate::state::{AutoDismiss, FlowOutcome, RequestSequencer, StateCell};
use std::sync::Arc;
use std::time::Duration;
use tracing::{event, info, instrument, warn, Level};

/// Outcome notice of the latest submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderResult {
  Created { order_id: String },
  Failed { error: String },
}

impl OrderResult {
  pub fn is_success(&self) -> bool {
    matches!(self, OrderResult::Created { .. })
  }

  pub fn order_id(&self) -> Option<&str> {
    match self {
      OrderResult::Created { order_id } => Some(order_id),
      OrderResult::Failed { .. } => None,
    }
  }

  pub fn error(&self) -> Option<&str> {
    match self {
      OrderResult::Failed { error } => Some(error),
      OrderResult::Created { .. } => None,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderSubmissionState {
  pub pending: bool,
  /// Cleared automatically once the notice TTL elapses.
  pub result: Option<OrderResult>,
  /// `None` until the user types something; an empty string is a valid description.
  pub description: Option<String>,
}

pub struct OrderSubmissionFlow {
  gateway: Arc<dyn GatewayApi>,
  session: Session,
  state: StateCell<OrderSubmissionState>,
  sequencer: RequestSequencer,
  dismiss: AutoDismiss,
}

impl OrderSubmissionFlow {
  pub fn new(gateway: Arc<dyn GatewayApi>, session: Session, notice_ttl: Duration) -> Self {
    Self {
      gateway,
      session,
      state: StateCell::default(),
      sequencer: RequestSequencer::new(),
      dismiss: AutoDismiss::new(notice_ttl),
    }
  }

  pub fn snapshot(&self) -> OrderSubmissionState {
    self.state.snapshot()
  }

  pub fn set_description(&self, description: Option<String>) {
    self.state.write().description = description;
  }

  pub fn clear_result(&self) {
    self.dismiss.cancel();
    self.state.write().result = None;
  }

  /// Whether a submission could go out right now: a cart line, a session
  /// user, a description and no submission already in flight.
  pub fn can_submit(&self, cart: &Cart) -> bool {
    let state = self.state.read();
    !cart.is_empty() && self.session.user_id().is_some() && state.description.is_some() && !state.pending
  }

  /// Submits `cart` for the session user with the current description.
  ///
  /// Unmet preconditions are returned as [`StorefrontError::Validation`] and
  /// no request is issued; the flow state is left untouched.
  pub async fn submit_cart<F>(&self, cart: &Cart, catalog: &Catalog, on_success: F) -> Result<FlowOutcome>
  where
    F: FnOnce() + Send,
  {
    let user_id = self
      .session
      .user_id()
      .ok_or_else(|| StorefrontError::validation("Enter a user ID before placing an order"))?;

    let description = {
      let state = self.state.read();
      if state.pending {
        return Err(StorefrontError::validation("An order is already being submitted"));
      }
      state
        .description
        .clone()
        .ok_or_else(|| StorefrontError::validation("Add a description to the order"))?
    };

    let request = cart
      .to_order_request(catalog, user_id, &description)
      .ok_or_else(|| StorefrontError::validation("Your cart is empty"))?;

    Ok(self.submit(request, on_success).await)
  }

  /// Sends `request` to the gateway and records the result notice.
  ///
  /// `on_success` runs once, after the notice is written, only when the order
  /// was created and this submission is still the latest one.
  #[instrument(
    name = "OrderSubmissionFlow::submit",
    skip_all,
    fields(user_id = request.user_id, product_id = request.product_id, amount = request.amount)
  )]
  pub async fn submit<F>(&self, request: CreateOrderRequest, on_success: F) -> FlowOutcome
  where
    F: FnOnce() + Send,
  {
    if self.sequencer.is_disposed() {
      return FlowOutcome::Skipped;
    }

    let ticket = self.sequencer.issue();
    self.state.write().pending = true;

    let response = self.gateway.create_order(&request).await;

    let outcome = {
      let mut state = self.state.write();
      if !self.sequencer.is_current(ticket) {
        event!(Level::DEBUG, seq = ticket.seq(), "Discarding superseded order response.");
        return FlowOutcome::Discarded;
      }
      state.pending = false;
      match response {
        Ok(order) => {
          info!(order_id = %order.id, "Order created.");
          state.result = Some(OrderResult::Created { order_id: order.id });
          FlowOutcome::Succeeded
        }
        Err(err) => {
          warn!(error = %err, status = err.status(), "Order submission failed.");
          state.result = Some(OrderResult::Failed {
            error: err.user_message(),
          });
          FlowOutcome::Failed
        }
      }
    };

    let weak = self.state.downgrade();
    self.dismiss.arm(move || {
      if let Some(state) = weak.upgrade() {
        state.write().result = None;
      }
    });

    if outcome == FlowOutcome::Succeeded {
      on_success();
    }
    outcome
  }

  /// Stops the flow: pending notices are not cleared later and in-flight
  /// responses are dropped.
  pub fn dispose(&self) {
    self.sequencer.dispose();
    self.dismiss.cancel();
  }
}

impl std::fmt::Debug for OrderSubmissionFlow {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("OrderSubmissionFlow")
      .field("state", &*self.state.read())
      .field("disposed", &self.sequencer.is_disposed())
      .finish()
  }
}
