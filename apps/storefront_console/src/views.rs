// storefront_console/src/views.rs

//! Plain-text rendering of storefront state.

use std::fmt::Write;
use storefront::{
  AccountState, AsyncPhase, Catalog, CartItem, OrderHistoryState, OrderResult, OrderStatusState, OrderSubmissionState,
  UserId,
};

pub fn products(catalog: &Catalog) -> String {
  let mut out = String::from("Products:\n");
  for product in catalog.iter() {
    let _ = writeln!(
      out,
      "  #{:<3} {:<12} {:>6}  {}",
      product.id, product.name, product.price, product.description
    );
  }
  out
}

pub fn cart(catalog: &Catalog, item: Option<CartItem>) -> String {
  match item {
    None => "Cart is empty.".to_string(),
    Some(item) => {
      let name = catalog.get(item.product_id).map_or("unknown product", |p| p.name.as_str());
      format!(
        "Cart: {} x {} @ {} = {}",
        item.amount,
        name,
        item.product_price,
        item.total()
      )
    }
  }
}

pub fn order_notice(state: &OrderSubmissionState) -> String {
  if state.pending {
    return "Placing order...".to_string();
  }
  match &state.result {
    Some(OrderResult::Created { order_id }) => format!("Order {} placed.", order_id),
    Some(OrderResult::Failed { error }) => format!("Order failed: {}", error),
    None => String::new(),
  }
}

pub fn orders(state: &OrderHistoryState) -> String {
  if state.loading {
    return "Loading orders...".to_string();
  }
  if state.orders.is_empty() {
    return "No orders.".to_string();
  }
  let mut out = String::from("Orders:\n");
  for order in &state.orders {
    let _ = writeln!(
      out,
      "  {:<12} product #{:<3} x{:<3} {:>7}  {:<8}  {}",
      order.id,
      order.product_id,
      order.amount,
      order.total(),
      order.status.label(),
      order.description
    );
  }
  out
}

pub fn order_status(state: &OrderStatusState) -> String {
  let order_id = state.order_id.as_deref().unwrap_or("-");
  match state.status.phase() {
    AsyncPhase::Idle => "No order selected.".to_string(),
    AsyncPhase::Loading => format!("Checking order {}...", order_id),
    AsyncPhase::Failed => format!(
      "Order {}: {}",
      order_id,
      state.status.error.as_deref().unwrap_or_default()
    ),
    AsyncPhase::Ready => match state.status.data {
      Some(status) if status.is_final() => format!("Order {}: {}", order_id, status.label()),
      Some(status) => format!("Order {}: {} (awaiting payment)", order_id, status.label()),
      None => format!("Order {}: unknown", order_id),
    },
  }
}

pub fn account(user_id: Option<UserId>, state: &AccountState) -> String {
  let mut out = match user_id {
    Some(id) => format!("User {}", id),
    None => "No user".to_string(),
  };
  // An account cached for a previous user is not shown.
  match (user_id.and_then(|id| state.account_for(id)), state.balance) {
    (Some(account_id), Some(balance)) => {
      let _ = write!(out, " | account {} | balance {}", account_id, balance);
    }
    (Some(account_id), None) => {
      let _ = write!(out, " | account {}", account_id);
    }
    _ => out.push_str(" | no bank account"),
  }
  if let Some(amount) = state.deposit_amount {
    let _ = write!(out, " | deposit amount {}", amount);
  }
  if state.pending {
    out.push_str(" | working...");
  }
  if let Some(error) = &state.error {
    let _ = write!(out, "\n  ! {}", error);
  }
  out
}
