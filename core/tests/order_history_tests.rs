// tests/order_history_tests.rs
mod common;

use common::*;
use std::sync::Arc;
use std::time::Duration;
use storefront::{FlowOutcome, OrderHistoryFlow, OrderStatus, OrderStatusFlow, Session};

#[tokio::test]
async fn test_fetch_orders_replaces_list() {
  setup_tracing();
  let gateway = MockGateway::new();
  gateway.with_orders(
    3,
    vec![
      order("a", 3, 1, 450, 2, OrderStatus::Approved),
      order("b", 3, 4, 250, 1, OrderStatus::Pending),
    ],
  );
  let flow = OrderHistoryFlow::new(gateway.clone(), Session::with_user(3));

  assert_eq!(flow.fetch_orders().await, FlowOutcome::Succeeded);
  let state = flow.snapshot();
  assert!(!state.loading);
  assert_eq!(state.orders.len(), 2);
  assert_eq!(state.orders[0].total(), 900);
  assert_eq!(state.orders[1].status.label(), "Pending");
}

#[tokio::test]
async fn test_failure_empties_list_without_user_error() {
  setup_tracing();
  let gateway = MockGateway::new();
  gateway.with_orders(3, vec![order("a", 3, 1, 450, 1, OrderStatus::Approved)]);
  let flow = OrderHistoryFlow::new(gateway.clone(), Session::with_user(3));
  flow.fetch_orders().await;
  assert_eq!(flow.snapshot().orders.len(), 1);

  gateway.fail(LIST_ORDERS, Failure::http(500, "boom"));
  assert_eq!(flow.fetch_orders().await, FlowOutcome::Failed);
  let state = flow.snapshot();
  assert!(state.orders.is_empty(), "Stale orders must not survive a failed fetch");
  assert!(!state.loading);
}

#[tokio::test]
async fn test_no_user_keeps_existing_list() {
  setup_tracing();
  let gateway = MockGateway::new();
  gateway.with_orders(3, vec![order("a", 3, 1, 450, 1, OrderStatus::Rejected)]);
  let session = Session::with_user(3);
  let flow = OrderHistoryFlow::new(gateway.clone(), session.clone());
  flow.fetch_orders().await;

  session.set_user_id(None);
  assert_eq!(flow.fetch_orders().await, FlowOutcome::Skipped);
  assert_eq!(flow.snapshot().orders.len(), 1);
  assert_eq!(gateway.calls(LIST_ORDERS), 1);
}

#[tokio::test(start_paused = true)]
async fn test_loading_is_visible_while_in_flight() {
  setup_tracing();
  let gateway = MockGateway::new();
  gateway.delay_all(Duration::from_millis(300));
  let flow = Arc::new(OrderHistoryFlow::new(gateway.clone(), Session::with_user(1)));

  let task = {
    let flow = flow.clone();
    tokio::spawn(async move { flow.fetch_orders().await })
  };
  settle().await;
  assert!(flow.snapshot().loading);

  tokio::time::advance(Duration::from_millis(300)).await;
  settle().await;
  assert_eq!(task.await.unwrap(), FlowOutcome::Succeeded);
  assert!(!flow.snapshot().loading);
}

#[tokio::test]
async fn test_order_status_lookup() {
  setup_tracing();
  let gateway = MockGateway::new();
  gateway.with_status("o-1", OrderStatus::Approved);
  let flow = OrderStatusFlow::new(gateway.clone());

  assert_eq!(flow.fetch_status(Some("o-1")).await, FlowOutcome::Succeeded);
  let state = flow.snapshot();
  assert_eq!(state.order_id.as_deref(), Some("o-1"));
  assert_eq!(state.status.data, Some(OrderStatus::Approved));

  // Unknown ids surface the gateway's message.
  assert_eq!(flow.fetch_status(Some("nope")).await, FlowOutcome::Failed);
  let state = flow.snapshot();
  assert_eq!(state.status.data, None);
  assert_eq!(state.status.error.as_deref(), Some("Order not found"));

  // A later decision is picked up by refetching.
  gateway.with_status("nope", OrderStatus::Pending);
  assert_eq!(flow.refetch().await, FlowOutcome::Succeeded);
  assert_eq!(flow.snapshot().status.data, Some(OrderStatus::Pending));

  // No id resets without a request.
  let before = gateway.calls(ORDER_STATUS);
  assert_eq!(flow.fetch_status(None).await, FlowOutcome::Skipped);
  assert_eq!(flow.snapshot().order_id, None);
  assert_eq!(gateway.calls(ORDER_STATUS), before);
}
