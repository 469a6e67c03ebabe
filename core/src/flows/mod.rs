// storefront/src/flows/mod.rs

//! Flows: a unit of UI-facing state plus the async operations that mutate it.
//!
//! Every flow follows the same shape:
//!  - it is constructed with the gateway, the session and the notice TTL it needs;
//!  - each operation takes a request ticket before awaiting the gateway and
//!    applies the response only if that ticket is still the latest one;
//!  - failures are caught and written into the flow's own state, never returned;
//!  - transient notices are cleared by the flow's [`AutoDismiss`](crate::state::AutoDismiss);
//!  - `dispose()` cancels pending timers and turns later completions into no-ops.
//!
//! Flows never call each other. The only thing they share is the [`Session`](crate::session::Session).

pub mod account;
pub mod order_history;
pub mod order_status;
pub mod order_submission;

pub use account::{AccountFlow, AccountState};
pub use order_history::{OrderHistoryFlow, OrderHistoryState};
pub use order_status::{OrderStatusFlow, OrderStatusState};
pub use order_submission::{OrderResult, OrderSubmissionFlow, OrderSubmissionState};

/// `message` unless it is blank, in which case `fallback`.
pub(crate) fn message_or(message: String, fallback: &str) -> String {
  if message.trim().is_empty() {
    fallback.to_string()
  } else {
    message
  }
}
