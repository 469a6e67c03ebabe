// storefront/src/state/mod.rs

//! Plumbing shared by every flow: the state container, the generic async
//! result shape, request sequencing and auto-dismissed notices.

pub mod async_result;
pub mod cell;
pub mod dismiss;
pub mod outcome;
pub mod sequence;

pub use async_result::{AsyncPhase, AsyncResult};
pub use cell::{StateCell, WeakStateCell};
pub use dismiss::AutoDismiss;
pub use outcome::FlowOutcome;
pub use sequence::{RequestSequencer, RequestTicket};
