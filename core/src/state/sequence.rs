// storefront/src/state/sequence.rs

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Proof that a request was issued; compared against the sequencer when the
/// response arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

impl RequestTicket {
  pub fn seq(self) -> u64 {
    self.0
  }
}

/// Last-request-wins bookkeeping for one flow instance.
///
/// Each request takes a ticket from a monotonic counter. A response may be
/// applied only while its ticket is the latest one issued and the flow has not
/// been disposed.
#[derive(Debug, Default)]
pub struct RequestSequencer {
  latest: AtomicU64,
  disposed: AtomicBool,
}

impl RequestSequencer {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn issue(&self) -> RequestTicket {
    RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
  }

  pub fn is_current(&self, ticket: RequestTicket) -> bool {
    !self.disposed.load(Ordering::SeqCst) && self.latest.load(Ordering::SeqCst) == ticket.0
  }

  /// Makes every outstanding ticket stale without issuing a new one.
  pub fn invalidate(&self) {
    self.latest.fetch_add(1, Ordering::SeqCst);
  }

  /// Permanently stale: no ticket, past or future, will be current again.
  pub fn dispose(&self) {
    self.disposed.store(true, Ordering::SeqCst);
    self.invalidate();
  }

  pub fn is_disposed(&self) -> bool {
    self.disposed.load(Ordering::SeqCst)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn only_the_latest_ticket_is_current() {
    let seq = RequestSequencer::new();
    let first = seq.issue();
    assert!(seq.is_current(first));

    let second = seq.issue();
    assert!(!seq.is_current(first));
    assert!(seq.is_current(second));
    assert!(second.seq() > first.seq());

    seq.invalidate();
    assert!(!seq.is_current(second));
  }

  #[test]
  fn dispose_is_permanent() {
    let seq = RequestSequencer::new();
    seq.dispose();
    assert!(seq.is_disposed());
    let ticket = seq.issue();
    assert!(!seq.is_current(ticket));
  }
}
