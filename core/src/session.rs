// storefront/src/session.rs

//! Session identity: the user id currently entered, shared by every flow.
//!
//! A [`Session`] is a cheap, cloneable handle; flows receive one in their
//! constructor and read the id at call time. Interested parties subscribe via
//! [`Session::watch`] to be told when the id changes. Nothing is persisted.

use crate::models::UserId;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{event, Level};

#[derive(Debug, Clone)]
pub struct Session {
  tx: Arc<watch::Sender<Option<UserId>>>,
}

impl Session {
  pub fn new() -> Self {
    let (tx, _rx) = watch::channel(None);
    Self { tx: Arc::new(tx) }
  }

  pub fn with_user(user_id: UserId) -> Self {
    let session = Self::new();
    session.set_user_id(Some(user_id));
    session
  }

  pub fn user_id(&self) -> Option<UserId> {
    *self.tx.borrow()
  }

  /// Replaces the current id. Watchers are notified only when the value
  /// actually changes; returns whether it did.
  pub fn set_user_id(&self, user_id: Option<UserId>) -> bool {
    let changed = self.tx.send_if_modified(|current| {
      if *current == user_id {
        false
      } else {
        *current = user_id;
        true
      }
    });
    if changed {
      event!(Level::INFO, user_id = ?user_id, "Session user changed.");
    }
    changed
  }

  /// Subscribes to future changes. The value current at subscription time
  /// counts as already seen.
  pub fn watch(&self) -> SessionWatcher {
    SessionWatcher { rx: self.tx.subscribe() }
  }
}

impl Default for Session {
  fn default() -> Self {
    Self::new()
  }
}

#[derive(Debug)]
pub struct SessionWatcher {
  rx: watch::Receiver<Option<UserId>>,
}

impl SessionWatcher {
  /// Waits for the next change and returns the new id.
  ///
  /// Returns `None` once every [`Session`] handle has been dropped. Several
  /// changes made before this is polled collapse into the latest one.
  pub async fn changed(&mut self) -> Option<Option<UserId>> {
    self.rx.changed().await.ok()?;
    Some(*self.rx.borrow_and_update())
  }

  pub fn current(&self) -> Option<UserId> {
    *self.rx.borrow()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn watchers_see_changes_but_not_repeats() {
    let session = Session::new();
    let mut watcher = session.watch();

    assert!(session.set_user_id(Some(1)));
    assert_eq!(watcher.changed().await, Some(Some(1)));

    // Same value again: no notification.
    assert!(!session.set_user_id(Some(1)));
    assert!(session.set_user_id(None));
    assert_eq!(watcher.changed().await, Some(None));
    assert_eq!(session.user_id(), None);
  }

  #[tokio::test]
  async fn watcher_ends_when_session_is_gone() {
    let session = Session::with_user(3);
    let mut watcher = session.watch();
    assert_eq!(watcher.current(), Some(3));
    drop(session);
    assert_eq!(watcher.changed().await, None);
  }

  #[test]
  fn clones_share_the_id() {
    let session = Session::new();
    let other = session.clone();
    other.set_user_id(Some(42));
    assert_eq!(session.user_id(), Some(42));
  }
}
