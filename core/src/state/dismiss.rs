// storefront/src/state/dismiss.rs

//! Cancellable, resettable one-shot timer for transient notices.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{event, Level};

/// Default lifetime of an error or result notice.
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_millis(3000);

/// Owns at most one pending "clear this notice" task.
///
/// Arming again replaces the pending task instead of stacking a second one,
/// so a notice always lives the full delay measured from its latest update.
/// [`AutoDismiss::cancel`] and `Drop` abort the pending task.
#[derive(Debug)]
pub struct AutoDismiss {
  delay: Duration,
  // Bumped on every arm/cancel; a fired task only acts if its generation is still current.
  generation: Arc<AtomicU64>,
  pending: Mutex<Option<JoinHandle<()>>>,
}

impl AutoDismiss {
  pub fn new(delay: Duration) -> Self {
    Self {
      delay,
      generation: Arc::new(AtomicU64::new(0)),
      pending: Mutex::new(None),
    }
  }

  pub fn delay(&self) -> Duration {
    self.delay
  }

  /// Schedules `on_fire` to run once `delay` has elapsed, replacing any
  /// previously armed task. Requires a tokio runtime; without one the notice
  /// simply stays until cleared by hand.
  pub fn arm<F>(&self, on_fire: F)
  where
    F: FnOnce() + Send + 'static,
  {
    let armed_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

    let runtime = match tokio::runtime::Handle::try_current() {
      Ok(handle) => handle,
      Err(_) => {
        event!(Level::WARN, "No tokio runtime available; notice will not auto-dismiss.");
        self.abort_pending();
        return;
      }
    };

    let generation = Arc::clone(&self.generation);
    let delay = self.delay;
    let task = runtime.spawn(async move {
      tokio::time::sleep(delay).await;
      if generation.load(Ordering::SeqCst) == armed_generation {
        event!(Level::DEBUG, "Auto-dismissing notice.");
        on_fire();
      }
    });

    if let Some(previous) = self.pending.lock().replace(task) {
      previous.abort();
    }
  }

  pub fn cancel(&self) {
    self.generation.fetch_add(1, Ordering::SeqCst);
    self.abort_pending();
  }

  pub fn is_armed(&self) -> bool {
    self.pending.lock().as_ref().is_some_and(|task| !task.is_finished())
  }

  fn abort_pending(&self) {
    if let Some(previous) = self.pending.lock().take() {
      previous.abort();
    }
  }
}

impl Default for AutoDismiss {
  fn default() -> Self {
    Self::new(DEFAULT_NOTICE_TTL)
  }
}

impl Drop for AutoDismiss {
  fn drop(&mut self) {
    self.cancel();
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::atomic::AtomicUsize;

  async fn settle() {
    for _ in 0..8 {
      tokio::task::yield_now().await;
    }
  }

  #[tokio::test(start_paused = true)]
  async fn fires_once_after_the_delay() {
    let fired = Arc::new(AtomicUsize::new(0));
    let timer = AutoDismiss::new(Duration::from_millis(100));

    let counter = Arc::clone(&fired);
    timer.arm(move || {
      counter.fetch_add(1, Ordering::SeqCst);
    });
    // Let the timer task start its sleep before moving the clock.
    settle().await;

    tokio::time::advance(Duration::from_millis(99)).await;
    settle().await;
    assert_eq!(fired.load(Ordering::SeqCst), 0);
    assert!(timer.is_armed());

    tokio::time::advance(Duration::from_millis(1)).await;
    settle().await;
    assert_eq!(fired.load(Ordering::SeqCst), 1);
  }

  #[tokio::test(start_paused = true)]
  async fn rearming_resets_instead_of_stacking() {
    let fired = Arc::new(AtomicUsize::new(0));
    let timer = AutoDismiss::new(Duration::from_millis(100));

    let counter = Arc::clone(&fired);
    timer.arm(move || {
      counter.fetch_add(1, Ordering::SeqCst);
    });
    settle().await;
    tokio::time::advance(Duration::from_millis(60)).await;
    settle().await;

    let counter = Arc::clone(&fired);
    timer.arm(move || {
      counter.fetch_add(10, Ordering::SeqCst);
    });
    settle().await;

    // The first deadline passes without effect.
    tokio::time::advance(Duration::from_millis(60)).await;
    settle().await;
    assert_eq!(fired.load(Ordering::SeqCst), 0);

    tokio::time::advance(Duration::from_millis(40)).await;
    settle().await;
    assert_eq!(fired.load(Ordering::SeqCst), 10);
  }

  #[tokio::test(start_paused = true)]
  async fn cancel_and_drop_prevent_firing() {
    let fired = Arc::new(AtomicUsize::new(0));

    let timer = AutoDismiss::new(Duration::from_millis(100));
    let counter = Arc::clone(&fired);
    timer.arm(move || {
      counter.fetch_add(1, Ordering::SeqCst);
    });
    timer.cancel();
    assert!(!timer.is_armed());

    let dropped = AutoDismiss::new(Duration::from_millis(100));
    let counter = Arc::clone(&fired);
    dropped.arm(move || {
      counter.fetch_add(1, Ordering::SeqCst);
    });
    drop(dropped);

    tokio::time::advance(Duration::from_millis(500)).await;
    settle().await;
    assert_eq!(fired.load(Ordering::SeqCst), 0);
  }
}
