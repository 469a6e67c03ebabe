// storefront/src/state/cell.rs

use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::{Arc, Weak};

/// Shared, interiorly mutable state owned by one flow.
///
/// IMPORTANT: guards obtained from this struct are blocking and MUST NOT be
/// held across `.await` suspension points.
#[derive(Debug)]
pub struct StateCell<T: Send + Sync + 'static>(Arc<RwLock<T>>);

impl<T: Send + Sync + 'static> StateCell<T> {
  pub fn new(data: T) -> Self {
    StateCell(Arc::new(RwLock::new(data)))
  }

  /// The returned guard MUST be dropped before any `.await` point.
  pub fn read(&self) -> RwLockReadGuard<'_, T> {
    self.0.read()
  }

  /// The returned guard MUST be dropped before any `.await` point.
  pub fn write(&self) -> RwLockWriteGuard<'_, T> {
    self.0.write()
  }

  // Guard onto one field, e.g. `cell.map_read(|s| &s.error)`.
  pub fn map_read<F, U: ?Sized>(&self, f: F) -> MappedRwLockReadGuard<'_, U>
  where
    F: FnOnce(&T) -> &U,
  {
    RwLockReadGuard::map(self.read(), f)
  }

  /// Non-owning handle, used by timers that must not keep a torn-down flow alive.
  pub fn downgrade(&self) -> WeakStateCell<T> {
    WeakStateCell(Arc::downgrade(&self.0))
  }
}

impl<T: Send + Sync + Clone + 'static> StateCell<T> {
  /// Copy of the current state, for rendering.
  pub fn snapshot(&self) -> T {
    self.read().clone()
  }
}

impl<T: Send + Sync + 'static> Clone for StateCell<T> {
  fn clone(&self) -> Self {
    StateCell(Arc::clone(&self.0))
  }
}

impl<T: Send + Sync + 'static + Default> Default for StateCell<T> {
  fn default() -> Self {
    Self::new(Default::default())
  }
}

#[derive(Debug)]
pub struct WeakStateCell<T: Send + Sync + 'static>(Weak<RwLock<T>>);

impl<T: Send + Sync + 'static> WeakStateCell<T> {
  pub fn upgrade(&self) -> Option<StateCell<T>> {
    self.0.upgrade().map(StateCell)
  }
}

impl<T: Send + Sync + 'static> Clone for WeakStateCell<T> {
  fn clone(&self) -> Self {
    WeakStateCell(Weak::clone(&self.0))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn clones_share_and_weak_handles_expire() {
    let cell = StateCell::new(1_u32);
    let other = cell.clone();
    *other.write() = 5;
    assert_eq!(*cell.read(), 5);
    assert_eq!(cell.snapshot(), 5);

    let weak = cell.downgrade();
    assert!(weak.upgrade().is_some());
    drop(cell);
    drop(other);
    assert!(weak.upgrade().is_none());
  }
}
