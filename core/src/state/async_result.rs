// storefront/src/state/async_result.rs

/// Where an [`AsyncResult`] stands. Exactly one of these is meaningful at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsyncPhase {
  Idle,
  Loading,
  Ready,
  Failed,
}

/// `data` / `loading` / `error` triple used for remote reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsyncResult<T> {
  pub data: Option<T>,
  pub loading: bool,
  pub error: Option<String>,
}

impl<T> Default for AsyncResult<T> {
  fn default() -> Self {
    Self {
      data: None,
      loading: false,
      error: None,
    }
  }
}

impl<T> AsyncResult<T> {
  /// Enters loading. Stale data is kept until the response lands.
  pub fn start(&mut self) {
    self.loading = true;
    self.error = None;
  }

  pub fn succeed(&mut self, data: T) {
    self.data = Some(data);
    self.loading = false;
    self.error = None;
  }

  pub fn fail(&mut self, message: impl Into<String>) {
    self.data = None;
    self.loading = false;
    self.error = Some(message.into());
  }

  pub fn reset(&mut self) {
    *self = Self::default();
  }

  pub fn phase(&self) -> AsyncPhase {
    if self.loading {
      AsyncPhase::Loading
    } else if self.error.is_some() {
      AsyncPhase::Failed
    } else if self.data.is_some() {
      AsyncPhase::Ready
    } else {
      AsyncPhase::Idle
    }
  }
}
