// storefront/src/flows/account.rs

//! The session user's bank account: lookup, creation, deposits and balance.
//!
//! Lookups and mutations are sequenced separately, so a deposit never makes a
//! pending lookup stale. Every cached account is tagged with the user it was
//! loaded for and is ignored once the session moves to another user.

use super::message_or;
use crate::gateway::GatewayApi;
use crate::models::{BankAccount, CreateAccountRequest, DepositRequest, Price, UserId};
use crate::session::Session;
use crate::state::{AutoDismiss, FlowOutcome, RequestSequencer, RequestTicket, StateCell};
use std::sync::Arc;
use std::time::Duration;
use tracing::{event, info, instrument, warn, Level};

const NO_USER: &str = "Enter a user ID first";
const NO_ACCOUNT: &str = "Create a bank account before depositing";
const BAD_AMOUNT: &str = "Enter a positive amount to deposit";
const NO_ACCOUNT_YET: &str = "You don't have a bank account yet";
const CREATE_FAILED: &str = "Could not create a bank account";
const DEPOSIT_FAILED: &str = "Deposit failed";
const BALANCE_FAILED: &str = "Could not refresh the balance";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountState {
  pub account_id: Option<String>,
  pub balance: Option<Price>,
  /// Amount typed into the deposit field.
  pub deposit_amount: Option<Price>,
  pub pending: bool,
  /// Cleared automatically once the notice TTL elapses.
  pub error: Option<String>,
  /// User whose account lookup or creation last completed.
  pub loaded_for: Option<UserId>,
}

impl AccountState {
  /// The cached account id, only if it belongs to `user_id`.
  pub fn account_for(&self, user_id: UserId) -> Option<&str> {
    match self.loaded_for {
      Some(owner) if owner == user_id => self.account_id.as_deref(),
      _ => None,
    }
  }
}

pub struct AccountFlow {
  gateway: Arc<dyn GatewayApi>,
  session: Session,
  state: StateCell<AccountState>,
  lookups: RequestSequencer,
  mutations: RequestSequencer,
  dismiss: AutoDismiss,
}

impl AccountFlow {
  pub fn new(gateway: Arc<dyn GatewayApi>, session: Session, notice_ttl: Duration) -> Self {
    Self {
      gateway,
      session,
      state: StateCell::default(),
      lookups: RequestSequencer::new(),
      mutations: RequestSequencer::new(),
      dismiss: AutoDismiss::new(notice_ttl),
    }
  }

  pub fn snapshot(&self) -> AccountState {
    self.state.snapshot()
  }

  pub fn set_deposit_amount(&self, amount: Option<Price>) {
    self.state.write().deposit_amount = amount;
  }

  pub fn clear_error(&self) {
    self.dismiss.cancel();
    self.state.write().error = None;
  }

  /// Loads the session user's account. Without a session user every field is
  /// reset and nothing is requested.
  ///
  /// When the user differs from the one the cached account belongs to, the
  /// cached account is dropped first and outstanding mutations become stale.
  #[instrument(name = "AccountFlow::fetch_account", skip_all, fields(user_id = ?self.session.user_id()))]
  pub async fn fetch_account(&self) -> FlowOutcome {
    if self.lookups.is_disposed() {
      return FlowOutcome::Skipped;
    }

    let Some(user_id) = self.session.user_id() else {
      self.lookups.invalidate();
      self.mutations.invalidate();
      self.dismiss.cancel();
      *self.state.write() = AccountState::default();
      event!(Level::DEBUG, "No session user; account state reset.");
      return FlowOutcome::Skipped;
    };

    {
      let mut state = self.state.write();
      if state.loaded_for.is_some_and(|owner| owner != user_id) {
        self.mutations.invalidate();
        state.account_id = None;
        state.balance = None;
        state.loaded_for = None;
      }
    }

    let ticket = self.begin(&self.lookups);
    let response = self.gateway.user_account(user_id).await;

    let failure = {
      let mut state = self.state.write();
      if !self.applies(&self.lookups, ticket, user_id) {
        event!(Level::DEBUG, seq = ticket.seq(), "Discarding superseded account response.");
        return FlowOutcome::Discarded;
      }
      state.pending = false;
      match response {
        Ok(account) => {
          info!(account_id = %account.id, balance = account.balance, "Account loaded.");
          apply_account(&mut state, user_id, account);
          None
        }
        Err(err) => {
          warn!(error = %err, status = err.status(), "Account lookup failed.");
          state.account_id = None;
          state.balance = None;
          state.loaded_for = Some(user_id);
          Some(message_or(err.user_message(), NO_ACCOUNT_YET))
        }
      }
    };

    self.finish(failure)
  }

  /// Creates an account for the session user. `on_success` runs after the
  /// new account is stored. The deposit field is left as it is.
  #[instrument(name = "AccountFlow::create_account", skip_all, fields(user_id = ?self.session.user_id()))]
  pub async fn create_account<F>(&self, on_success: F) -> FlowOutcome
  where
    F: FnOnce() + Send,
  {
    if self.lookups.is_disposed() {
      return FlowOutcome::Skipped;
    }

    let Some(user_id) = self.session.user_id() else {
      self.fail_fast(NO_USER);
      return FlowOutcome::Skipped;
    };

    let ticket = self.begin(&self.mutations);
    let response = self.gateway.create_account(&CreateAccountRequest { user_id }).await;

    let failure = {
      let mut state = self.state.write();
      if !self.applies(&self.mutations, ticket, user_id) {
        event!(Level::DEBUG, seq = ticket.seq(), "Discarding superseded create-account response.");
        return FlowOutcome::Discarded;
      }
      state.pending = false;
      match response {
        Ok(account) => {
          info!(account_id = %account.id, "Bank account created.");
          // A lookup issued before the account existed must not overwrite it.
          self.lookups.invalidate();
          apply_account(&mut state, user_id, account);
          None
        }
        Err(err) => {
          warn!(error = %err, status = err.status(), "Account creation failed.");
          Some(message_or(err.user_message(), CREATE_FAILED))
        }
      }
    };

    let outcome = self.finish(failure);
    if outcome == FlowOutcome::Succeeded {
      on_success();
    }
    outcome
  }

  /// Deposits the amount in the deposit field into the known account.
  ///
  /// Needs a session user, an account loaded for that user and a positive
  /// amount; when any is missing an error is shown and nothing is requested.
  #[instrument(name = "AccountFlow::deposit", skip_all, fields(user_id = ?self.session.user_id()))]
  pub async fn deposit<F>(&self, on_success: F) -> FlowOutcome
  where
    F: FnOnce() + Send,
  {
    if self.lookups.is_disposed() {
      return FlowOutcome::Skipped;
    }

    let request = {
      let state = self.state.read();
      let user_id = self.session.user_id();
      let account_id = user_id.and_then(|id| state.account_for(id)).map(str::to_string);
      match (user_id, account_id, state.deposit_amount) {
        (None, _, _) => Err(NO_USER),
        (Some(_), None, _) => Err(NO_ACCOUNT),
        (Some(_), Some(_), None) => Err(BAD_AMOUNT),
        (Some(_), Some(_), Some(amount)) if amount <= 0 => Err(BAD_AMOUNT),
        (Some(user_id), Some(account_id), Some(amount)) => Ok(DepositRequest {
          account_id,
          amount,
          user_id,
        }),
      }
    };
    let request = match request {
      Ok(request) => request,
      Err(reason) => {
        self.fail_fast(reason);
        return FlowOutcome::Skipped;
      }
    };

    let ticket = self.begin(&self.mutations);
    let response = self.gateway.deposit(&request).await;

    let failure = {
      let mut state = self.state.write();
      if !self.applies(&self.mutations, ticket, request.user_id) {
        event!(Level::DEBUG, seq = ticket.seq(), "Discarding superseded deposit response.");
        return FlowOutcome::Discarded;
      }
      state.pending = false;
      match response {
        Ok(balance) => {
          info!(account_id = %request.account_id, amount = request.amount, balance, "Deposit applied.");
          state.balance = Some(balance);
          state.error = None;
          None
        }
        Err(err) => {
          warn!(error = %err, status = err.status(), "Deposit failed.");
          Some(message_or(err.user_message(), DEPOSIT_FAILED))
        }
      }
    };

    let outcome = self.finish(failure);
    if outcome == FlowOutcome::Succeeded {
      on_success();
    }
    outcome
  }

  /// Re-reads the balance of the known account.
  #[instrument(name = "AccountFlow::refresh_balance", skip_all)]
  pub async fn refresh_balance(&self) -> FlowOutcome {
    if self.lookups.is_disposed() {
      return FlowOutcome::Skipped;
    }

    let known = {
      let state = self.state.read();
      self
        .session
        .user_id()
        .and_then(|user_id| state.account_for(user_id).map(|id| (user_id, id.to_string())))
    };
    let Some((user_id, account_id)) = known else {
      self.fail_fast(NO_ACCOUNT_YET);
      return FlowOutcome::Skipped;
    };

    let ticket = self.begin(&self.mutations);
    let response = self.gateway.account_balance(&account_id).await;

    let failure = {
      let mut state = self.state.write();
      if !self.applies(&self.mutations, ticket, user_id) {
        event!(Level::DEBUG, seq = ticket.seq(), "Discarding superseded balance response.");
        return FlowOutcome::Discarded;
      }
      state.pending = false;
      match response {
        Ok(balance) => {
          state.balance = Some(balance);
          None
        }
        Err(err) => {
          warn!(error = %err, "Balance refresh failed.");
          Some(message_or(err.user_message(), BALANCE_FAILED))
        }
      }
    };

    self.finish(failure)
  }

  pub fn dispose(&self) {
    self.lookups.dispose();
    self.mutations.dispose();
    self.dismiss.cancel();
  }

  fn begin(&self, sequencer: &RequestSequencer) -> RequestTicket {
    let ticket = sequencer.issue();
    self.state.write().pending = true;
    ticket
  }

  /// A response applies only while its ticket is current and the session
  /// still belongs to the user it was requested for.
  fn applies(&self, sequencer: &RequestSequencer, ticket: RequestTicket, user_id: UserId) -> bool {
    sequencer.is_current(ticket) && self.session.user_id() == Some(user_id)
  }

  /// Records the end of an applied request: shows `failure` if there is one,
  /// otherwise drops any visible error.
  fn finish(&self, failure: Option<String>) -> FlowOutcome {
    match failure {
      Some(message) => {
        self.show_error(message);
        FlowOutcome::Failed
      }
      None => {
        self.dismiss.cancel();
        self.state.write().error = None;
        FlowOutcome::Succeeded
      }
    }
  }

  fn fail_fast(&self, reason: &str) {
    event!(Level::DEBUG, reason, "Precondition unmet; no request issued.");
    self.show_error(reason.to_string());
  }

  fn show_error(&self, message: String) {
    self.state.write().error = Some(message);
    let weak = self.state.downgrade();
    self.dismiss.arm(move || {
      if let Some(state) = weak.upgrade() {
        state.write().error = None;
      }
    });
  }
}

fn apply_account(state: &mut AccountState, user_id: UserId, account: BankAccount) {
  state.account_id = Some(account.id);
  state.balance = Some(account.balance);
  state.loaded_for = Some(user_id);
}

impl std::fmt::Debug for AccountFlow {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AccountFlow")
      .field("state", &*self.state.read())
      .field("disposed", &self.lookups.is_disposed())
      .finish()
  }
}
