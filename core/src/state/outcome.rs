// storefront/src/state/outcome.rs

//! What happened when a flow operation ran.

/// Flows never return their failures to the caller; the failure is written
/// into the flow's state. The outcome tells the caller which path was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
  /// A request was issued and its successful response was applied.
  Succeeded,
  /// A request was issued and its failure was recorded in the flow state.
  Failed,
  /// No request was issued: a precondition was unmet or there was nothing to do.
  Skipped,
  /// A request was issued but its response was dropped, because a newer
  /// request superseded it or the flow was disposed.
  Discarded,
}
