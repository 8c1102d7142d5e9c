//! The unified error type for the warden workspace.
//!
//! A denial is NOT an error — it flows back to callers as a `Decision` or a
//! `RunOutcome::Denied` value. The variants here are either the enforcing
//! wrapper's deliberate abort (`DecisionDenied`) or contract violations that
//! must fail loudly rather than default to permit or deny.

use thiserror::Error;

use crate::{action::ActionId, decision::Reason};

/// The unified error type for the warden crates.
#[derive(Debug, Error)]
pub enum WardenError {
    /// The enforcing wrapper aborted on a denial. Carries the policy's
    /// reason unchanged.
    #[error("authorization denied: {reason}")]
    DecisionDenied { reason: Reason },

    /// `authorize` or `run` was invoked with no action id set and none
    /// supplied. A programming error, not a business condition.
    #[error("no action id was set before authorization was attempted")]
    MissingActionId,

    /// An ordered rule set was exhausted without any rule matching.
    ///
    /// Rule sets must be exhaustive — declare a final catch-all rule.
    /// This is never treated as an implicit denial.
    #[error("no rule matched action '{action_id}': rule set is not exhaustive")]
    UnmatchedAction { action_id: ActionId },

    /// A rule-set configuration could not be read or parsed.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The decision trail could not append a record.
    #[error("decision trail write failed: {reason}")]
    TrailWriteFailed { reason: String },
}

/// Convenience alias used throughout the warden crates.
pub type WardenResult<T> = Result<T, WardenError>;
