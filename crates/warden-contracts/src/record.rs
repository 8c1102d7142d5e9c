//! Immutable records of authorization decisions.
//!
//! One `DecisionRecord` is produced per policy evaluation and appended to a
//! decision trail. Records are never modified after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{action::ActionId, action::Params, decision::Decision, principal::Principal};

/// An immutable record of one authorization decision.
///
/// Captures the full inputs to the evaluation alongside the decision itself,
/// so a trail reader can reconstruct what was asked and what was answered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRecord {
    /// The acting entity at evaluation time.
    pub principal: Principal,
    /// The action that was attempted.
    pub action_id: ActionId,
    /// The contextual parameters handed to the policy.
    pub params: Params,
    /// The decision the policy returned.
    pub decision: Decision,
    /// Wall-clock time the record was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl DecisionRecord {
    /// Build a record for a just-completed evaluation, stamped with the
    /// current UTC time.
    pub fn new(
        principal: Principal,
        action_id: ActionId,
        params: Params,
        decision: Decision,
    ) -> Self {
        Self {
            principal,
            action_id,
            params,
            decision,
            timestamp: Utc::now(),
        }
    }
}
