//! The TOML-driven `Policy` implementation.
//!
//! `RuleSetPolicy` loads a `RuleSetConfig` from a TOML string or file and
//! implements the `Policy` trait from warden-core.
//!
//! Evaluation algorithm:
//!
//! 1. Compose the evaluation document `{ "principal": …, "params": … }`.
//! 2. Iterate rules in declaration order; the first rule whose action pattern
//!    matches and whose predicates all hold produces the decision.
//! 3. If the list is exhausted with no match →
//!    `Err(WardenError::UnmatchedAction)`. Exhaustion is a configuration bug,
//!    never an implicit denial.

use std::path::Path;

use serde_json::json;
use tracing::{debug, warn};

use warden_contracts::{
    action::{ActionId, Params},
    decision::Decision,
    error::{WardenError, WardenResult},
    principal::Principal,
};
use warden_core::Policy;

use crate::rule::{Rule, RuleEffect, RuleSetConfig};

/// A `Policy` implementation that reads ordered rules from a TOML document.
///
/// Construct via `from_toml_str` or `from_file`, then bind to an `Action`
/// or call the `Policy` methods directly.
///
/// ```rust,ignore
/// use warden_policy::RuleSetPolicy;
///
/// let policy = RuleSetPolicy::from_file(Path::new("rules/moderation.toml"))?;
/// ```
#[derive(Debug)]
pub struct RuleSetPolicy {
    config: RuleSetConfig,
}

impl RuleSetPolicy {
    /// Parse `s` as TOML and build a `RuleSetPolicy`.
    ///
    /// Returns `WardenError::ConfigError` if the TOML is malformed or does
    /// not match the expected `RuleSetConfig` schema. Logs a warning when the
    /// final rule is not a catch-all, since such a rule set can hit the
    /// exhaustion violation at evaluation time.
    pub fn from_toml_str(s: &str) -> WardenResult<Self> {
        let config: RuleSetConfig = toml::from_str(s).map_err(|e| WardenError::ConfigError {
            reason: format!("failed to parse rule set TOML: {}", e),
        })?;

        match config.rules.last() {
            Some(last) if last.is_catch_all() => {}
            Some(last) => {
                warn!(
                    rule_id = %last.id,
                    "rule set does not end with a catch-all rule; unmatched actions will be contract violations"
                );
            }
            None => {
                warn!("rule set is empty; every evaluation will be a contract violation");
            }
        }

        Ok(Self { config })
    }

    /// Read the file at `path` and parse it as a TOML rule set.
    ///
    /// Returns `WardenError::ConfigError` if the file cannot be read or its
    /// contents are not valid TOML matching `RuleSetConfig`.
    pub fn from_file(path: &Path) -> WardenResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| WardenError::ConfigError {
            reason: format!("failed to read rule file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// The loaded rules, in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.config.rules
    }
}

impl Policy for RuleSetPolicy {
    /// Evaluate the attempted action against the loaded rule set.
    ///
    /// Rules are tested in declaration order. The first rule whose action
    /// pattern matches `action_id` and whose predicates all hold against
    /// `{ "principal": …, "params": … }` produces the decision. A matching
    /// deny rule yields `Deny` with the rule's configured reason, or a
    /// message naming the rule when none is configured.
    ///
    /// # Errors
    ///
    /// Returns `WardenError::UnmatchedAction` when no rule matches — the
    /// rule set is not exhaustive and must be fixed, never silently denied.
    fn decide(
        &self,
        principal: &Principal,
        action_id: &ActionId,
        params: &Params,
    ) -> WardenResult<Decision> {
        let doc = json!({
            "principal": principal.as_value(),
            "params": params.to_value(),
        });

        debug!(action_id = %action_id, "evaluating rule set");

        for rule in &self.config.rules {
            if !rule.matches_action(action_id.as_str()) {
                continue;
            }
            if !rule.predicates_hold(&doc) {
                continue;
            }

            debug!(
                rule_id = %rule.id,
                action_id = %action_id,
                "rule matched"
            );

            let decision = match rule.effect {
                RuleEffect::Permit => Decision::permit(),
                RuleEffect::Deny => Decision::deny(
                    rule.deny_reason
                        .clone()
                        .unwrap_or_else(|| format!("denied by rule '{}'", rule.id)),
                ),
            };

            return Ok(decision);
        }

        warn!(
            action_id = %action_id,
            "rule set exhausted with no match"
        );

        Err(WardenError::UnmatchedAction {
            action_id: action_id.clone(),
        })
    }
}
