//! Scenario 3: Moderation Rule Set
//!
//! Demonstrates the declarative side of the decision layer: the moderation
//! rules live in a TOML file, are parsed into a `RuleSetPolicy` once, and are
//! shared across every action in the scenario through an `Arc`.
//!
//! Sub-case A — moderator locks a thread       → permitted by rule
//!              `moderators-may-lock`
//! Sub-case B — regular user tries to lock     → caught by `fallback-deny`
//! Sub-case C — owner deletes their own post   → permitted by the
//!              field-match rule `owners-may-delete`
//!
//! Every decision is recorded in a hash-chained decision trail.

use std::sync::Arc;

use tracing::info;

use warden_audit::InMemoryDecisionTrail;
use warden_contracts::{
    error::WardenResult,
    outcome::RunOutcome,
    record::DecisionRecord,
};
use warden_core::Action;
use warden_policy::RuleSetPolicy;

use crate::mock_data::{get_post, get_thread, get_user};

/// The moderation rule file, compiled into the binary.
const MODERATION_RULES: &str = include_str!("../../rules/moderation.toml");

/// Build an action against the shared rule set, authorize it, and record the
/// decision in the trail.
fn moderate(
    policy: &Arc<RuleSetPolicy>,
    trail: &InMemoryDecisionTrail,
    handle: &str,
    action_id: &str,
    param_key: &str,
    param_value: serde_json::Value,
) -> WardenResult<Action> {
    let action = Action::from_arc(policy.clone())
        .with_principal(get_user(handle))
        .with_action_id(action_id)
        .with_param(param_key, param_value)
        .authorize()?;

    if let (Some(action_id), Some(decision)) = (action.action_id(), action.decision()) {
        trail.record(&DecisionRecord::new(
            action.principal().clone(),
            action_id.clone(),
            action.params().clone(),
            decision.clone(),
        ))?;
    }

    Ok(action)
}

/// Run Scenario 3: Moderation Rule Set — three sub-cases.
pub fn run_scenario() -> WardenResult<()> {
    info!(scenario = "moderation", "scenario starting");

    println!("=== Scenario 3: Moderation Rule Set ===");
    println!();

    let policy = Arc::new(RuleSetPolicy::from_toml_str(MODERATION_RULES)?);
    let trail = InMemoryDecisionTrail::new();

    println!(
        "  Loaded rule set: {} rule(s) from moderation.toml",
        policy.rules().len()
    );
    println!();

    // ── Sub-case A: moderator locks a thread ──────────────────────────────────

    {
        println!("  Sub-case A: Moderator locks a discussion thread");
        println!("  Principal:  morgan (id 5, role moderator)");
        println!("  Thread:     42 ('Show and tell: February projects')");

        let action = moderate(&policy, &trail, "morgan", "lock_thread", "thread", get_thread(42))?;
        match action.run(|action| {
            let thread_id = action
                .params()
                .get("thread")
                .and_then(|t| t.pointer("/id"))
                .cloned()
                .unwrap_or_default();
            format!("thread {} locked", thread_id)
        })? {
            RunOutcome::Completed { output } => {
                println!("  Matched rule: moderators-may-lock");
                println!("  Job output:   {}", output);
                println!("  RESULT: SUCCESS (expected)");
            }
            RunOutcome::Denied { reason } => {
                println!("  Unexpectedly denied: {}", reason);
            }
        }
        println!();
    }

    // ── Sub-case B: regular user falls through to the catch-all ──────────────

    {
        println!("  Sub-case B: Regular user attempts to lock a thread");
        println!("  Principal:  bob (id 2, role user)");
        println!("  Thread:     42");

        let action = moderate(&policy, &trail, "bob", "lock_thread", "thread", get_thread(42))?;
        match action.run(|_| "thread locked".to_string())? {
            RunOutcome::Denied { reason } => {
                println!("  Matched rule: fallback-deny (catch-all)");
                println!("  Reason:       {}", reason);
                println!("  Job:          never invoked");
                println!("  RESULT: DENIED (expected)");
            }
            RunOutcome::Completed { .. } => {
                println!("  Unexpectedly permitted — catch-all failed");
            }
        }
        println!();
    }

    // ── Sub-case C: owner deletes their own post via field matching ──────────

    {
        println!("  Sub-case C: Owner deletes their own post");
        println!("  Principal:  alice (id 1, role user)");
        println!("  Post:       100 (owned by user 1)");

        let action = moderate(&policy, &trail, "alice", "delete_post", "post", get_post(100))?;
        match action.run(|action| {
            let post_id = action
                .params()
                .get("post")
                .and_then(|p| p.pointer("/id"))
                .cloned()
                .unwrap_or_default();
            format!("post {} deleted", post_id)
        })? {
            RunOutcome::Completed { output } => {
                println!("  Matched rule: owners-may-delete (field match)");
                println!("  Job output:   {}", output);
                println!("  RESULT: SUCCESS (expected)");
            }
            RunOutcome::Denied { reason } => {
                println!("  Unexpectedly denied: {}", reason);
            }
        }
        println!();
    }

    // ── Trail verification ────────────────────────────────────────────────────

    let integrity_ok = trail.verify_integrity();
    let log = trail.export_log();
    println!(
        "  Decision trail integrity: {} ({} decision(s) recorded)",
        if integrity_ok { "VERIFIED" } else { "FAILED" },
        log.events.len()
    );
    println!();
    println!("  Scenario 3 complete.");
    println!();

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use warden_contracts::{
        action::{ActionId, Params},
        principal::Principal,
    };
    use warden_core::Policy;
    use warden_policy::RuleSetPolicy;

    use crate::mock_data::{get_post, get_thread, get_user};

    use super::MODERATION_RULES;

    fn rules() -> RuleSetPolicy {
        RuleSetPolicy::from_toml_str(MODERATION_RULES).unwrap()
    }

    fn params(key: &str, value: serde_json::Value) -> Params {
        [(key, value)].into_iter().collect()
    }

    /// The bundled rule file parses and carries its catch-all.
    #[test]
    fn test_rule_file_parses() {
        let policy = rules();
        assert_eq!(policy.rules().len(), 5);
        assert!(policy.rules().last().unwrap().is_catch_all());
    }

    /// A moderator may lock a thread; a regular user may not.
    #[test]
    fn test_lock_thread_requires_moderator() {
        let policy = rules();
        let action_id = ActionId::from("lock_thread");
        let thread = params("thread", get_thread(42));

        let morgan = Principal::new(get_user("morgan"));
        assert!(policy.decide(&morgan, &action_id, &thread).unwrap().is_permit());

        let bob = Principal::new(get_user("bob"));
        let decision = policy.decide(&bob, &action_id, &thread).unwrap();
        assert_eq!(
            decision.reason().map(|r| r.to_string()),
            Some("unauthorized".to_string())
        );
    }

    /// The field-match rule grants deletion to the owner and nobody else.
    #[test]
    fn test_owner_delete_via_field_match() {
        let policy = rules();
        let action_id = ActionId::from("delete_post");
        let post = params("post", get_post(100));

        let alice = Principal::new(get_user("alice"));
        assert!(policy.decide(&alice, &action_id, &post).unwrap().is_permit());

        let bob = Principal::new(get_user("bob"));
        assert!(policy.decide(&bob, &action_id, &post).unwrap().is_deny());
    }

    /// The wildcard admin rule permits actions no other rule names.
    #[test]
    fn test_admin_wildcard_permits_anything() {
        let policy = rules();
        let ada = Principal::new(get_user("ada"));

        for action in ["lock_thread", "hide_post", "purge_spam"] {
            let decision = policy
                .decide(&ada, &ActionId::from(action), &Params::new())
                .unwrap();
            assert!(decision.is_permit(), "admin must be permitted to {action}");
        }
    }
}
