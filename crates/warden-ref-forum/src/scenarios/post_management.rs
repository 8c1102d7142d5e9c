//! Scenario 1: Post Management
//!
//! Demonstrates three distinct outcomes of the same hand-written policy:
//!
//! Sub-case A — administrator deletes any post      → Permit (job runs)
//! Sub-case B — owner deletes their own post        → Permit (job runs)
//! Sub-case C — non-owner deletes someone's post    → Deny (job never runs)
//!
//! Every decision is recorded in a hash-chained decision trail, and the
//! trail's integrity is verified at the end.

use tracing::info;

use warden_audit::InMemoryDecisionTrail;
use warden_contracts::{
    error::WardenResult,
    outcome::RunOutcome,
    record::DecisionRecord,
};
use warden_core::Action;

use crate::mock_data::{get_post, get_user};
use crate::policies::post_policy;

/// Delete a post and report what happened.
///
/// Builds an `Action` bound to `post_policy`, pre-authorizes it, records
/// the decision in the trail, then runs the deletion job. The job only
/// executes on a permit.
fn delete_post(
    trail: &InMemoryDecisionTrail,
    handle: &str,
    post_id: u64,
) -> WardenResult<RunOutcome<String>> {
    let action = Action::new(post_policy)
        .with_principal(get_user(handle))
        .with_action_id("delete_post")
        .with_param("post", get_post(post_id))
        .authorize()?;

    // The decision and action id are both present after authorize.
    if let (Some(action_id), Some(decision)) = (action.action_id(), action.decision()) {
        trail.record(&DecisionRecord::new(
            action.principal().clone(),
            action_id.clone(),
            action.params().clone(),
            decision.clone(),
        ))?;
    }

    action.run(|action| {
        let post_id = action
            .params()
            .get("post")
            .and_then(|p| p.pointer("/id"))
            .cloned()
            .unwrap_or_default();
        format!("post {} deleted", post_id)
    })
}

/// Run Scenario 1: Post Management — three sub-cases.
pub fn run_scenario() -> WardenResult<()> {
    info!(scenario = "post_management", "scenario starting");

    println!("=== Scenario 1: Post Management ===");
    println!();

    let trail = InMemoryDecisionTrail::new();

    // ── Sub-case A: administrator deletes any post ────────────────────────────

    {
        println!("  Sub-case A: Administrator deletes another user's post");
        println!("  Principal:  ada (id 9, role admin)");
        println!("  Post:       200 (owned by user 2)");

        match delete_post(&trail, "ada", 200)? {
            RunOutcome::Completed { output } => {
                println!("  Decision:   Permit");
                println!("  Job output: {}", output);
                println!("  RESULT: SUCCESS (expected)");
            }
            RunOutcome::Denied { reason } => {
                println!("  Unexpectedly denied: {}", reason);
            }
        }
        println!();
    }

    // ── Sub-case B: owner deletes their own post ──────────────────────────────

    {
        println!("  Sub-case B: Owner deletes their own post");
        println!("  Principal:  alice (id 1, role user)");
        println!("  Post:       100 (owned by user 1)");

        match delete_post(&trail, "alice", 100)? {
            RunOutcome::Completed { output } => {
                println!("  Decision:   Permit (ownership match)");
                println!("  Job output: {}", output);
                println!("  RESULT: SUCCESS (expected)");
            }
            RunOutcome::Denied { reason } => {
                println!("  Unexpectedly denied: {}", reason);
            }
        }
        println!();
    }

    // ── Sub-case C: non-owner is denied ───────────────────────────────────────

    {
        println!("  Sub-case C: Non-owner attempts to delete someone else's post");
        println!("  Principal:  bob (id 2, role user)");
        println!("  Post:       100 (owned by user 1)");

        match delete_post(&trail, "bob", 100)? {
            RunOutcome::Denied { reason } => {
                println!("  Decision:   Deny");
                println!("  Reason:     {}", reason);
                println!("  Job:        never invoked");
                println!("  RESULT: DENIED (expected)");
            }
            RunOutcome::Completed { .. } => {
                println!("  Unexpectedly permitted — ownership enforcement failed");
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
    println!("  Scenario 1 complete.");
    println!();

    Ok(())
}
