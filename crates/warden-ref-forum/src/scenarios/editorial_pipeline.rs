//! Scenario 2: Editorial Pipeline
//!
//! Demonstrates pre-authorization across pipeline stages: the decision is
//! made in an early stage with `authorize`, carried on the action as data,
//! and honored later by `run` without consulting the policy again.
//!
//! Sub-case A — editor publishes a reviewed draft  → authorized early, job
//!              runs later
//! Sub-case B — author tries to publish their own
//!              unreviewed draft                   → denial carried to the
//!              final stage; the publish job never runs
//!
//! The publishing policy is a closure, showing that any decision function is
//! a policy with zero ceremony.

use serde_json::{json, Value};
use tracing::info;

use warden_contracts::{
    action::{ActionId, Params},
    decision::Decision,
    error::WardenResult,
    outcome::RunOutcome,
    principal::Principal,
};
use warden_core::Action;

use crate::mock_data::{get_post, get_user};

/// Editors may publish any draft; authors may publish their own draft only
/// once it has been marked reviewed. Everyone else is denied.
fn publishing_policy(
    principal: &Principal,
    _action_id: &ActionId,
    params: &Params,
) -> WardenResult<Decision> {
    if principal.get("/role") == Some(&Value::String("editor".to_string())) {
        return Ok(Decision::permit());
    }

    let owner = params.get("post").and_then(|p| p.pointer("/owner_id"));
    let reviewed = params.get("reviewed") == Some(&json!(true));
    if owner.is_some() && owner == principal.get("/id") && reviewed {
        return Ok(Decision::permit());
    }

    Ok(Decision::deny(json!({
        "code": "unauthorized",
        "hint": "drafts must pass editorial review before publication"
    })))
}

/// Stage one of the pipeline: accumulate context and decide.
///
/// Returns the authorized action; the publish stage runs later and must not
/// re-decide.
fn review_stage(principal: Value, post_id: u64, reviewed: bool) -> WardenResult<Action> {
    Action::new(publishing_policy)
        .with_principal(principal)
        .with_action_id("publish_post")
        .with_param("post", get_post(post_id))
        .with_param("reviewed", reviewed)
        .authorize()
}

/// Stage two of the pipeline: run the publish job against the stored
/// decision.
fn publish_stage(action: Action) -> WardenResult<RunOutcome<String>> {
    action.run(|action| {
        let title = action
            .params()
            .get("post")
            .and_then(|p| p.pointer("/title"))
            .and_then(|t| t.as_str())
            .unwrap_or("<untitled>")
            .to_string();
        format!("'{}' published", title)
    })
}

/// Run Scenario 2: Editorial Pipeline — two sub-cases.
pub fn run_scenario() -> WardenResult<()> {
    info!(scenario = "editorial_pipeline", "scenario starting");

    println!("=== Scenario 2: Editorial Pipeline ===");
    println!();

    // ── Sub-case A: editor publishes a reviewed draft ─────────────────────────

    {
        println!("  Sub-case A: Editor publishes a draft");
        println!("  Principal:  editorial desk (role editor)");
        println!("  Draft:      300 ('A gentle tour of lifetimes')");

        let editor = json!({ "id": 7, "handle": "vera", "role": "editor" });
        let action = review_stage(editor, 300, true)?;
        println!(
            "  Review stage decision:  {}",
            if action.authorized() == Some(true) { "Permit" } else { "Deny" }
        );

        match publish_stage(action)? {
            RunOutcome::Completed { output } => {
                println!("  Publish stage:          job ran, no re-decision");
                println!("  Job output:             {}", output);
                println!("  RESULT: SUCCESS (expected)");
            }
            RunOutcome::Denied { reason } => {
                println!("  Unexpectedly denied: {}", reason);
            }
        }
        println!();
    }

    // ── Sub-case B: author's unreviewed draft carries its denial ─────────────

    {
        println!("  Sub-case B: Author publishes their own unreviewed draft");
        println!("  Principal:  alice (id 1, role user)");
        println!("  Draft:      300 (owned by alice, not yet reviewed)");

        let action = review_stage(get_user("alice"), 300, false)?;
        println!(
            "  Review stage decision:  {}",
            if action.authorized() == Some(false) { "Deny" } else { "Permit" }
        );

        match publish_stage(action)? {
            RunOutcome::Denied { reason } => {
                println!("  Publish stage:          job never invoked");
                println!("  Reason (structured):    {}", reason);
                println!("  RESULT: DENIED (expected)");
            }
            RunOutcome::Completed { .. } => {
                println!("  Unexpectedly published — review gate failed");
            }
        }
        println!();
    }

    println!("  Scenario 2 complete.");
    println!();

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
