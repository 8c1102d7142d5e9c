//! Hand-written forum policies.
//!
//! `post_policy` is a plain decision function: it reads fields out of the
//! principal and params, returns `Permit` or `Deny("unauthorized")`, and
//! never raises for a business denial. Being a free function with the right
//! signature, it is already a `Policy` via the blanket impl in warden-core.

use serde_json::Value;

use warden_contracts::{
    action::{ActionId, Params},
    decision::Decision,
    error::WardenResult,
    principal::Principal,
};

/// The post-management policy.
///
/// Rules, in order:
/// 1. Administrators may perform any action.
/// 2. A post's owner may delete it (`params.post.owner_id` must equal
///    `principal.id`; a missing field on either side never matches).
/// 3. Everything else is denied with the reason `"unauthorized"`.
pub fn post_policy(
    principal: &Principal,
    action_id: &ActionId,
    params: &Params,
) -> WardenResult<Decision> {
    if principal.get("/role") == Some(&Value::String("admin".to_string())) {
        return Ok(Decision::permit());
    }

    if action_id.as_str() == "delete_post" {
        let owner = params.get("post").and_then(|post| post.pointer("/owner_id"));
        // Both sides must resolve; absent fields never grant ownership.
        if owner.is_some() && owner == principal.get("/id") {
            return Ok(Decision::permit());
        }
    }

    Ok(Decision::deny("unauthorized"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
