//! # warden-policy
//!
//! A TOML-driven, ordered-rule policy for the warden authorization layer.
//!
//! ## Overview
//!
//! This crate provides [`RuleSetPolicy`], which implements the
//! [`Policy`](warden_core::Policy) trait. Rules are declared in a TOML file,
//! evaluated in order, and the first matching rule wins. A rule set that
//! exhausts without a match is a contract violation
//! (`WardenError::UnmatchedAction`) — declare a final catch-all rule.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use warden_policy::RuleSetPolicy;
//!
//! let policy = RuleSetPolicy::from_file(Path::new("rules/moderation.toml"))?;
//! // Bind `policy` to `warden_core::Action::new(...)`.
//! ```
//!
//! ## Rule matching
//!
//! Each rule names an `action` pattern (`"*"` matches any action id) plus
//! optional `require` (field equality) and `require_same` (two fields equal)
//! predicates over the document `{ "principal": …, "params": … }`. A rule
//! matches only when the pattern and every predicate hold.

pub mod engine;
pub mod rule;

pub use engine::RuleSetPolicy;
pub use rule::{FieldIs, FieldsMatch, Rule, RuleEffect, RuleSetConfig};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::json;
    use warden_contracts::{
        action::{ActionId, Params},
        error::WardenError,
        principal::Principal,
    };
    use warden_core::Policy;

    use crate::RuleSetPolicy;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn principal(doc: serde_json::Value) -> Principal {
        Principal::new(doc)
    }

    fn action(id: &str) -> ActionId {
        ActionId::from(id)
    }

    // ── 1. explicit permit and deny ───────────────────────────────────────────

    /// A matching permit rule returns Permit; a matching deny rule returns
    /// Deny with the configured reason.
    #[test]
    fn test_explicit_permit_and_deny() {
        let toml = r#"
            [[rules]]
            id = "permit-read"
            description = "Anyone may read posts"
            action = "read_post"
            effect = "permit"

            [[rules]]
            id = "deny-everything-else"
            description = "Catch-all denial"
            action = "*"
            effect = "deny"
            deny_reason = "unauthorized"
        "#;

        let policy = RuleSetPolicy::from_toml_str(toml).unwrap();
        let p = principal(json!({ "id": 1 }));

        let read = policy.decide(&p, &action("read_post"), &Params::new()).unwrap();
        assert!(read.is_permit());

        let delete = policy.decide(&p, &action("delete_post"), &Params::new()).unwrap();
        assert_eq!(
            delete.reason().map(|r| r.to_string()),
            Some("unauthorized".to_string())
        );
    }

    // ── 2. first-match wins ───────────────────────────────────────────────────

    /// When two rules match the same action, only the first one produces the
    /// decision.
    #[test]
    fn test_first_match_wins() {
        let toml = r#"
            [[rules]]
            id = "first-permit"
            description = "First rule: permit"
            action = "read_post"
            effect = "permit"

            [[rules]]
            id = "second-deny"
            description = "Second rule: deny (must never be reached)"
            action = "read_post"
            effect = "deny"
            deny_reason = "this rule should never fire"

            [[rules]]
            id = "fallback"
            description = "Catch-all"
            action = "*"
            effect = "deny"
            deny_reason = "unauthorized"
        "#;

        let policy = RuleSetPolicy::from_toml_str(toml).unwrap();
        let decision = policy
            .decide(&principal(json!({ "id": 5 })), &action("read_post"), &Params::new())
            .unwrap();

        assert!(decision.is_permit());
    }

    // ── 3. field equality predicates ──────────────────────────────────────────

    /// A `require` predicate gates the rule on a principal field; a
    /// non-matching principal falls through to later rules.
    #[test]
    fn test_field_equality_predicate() {
        let toml = r#"
            [[rules]]
            id = "admins-unrestricted"
            description = "Administrators may do anything"
            action = "*"
            require = [{ path = "/principal/role", equals = "admin" }]
            effect = "permit"

            [[rules]]
            id = "fallback"
            description = "Catch-all"
            action = "*"
            effect = "deny"
            deny_reason = "unauthorized"
        "#;

        let policy = RuleSetPolicy::from_toml_str(toml).unwrap();

        let admin = principal(json!({ "id": 9, "role": "admin" }));
        let user = principal(json!({ "id": 1, "role": "user" }));

        assert!(policy.decide(&admin, &action("ban_user"), &Params::new()).unwrap().is_permit());
        assert!(policy.decide(&user, &action("ban_user"), &Params::new()).unwrap().is_deny());
    }

    // ── 4. field-match predicates ─────────────────────────────────────────────

    /// A `require_same` predicate expresses ownership: the rule matches only
    /// when the two pointers resolve to equal values.
    #[test]
    fn test_fields_match_predicate() {
        let toml = r#"
            [[rules]]
            id = "owners-may-delete"
            description = "A post's owner may delete it"
            action = "delete_post"
            require_same = [{ left = "/principal/id", right = "/params/post/owner_id" }]
            effect = "permit"

            [[rules]]
            id = "fallback"
            description = "Catch-all"
            action = "*"
            effect = "deny"
            deny_reason = "unauthorized"
        "#;

        let policy = RuleSetPolicy::from_toml_str(toml).unwrap();
        let owner = principal(json!({ "id": 1 }));
        let stranger = principal(json!({ "id": 2 }));
        let params: Params = [("post", json!({ "id": 100, "owner_id": 1 }))]
            .into_iter()
            .collect();

        assert!(policy.decide(&owner, &action("delete_post"), &params).unwrap().is_permit());
        assert!(policy.decide(&stranger, &action("delete_post"), &params).unwrap().is_deny());
    }

    /// A pointer that resolves to nothing never holds, so the rule falls
    /// through instead of matching on absent fields.
    #[test]
    fn test_missing_fields_never_match() {
        let toml = r#"
            [[rules]]
            id = "owners-may-delete"
            description = "A post's owner may delete it"
            action = "delete_post"
            require_same = [{ left = "/principal/id", right = "/params/post/owner_id" }]
            effect = "permit"

            [[rules]]
            id = "fallback"
            description = "Catch-all"
            action = "*"
            effect = "deny"
            deny_reason = "unauthorized"
        "#;

        let policy = RuleSetPolicy::from_toml_str(toml).unwrap();

        // No post in params: both an anonymous and a real principal fall
        // through to the catch-all.
        let decision = policy
            .decide(&principal(json!({ "id": 1 })), &action("delete_post"), &Params::new())
            .unwrap();
        assert!(decision.is_deny());

        let decision = policy
            .decide(&Principal::anonymous(), &action("delete_post"), &Params::new())
            .unwrap();
        assert!(decision.is_deny());
    }

    // ── 5. exhaustion is a contract violation ─────────────────────────────────

    /// A rule set with no matching rule must fail loudly, never silently deny.
    #[test]
    fn test_exhaustion_is_unmatched_action() {
        let toml = r#"
            [[rules]]
            id = "permit-read"
            description = "Anyone may read posts"
            action = "read_post"
            effect = "permit"
        "#;

        let policy = RuleSetPolicy::from_toml_str(toml).unwrap();
        let result = policy.decide(
            &principal(json!({ "id": 1 })),
            &action("delete_post"),
            &Params::new(),
        );

        match result {
            Err(WardenError::UnmatchedAction { action_id }) => {
                assert_eq!(action_id.as_str(), "delete_post");
            }
            other => panic!("expected UnmatchedAction, got {:?}", other),
        }
    }

    /// An empty rule set loads, but every evaluation is a violation.
    #[test]
    fn test_empty_rule_set_always_violates() {
        let policy = RuleSetPolicy::from_toml_str("rules = []").unwrap();
        let result = policy.decide(
            &Principal::anonymous(),
            &action("read_post"),
            &Params::new(),
        );

        assert!(matches!(result, Err(WardenError::UnmatchedAction { .. })));
    }

    // ── 6. TOML parse errors ──────────────────────────────────────────────────

    /// Malformed TOML must produce a `WardenError::ConfigError`.
    #[test]
    fn test_toml_parse_error() {
        let bad_toml = r#"
            this is not valid toml ][[[
        "#;

        let result = RuleSetPolicy::from_toml_str(bad_toml);

        match result {
            Err(WardenError::ConfigError { reason }) => {
                assert!(
                    reason.contains("failed to parse rule set TOML"),
                    "expected parse error message, got: {reason}"
                );
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    /// A rule with an unknown effect value fails schema deserialization.
    #[test]
    fn test_unknown_effect_is_config_error() {
        let toml = r#"
            [[rules]]
            id = "bad-effect"
            description = "Effect value outside the schema"
            action = "*"
            effect = "maybe"
        "#;

        assert!(matches!(
            RuleSetPolicy::from_toml_str(toml),
            Err(WardenError::ConfigError { .. })
        ));
    }
}
