//! Rule types and configuration schema.
//!
//! A `RuleSetConfig` is deserialized from TOML and holds an ordered list of
//! `Rule`s. Rules are evaluated in declaration order and the first matching
//! rule wins. Exhausting the list without a match is a contract violation,
//! not an implicit denial — rule sets must end with a catch-all.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The decision a rule produces when it matches an attempted action.
///
/// Expressed as a plain string in TOML (kebab-case) for human readability.
///
/// Example in TOML:
/// ```toml
/// effect = "permit"
/// effect = "deny"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleEffect {
    Permit,
    Deny,
}

/// A predicate requiring a field to equal a fixed value.
///
/// `path` is a JSON pointer into the evaluation document
/// `{ "principal": …, "params": … }`, e.g. `"/principal/role"`.
/// A path that resolves to nothing never holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldIs {
    /// JSON pointer into the evaluation document.
    pub path: String,
    /// The value the field must equal exactly.
    pub equals: Value,
}

impl FieldIs {
    /// True when `path` resolves in `doc` and equals the expected value.
    pub fn holds(&self, doc: &Value) -> bool {
        doc.pointer(&self.path) == Some(&self.equals)
    }
}

/// A predicate requiring two fields to resolve to equal values.
///
/// Typical use: ownership checks such as
/// `left = "/principal/id"`, `right = "/params/post/owner_id"`.
/// If either pointer resolves to nothing, the predicate never holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldsMatch {
    /// JSON pointer to the first field.
    pub left: String,
    /// JSON pointer to the second field.
    pub right: String,
}

impl FieldsMatch {
    /// True when both pointers resolve in `doc` to equal values.
    pub fn holds(&self, doc: &Value) -> bool {
        match (doc.pointer(&self.left), doc.pointer(&self.right)) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        }
    }
}

/// A single rule loaded from TOML.
///
/// A rule matches when its `action` pattern matches the attempted action id
/// AND every predicate in `require` and `require_same` holds against the
/// evaluation document. Rules are tested in the order they appear in the
/// rule file; the first match wins and later rules are not evaluated.
///
/// The `action` field supports the special wildcard value `"*"`, which
/// matches any action id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    /// Stable identifier used in logs and fallback deny reasons.
    pub id: String,

    /// Human-readable explanation of what this rule controls.
    pub description: String,

    /// The action pattern to match against the attempted action id.
    /// Use `"*"` to match any action.
    pub action: String,

    /// Field-equality predicates. All must hold for the rule to match.
    #[serde(default)]
    pub require: Vec<FieldIs>,

    /// Field-match predicates. All must hold for the rule to match.
    #[serde(default)]
    pub require_same: Vec<FieldsMatch>,

    /// The decision this rule produces when it matches.
    pub effect: RuleEffect,

    /// Denial payload when `effect = "deny"`. Falls back to a message naming
    /// the rule id when absent.
    pub deny_reason: Option<String>,
}

impl Rule {
    /// True when this rule's action pattern matches `action_id`.
    pub fn matches_action(&self, action_id: &str) -> bool {
        self.action == "*" || self.action == action_id
    }

    /// True when every predicate holds against the evaluation document.
    pub fn predicates_hold(&self, doc: &Value) -> bool {
        self.require.iter().all(|p| p.holds(doc))
            && self.require_same.iter().all(|p| p.holds(doc))
    }

    /// True when this rule matches every possible evaluation: wildcard
    /// action and no predicates.
    pub fn is_catch_all(&self) -> bool {
        self.action == "*" && self.require.is_empty() && self.require_same.is_empty()
    }
}

/// The top-level structure deserialized from a TOML rule file.
///
/// Rules are evaluated in the order they appear in the `rules` array.
///
/// Example:
/// ```toml
/// [[rules]]
/// id = "admins-may-do-anything"
/// description = "Administrators are not restricted"
/// action = "*"
/// require = [{ path = "/principal/role", equals = "admin" }]
/// effect = "permit"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSetConfig {
    /// Ordered list of rules. First match wins.
    pub rules: Vec<Rule>,
}
