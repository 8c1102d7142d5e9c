//! The decision type and its opaque denial payload.
//!
//! A policy evaluation produces exactly one of two outcomes: `Permit` or
//! `Deny` with a reason. There is no third state — a policy that cannot
//! produce a well-formed decision returns an error instead.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque payload attached to a denial.
///
/// The application chooses what goes in here — a symbolic code, a message,
/// or a structured document. The authorization layer never inspects or
/// transforms the value; it travels unchanged from the policy to whoever
/// reads the final outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reason(Value);

impl Reason {
    /// Wrap any JSON-representable value as a denial reason.
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    /// Borrow the underlying value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<&str> for Reason {
    fn from(code: &str) -> Self {
        Self(Value::String(code.to_string()))
    }
}

impl From<String> for Reason {
    fn from(code: String) -> Self {
        Self(Value::String(code))
    }
}

impl From<Value> for Reason {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl fmt::Display for Reason {
    /// Plain-text reasons render without quotes; anything else renders as
    /// compact JSON.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

/// The outcome of evaluating a policy for one attempted action.
///
/// A `Deny` is not an error — it is a normal value that flows back to the
/// caller as data. Only the enforcing wrapper converts it into an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Decision {
    /// The action is permitted.
    Permit,

    /// The action is denied.
    Deny {
        /// Application-supplied explanation, preserved unmodified.
        reason: Reason,
    },
}

impl Decision {
    /// A permit decision.
    pub fn permit() -> Self {
        Self::Permit
    }

    /// A denial carrying the given reason.
    pub fn deny(reason: impl Into<Reason>) -> Self {
        Self::Deny {
            reason: reason.into(),
        }
    }

    /// True when the decision permits the action.
    pub fn is_permit(&self) -> bool {
        matches!(self, Self::Permit)
    }

    /// True when the decision denies the action.
    pub fn is_deny(&self) -> bool {
        matches!(self, Self::Deny { .. })
    }

    /// The denial reason, if this decision is a denial.
    pub fn reason(&self) -> Option<&Reason> {
        match self {
            Self::Permit => None,
            Self::Deny { reason } => Some(reason),
        }
    }
}
