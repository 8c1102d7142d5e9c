//! The acting entity being authorized.
//!
//! Principals are opaque to this layer. A principal is whatever document the
//! application hands over — a user record, a service identity, a token claim
//! set. Policies read fields out of it; the layer itself never does.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The acting entity, carried as an opaque JSON document.
///
/// `Principal::anonymous()` (the default) represents "no principal set yet" —
/// useful for actions built before authentication resolves, and for policies
/// that deny anonymous access explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Principal(Value);

impl Principal {
    /// Wrap any JSON-representable value as the principal.
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    /// The null principal — no acting entity has been attached.
    pub fn anonymous() -> Self {
        Self(Value::Null)
    }

    /// True when no principal has been attached.
    pub fn is_anonymous(&self) -> bool {
        self.0.is_null()
    }

    /// Look up a field by JSON pointer, e.g. `"/id"` or `"/org/role"`.
    pub fn get(&self, pointer: &str) -> Option<&Value> {
        self.0.pointer(pointer)
    }

    /// Borrow the underlying document.
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl Default for Principal {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl From<Value> for Principal {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
