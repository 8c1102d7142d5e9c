//! The decision protocol: the `Policy` trait and its invocation variants.
//!
//! A policy is any decision function over (principal, action id, params).
//! `decide` is the raw primitive; `enforce` and `allows` are derived from it
//! mechanically as provided methods. Implementations are **trusted** and must
//! be deterministic — avoid I/O in hot-path implementations.

use warden_contracts::{
    action::{ActionId, Params},
    decision::Decision,
    error::{WardenError, WardenResult},
    principal::Principal,
};

/// A decision function over one attempted action.
///
/// The `Err` channel carries contract violations only. A denial is the
/// `Ok(Deny)` value and flows back to the caller as data — only `enforce`
/// converts it into an error.
pub trait Policy: Send + Sync {
    /// Produce the decision for the given principal, action, and context.
    ///
    /// Implementations must return a well-formed `Decision`, or `Err` when
    /// none can be produced. An internal failure must never be translated
    /// into a silent `Permit` or `Deny`.
    fn decide(
        &self,
        principal: &Principal,
        action_id: &ActionId,
        params: &Params,
    ) -> WardenResult<Decision>;

    /// Invoke `decide` and convert a denial into an error.
    ///
    /// `Permit` → `Ok(())`. `Deny { reason }` →
    /// `Err(WardenError::DecisionDenied)` with the reason unchanged. Use this
    /// at call sites where a denial must abort the surrounding operation.
    fn enforce(
        &self,
        principal: &Principal,
        action_id: &ActionId,
        params: &Params,
    ) -> WardenResult<()> {
        match self.decide(principal, action_id, params)? {
            Decision::Permit => Ok(()),
            Decision::Deny { reason } => Err(WardenError::DecisionDenied { reason }),
        }
    }

    /// Invoke `decide` and collapse the decision to a boolean.
    ///
    /// The denial reason is discarded. Contract violations still propagate
    /// as `Err` — they are never collapsed to `false`.
    fn allows(
        &self,
        principal: &Principal,
        action_id: &ActionId,
        params: &Params,
    ) -> WardenResult<bool> {
        Ok(self.decide(principal, action_id, params)?.is_permit())
    }
}

/// Any matching closure or free function is a policy, with zero ceremony.
impl<F> Policy for F
where
    F: Fn(&Principal, &ActionId, &Params) -> WardenResult<Decision> + Send + Sync,
{
    fn decide(
        &self,
        principal: &Principal,
        action_id: &ActionId,
        params: &Params,
    ) -> WardenResult<Decision> {
        self(principal, action_id, params)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
