//! The composable action pipeline: accumulate context, then decide and run.
//!
//! An `Action` binds a policy to one attempted operation. Builder calls
//! accumulate the principal, action id, params, and options as pure
//! functional updates; the terminal operations `authorize` and `run` hand the
//! accumulated context to the policy exactly once.
//!
//! The security invariant is absolute: the job passed to `run` is NEVER
//! invoked unless the bound policy returned `Permit` for this action. This is
//! enforced structurally — the call site for the job is only reachable from
//! the `Permit` arm.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use warden_contracts::{
    action::{ActionId, Params},
    decision::Decision,
    error::{WardenError, WardenResult},
    outcome::RunOutcome,
    principal::Principal,
};

use crate::policy::Policy;

/// Where an action stands in its authorization lifecycle.
///
/// There is no transition back to `Unchecked`. A later `authorize` replaces
/// the stored decision with a fresh one.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthorizationStatus {
    /// No decision has been made for this action yet.
    Unchecked,
    /// The bound policy was consulted and its decision is attached.
    Checked(Decision),
}

/// One attempted operation, accumulated step by step and decided at most
/// once per `authorize`.
///
/// The policy is bound at construction and cannot be absent. Every builder
/// method consumes `self` and returns the updated action; nothing is shared
/// or mutated in place.
#[derive(Clone)]
pub struct Action {
    policy: Arc<dyn Policy>,
    principal: Principal,
    action_id: Option<ActionId>,
    params: Params,
    options: Params,
    status: AuthorizationStatus,
}

impl Action {
    /// Bind a policy and start with everything else at defaults: anonymous
    /// principal, no action id, empty params and options, `Unchecked`.
    pub fn new(policy: impl Policy + 'static) -> Self {
        Self::from_arc(Arc::new(policy))
    }

    /// Bind an already-shared policy.
    pub fn from_arc(policy: Arc<dyn Policy>) -> Self {
        Self {
            policy,
            principal: Principal::default(),
            action_id: None,
            params: Params::new(),
            options: Params::new(),
            status: AuthorizationStatus::Unchecked,
        }
    }

    // ── Builder operations ───────────────────────────────────────────────────

    /// Attach the acting entity.
    pub fn with_principal(mut self, principal: impl Into<Principal>) -> Self {
        self.principal = principal.into();
        self
    }

    /// Set the action id. The last call before a terminal operation wins.
    pub fn with_action_id(mut self, action_id: impl Into<ActionId>) -> Self {
        self.action_id = Some(action_id.into());
        self
    }

    /// Merge a partial params map. Keys given here override existing keys.
    pub fn with_params(mut self, partial: Params) -> Self {
        self.params.merge(partial);
        self
    }

    /// Set a single params entry.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key, value);
        self
    }

    /// Merge a partial options map. Options are an open extension point; the
    /// pipeline itself reads none of them.
    pub fn with_options(mut self, partial: Params) -> Self {
        self.options.merge(partial);
        self
    }

    /// Set a single options entry.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key, value);
        self
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    /// The acting entity.
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    /// The action id, if one has been set.
    pub fn action_id(&self) -> Option<&ActionId> {
        self.action_id.as_ref()
    }

    /// The accumulated contextual parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The accumulated options.
    pub fn options(&self) -> &Params {
        &self.options
    }

    /// The authorization lifecycle state.
    pub fn status(&self) -> &AuthorizationStatus {
        &self.status
    }

    /// Tri-state view of the lifecycle: `None` before any decision,
    /// `Some(true)` after a permit, `Some(false)` after a denial.
    pub fn authorized(&self) -> Option<bool> {
        match &self.status {
            AuthorizationStatus::Unchecked => None,
            AuthorizationStatus::Checked(decision) => Some(decision.is_permit()),
        }
    }

    /// The stored decision, if one has been made.
    pub fn decision(&self) -> Option<&Decision> {
        match &self.status {
            AuthorizationStatus::Unchecked => None,
            AuthorizationStatus::Checked(decision) => Some(decision),
        }
    }

    // ── Terminal operations ──────────────────────────────────────────────────

    /// Consult the bound policy and attach its decision.
    ///
    /// Requires an action id; errors with `WardenError::MissingActionId`
    /// otherwise. A denial is NOT an error — the returned action carries
    /// `Checked(Deny)` and the caller reads it through `decision()` or
    /// `authorized()`. Calling `authorize` again re-runs the policy and
    /// replaces the stored decision.
    ///
    /// # Errors
    ///
    /// Returns `Err` only for contract violations: a missing action id, or
    /// any error the policy itself raises.
    pub fn authorize(mut self) -> WardenResult<Self> {
        let decision = self.evaluate()?;
        self.status = AuthorizationStatus::Checked(decision);
        Ok(self)
    }

    /// Decide (unless already decided) and run `job` only on `Permit`.
    ///
    /// If the action is still `Unchecked`, the policy is consulted first. A
    /// pre-authorized action is honored as-is: the policy is NOT consulted
    /// again. Then:
    /// - `Permit` → `job` is invoked exactly once with the final action
    ///   (decision attached) and its return value comes back in
    ///   `RunOutcome::Completed`
    /// - `Deny` → `job` is never invoked; the reason comes back in
    ///   `RunOutcome::Denied` as a normal value
    ///
    /// Job faults are not this layer's concern: a panic or an error value
    /// inside `R` propagates to the caller unchanged.
    pub fn run<R, F>(self, job: F) -> WardenResult<RunOutcome<R>>
    where
        F: FnOnce(&Action) -> R,
    {
        let decision = match &self.status {
            AuthorizationStatus::Checked(decision) => decision.clone(),
            AuthorizationStatus::Unchecked => self.evaluate()?,
        };

        let action = Action {
            status: AuthorizationStatus::Checked(decision.clone()),
            ..self
        };

        match decision {
            // Only call site for the job. Unreachable on any denial.
            Decision::Permit => {
                let output = job(&action);
                Ok(RunOutcome::Completed { output })
            }
            Decision::Deny { reason } => Ok(RunOutcome::Denied { reason }),
        }
    }

    /// One policy consultation over the accumulated context.
    fn evaluate(&self) -> WardenResult<Decision> {
        let action_id = self.action_id.as_ref().ok_or(WardenError::MissingActionId)?;

        debug!(action_id = %action_id, "evaluating policy decision");

        let decision = self.policy.decide(&self.principal, action_id, &self.params)?;

        if let Decision::Deny { reason } = &decision {
            warn!(action_id = %action_id, reason = %reason, "policy denied action");
        }

        Ok(decision)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("principal", &self.principal)
            .field("action_id", &self.action_id)
            .field("params", &self.params)
            .field("options", &self.options)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use serde_json::json;
    use warden_contracts::{
        action::{ActionId, Params},
        decision::Decision,
        error::{WardenError, WardenResult},
        outcome::RunOutcome,
        principal::Principal,
    };

    use crate::policy::Policy;

    use super::{Action, AuthorizationStatus};

    // ── Mock helpers ─────────────────────────────────────────────────────────

    /// A policy that returns a pre-configured decision and counts its calls.
    struct CountingPolicy {
        decision: Decision,
        decide_count: Arc<Mutex<u32>>,
    }

    impl CountingPolicy {
        fn permitting() -> Self {
            Self {
                decision: Decision::permit(),
                decide_count: Arc::new(Mutex::new(0)),
            }
        }

        fn denying(reason: &str) -> Self {
            Self {
                decision: Decision::deny(reason),
                decide_count: Arc::new(Mutex::new(0)),
            }
        }
    }

    impl Policy for CountingPolicy {
        fn decide(
            &self,
            _principal: &Principal,
            _action_id: &ActionId,
            _params: &Params,
        ) -> WardenResult<Decision> {
            *self.decide_count.lock().unwrap() += 1;
            Ok(self.decision.clone())
        }
    }

    // ── Terminal operation: run ──────────────────────────────────────────────

    /// Core security test: a denial must prevent the job from being invoked
    /// under any circumstances.
    #[test]
    fn test_run_deny_never_invokes_job() {
        let policy = CountingPolicy::denying("unauthorized");
        let job_count = Arc::new(Mutex::new(0u32));
        let job_count_handle = job_count.clone();

        let outcome = Action::new(policy)
            .with_principal(json!({ "id": 2 }))
            .with_action_id("delete_post")
            .run(|_| {
                *job_count_handle.lock().unwrap() += 1;
            })
            .unwrap();

        assert_eq!(*job_count.lock().unwrap(), 0, "job must not run on Deny");

        match outcome {
            RunOutcome::Denied { reason } => assert_eq!(reason.to_string(), "unauthorized"),
            other => panic!("expected Denied, got {:?}", other),
        }
    }

    /// A permit runs the job exactly once, with the decision attached to the
    /// action the job receives.
    #[test]
    fn test_run_permit_invokes_job_exactly_once() {
        let policy = CountingPolicy::permitting();
        let job_count = Arc::new(Mutex::new(0u32));
        let job_count_handle = job_count.clone();

        let outcome = Action::new(policy)
            .with_principal(json!({ "id": 9, "role": "admin" }))
            .with_action_id("ban_user")
            .with_param("target_id", 4)
            .run(|action| {
                *job_count_handle.lock().unwrap() += 1;
                assert_eq!(action.authorized(), Some(true));
                assert_eq!(action.params().get("target_id"), Some(&json!(4)));
                "banned"
            })
            .unwrap();

        assert_eq!(*job_count.lock().unwrap(), 1);

        match outcome {
            RunOutcome::Completed { output } => assert_eq!(output, "banned"),
            other => panic!("expected Completed, got {:?}", other),
        }
    }

    /// A pre-authorized action is honored as-is: run must not consult the
    /// policy a second time.
    #[test]
    fn test_preauthorized_run_does_not_redecide() {
        let policy = CountingPolicy::permitting();
        let decide_count = policy.decide_count.clone();

        let action = Action::new(policy)
            .with_action_id("export_report")
            .authorize()
            .unwrap();
        assert_eq!(*decide_count.lock().unwrap(), 1);
        assert_eq!(action.authorized(), Some(true));

        let outcome = action.run(|_| "exported").unwrap();

        assert_eq!(*decide_count.lock().unwrap(), 1, "run must not re-decide");
        assert!(matches!(outcome, RunOutcome::Completed { output: "exported" }));
    }

    /// A pre-authorized denial is equally final: the job never runs and the
    /// stored reason comes back.
    #[test]
    fn test_preauthorized_denial_is_honored() {
        let policy = CountingPolicy::denying("quota_exceeded");
        let decide_count = policy.decide_count.clone();

        let action = Action::new(policy)
            .with_action_id("export_report")
            .authorize()
            .unwrap();
        assert_eq!(action.authorized(), Some(false));

        let outcome = action.run(|_| panic!("job must not run")).unwrap();

        assert_eq!(*decide_count.lock().unwrap(), 1);
        match outcome {
            RunOutcome::Denied { reason } => assert_eq!(reason.to_string(), "quota_exceeded"),
            other => panic!("expected Denied, got {:?}", other),
        }
    }

    // ── Terminal operation: authorize ────────────────────────────────────────

    /// A denial from authorize is data, not an error.
    #[test]
    fn test_authorize_records_denial_as_data() {
        let action = Action::new(CountingPolicy::denying("unauthorized"))
            .with_action_id("delete_post")
            .authorize()
            .unwrap();

        assert_eq!(action.authorized(), Some(false));
        assert_eq!(
            action.decision().and_then(|d| d.reason()).map(|r| r.to_string()),
            Some("unauthorized".to_string())
        );
    }

    /// Re-authorizing replaces the stored decision with a fresh one.
    #[test]
    fn test_reauthorize_overwrites_stored_decision() {
        // Decision depends on params, so the second authorize flips it.
        let flag_gated = |_: &Principal, _: &ActionId, params: &Params| {
            if params.get("approved") == Some(&json!(true)) {
                Ok(Decision::permit())
            } else {
                Ok(Decision::deny("pending_approval"))
            }
        };

        let action = Action::new(flag_gated)
            .with_action_id("publish_post")
            .authorize()
            .unwrap();
        assert_eq!(action.authorized(), Some(false));

        let action = action.with_param("approved", true).authorize().unwrap();
        assert_eq!(action.authorized(), Some(true));
    }

    /// Missing action id is a contract violation, regardless of what else
    /// has been accumulated.
    #[test]
    fn test_missing_action_id_fails_loudly() {
        let authorize_result = Action::new(CountingPolicy::permitting())
            .with_principal(json!({ "id": 1 }))
            .with_param("post_id", 100)
            .authorize();
        assert!(matches!(authorize_result, Err(WardenError::MissingActionId)));

        let run_result = Action::new(CountingPolicy::permitting()).run(|_| ());
        assert!(matches!(run_result, Err(WardenError::MissingActionId)));
    }

    /// A policy-level contract violation propagates out of run unchanged,
    /// and the job never runs.
    #[test]
    fn test_policy_error_propagates_through_run() {
        let broken = |_: &Principal, _: &ActionId, _: &Params| -> WardenResult<Decision> {
            Err(WardenError::ConfigError { reason: "rule file unreadable".to_string() })
        };

        let result = Action::new(broken)
            .with_action_id("delete_post")
            .run(|_| panic!("job must not run"));

        assert!(matches!(result, Err(WardenError::ConfigError { .. })));
    }

    // ── Builder semantics ────────────────────────────────────────────────────

    /// Params merge is last-writer-wins per key.
    #[test]
    fn test_params_merge_later_keys_win() {
        let base: Params = [("post_id", json!(100)), ("mode", json!("soft"))]
            .into_iter()
            .collect();

        let action = Action::new(CountingPolicy::permitting())
            .with_params(base)
            .with_param("mode", "hard")
            .with_action_id("delete_post");

        assert_eq!(action.params().get("post_id"), Some(&json!(100)));
        assert_eq!(action.params().get("mode"), Some(&json!("hard")));
    }

    /// Options accumulate separately from params and are never read by the
    /// pipeline itself.
    #[test]
    fn test_options_accumulate_separately() {
        let action = Action::new(CountingPolicy::permitting())
            .with_param("post_id", 100)
            .with_option("trace", true);

        assert_eq!(action.params().get("trace"), None);
        assert_eq!(action.options().get("trace"), Some(&json!(true)));
        assert_eq!(action.options().get("post_id"), None);
    }

    /// Builder calls after authorize do not reset the stored decision.
    #[test]
    fn test_builders_do_not_reset_status() {
        let action = Action::new(CountingPolicy::permitting())
            .with_action_id("edit_post")
            .authorize()
            .unwrap()
            .with_param("late", true)
            .with_option("trace", true);

        assert_eq!(action.authorized(), Some(true));
        assert!(matches!(action.status(), AuthorizationStatus::Checked(_)));
    }

    /// The last action id set before the terminal operation is the one the
    /// policy sees.
    #[test]
    fn test_last_action_id_wins() {
        let seen = Arc::new(Mutex::new(Vec::<String>::new()));
        let seen_handle = seen.clone();
        let recording = move |_: &Principal, action_id: &ActionId, _: &Params| {
            seen_handle.lock().unwrap().push(action_id.as_str().to_string());
            Ok(Decision::permit())
        };

        Action::new(recording)
            .with_action_id("edit_post")
            .with_action_id("delete_post")
            .authorize()
            .unwrap();

        assert_eq!(seen.lock().unwrap().as_slice(), ["delete_post".to_string()]);
    }

    /// A fresh Action starts anonymous, empty, and unchecked.
    #[test]
    fn test_new_action_defaults() {
        let action = Action::new(CountingPolicy::permitting());

        assert!(action.principal().is_anonymous());
        assert!(action.action_id().is_none());
        assert!(action.params().is_empty());
        assert!(action.options().is_empty());
        assert_eq!(action.authorized(), None);
        assert!(action.decision().is_none());
    }
}
