//! The terminal outcome of running a guarded job.
//!
//! `RunOutcome` is what `run` returns to the caller when the pipeline itself
//! succeeded. A denial is a normal variant here, not an error: the job was
//! simply never invoked.

use crate::decision::Reason;

/// What happened when an action's job was run under authorization.
///
/// Callers pattern-match on this to decide what to do next:
/// - `Completed` → the policy permitted the action and the job ran to
///   completion; `output` is whatever the job returned
/// - `Denied` → the policy denied the action; the job was never invoked
#[derive(Debug)]
pub enum RunOutcome<R> {
    /// The action was permitted and the job executed exactly once.
    Completed {
        /// The job's return value.
        output: R,
    },

    /// The action was denied. The job was never invoked.
    Denied {
        /// The policy's denial reason, preserved unmodified.
        reason: Reason,
    },
}
