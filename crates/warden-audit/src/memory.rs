//! In-memory decision trail.
//!
//! `InMemoryDecisionTrail` is the reference trail implementation. It keeps
//! all events in a `Vec` protected by a `Mutex`, making it safe to pass
//! across threads while the application records decisions.
//!
//! Use `export_log()` to obtain a sealed `TrailLog`, and `verify_integrity()`
//! at any time to confirm the chain has not been tampered with in memory.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use warden_contracts::{
    error::{WardenError, WardenResult},
    record::DecisionRecord,
};

use crate::{
    chain::{hash_event, verify_chain},
    event::{TrailEvent, TrailLog},
};

// ── Internal mutable state ────────────────────────────────────────────────────

/// The mutable interior of an `InMemoryDecisionTrail`.
///
/// Kept behind `Arc<Mutex<_>>` so that both the trail and any clones of the
/// `Arc` can safely observe or export the accumulated events.
pub(crate) struct TrailState {
    /// All events recorded so far, in append order.
    pub(crate) events: Vec<TrailEvent>,

    /// The next sequence number to assign (starts at 0).
    pub(crate) sequence: u64,

    /// The `this_hash` of the last recorded event, or `GENESIS_HASH` before
    /// any event has been recorded.
    pub(crate) last_hash: String,
}

// ── Public trail ──────────────────────────────────────────────────────────────

/// An in-memory, append-only decision trail backed by a SHA-256 hash chain.
///
/// # Thread safety
///
/// `record()` acquires a `Mutex` internally. Multiple threads may hold
/// clones of the `Arc<Mutex<TrailState>>` without additional
/// synchronization.
pub struct InMemoryDecisionTrail {
    trail_id: String,
    pub(crate) state: Arc<Mutex<TrailState>>,
}

impl InMemoryDecisionTrail {
    /// Create a new trail with a freshly generated id.
    ///
    /// The internal `last_hash` is initialized to `TrailEvent::GENESIS_HASH`
    /// so the first event's `prev_hash` is automatically correct.
    pub fn new() -> Self {
        let state = TrailState {
            events: Vec::new(),
            sequence: 0,
            last_hash: TrailEvent::GENESIS_HASH.to_string(),
        };
        Self {
            trail_id: Uuid::new_v4().to_string(),
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// This trail's id.
    pub fn trail_id(&self) -> &str {
        &self.trail_id
    }

    /// Append one decision record to the hash chain.
    ///
    /// Computes `this_hash` from (trail_id, sequence, prev_hash, record),
    /// wraps the record in a `TrailEvent`, appends it, then advances the
    /// sequence counter and `last_hash`.
    ///
    /// Returns `Err(TrailWriteFailed)` only if the internal mutex is
    /// poisoned, which cannot happen under normal operation.
    pub fn record(&self, record: &DecisionRecord) -> WardenResult<()> {
        let mut state = self.state.lock().map_err(|e| WardenError::TrailWriteFailed {
            reason: format!("trail state lock poisoned: {}", e),
        })?;

        let prev_hash = state.last_hash.clone();
        let sequence = state.sequence;

        let this_hash = hash_event(&self.trail_id, sequence, record, &prev_hash);

        let event = TrailEvent {
            sequence,
            trail_id: self.trail_id.clone(),
            record: record.clone(),
            prev_hash,
            this_hash: this_hash.clone(),
        };

        state.events.push(event);
        state.sequence += 1;
        state.last_hash = this_hash;

        Ok(())
    }

    /// Export a sealed `TrailLog` containing all events recorded so far.
    ///
    /// The `terminal_hash` is the `this_hash` of the last event, or an empty
    /// string when no events have been recorded.
    pub fn export_log(&self) -> TrailLog {
        let state = self.state.lock().expect("trail state lock poisoned");
        let terminal_hash = state
            .events
            .last()
            .map(|e| e.this_hash.clone())
            .unwrap_or_default();

        info!(
            trail_id = %self.trail_id,
            event_count = state.events.len(),
            terminal_hash = %terminal_hash,
            "decision trail sealed"
        );

        TrailLog {
            trail_id: self.trail_id.clone(),
            events: state.events.clone(),
            sealed_at: Utc::now(),
            terminal_hash,
        }
    }

    /// Verify that the in-memory chain has not been tampered with.
    ///
    /// Delegates to `verify_chain`, which checks both prev-hash linkage and
    /// hash correctness for every event.
    pub fn verify_integrity(&self) -> bool {
        let state = self.state.lock().expect("trail state lock poisoned");
        verify_chain(&state.events)
    }
}

impl Default for InMemoryDecisionTrail {
    fn default() -> Self {
        Self::new()
    }
}
