//! # warden-audit
//!
//! Immutable, append-only, SHA-256 hash-chained decision trail for the
//! warden authorization layer.
//!
//! ## Overview
//!
//! Every authorization decision the application records is wrapped in a
//! `TrailEvent` that links to the previous event via its SHA-256 hash.
//! Tampering with any event — even a single byte — breaks the chain and is
//! detected by `verify_chain`. The trail is an application-side collaborator:
//! record decisions after `authorize`/`run`; the action pipeline itself never
//! touches it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use warden_audit::InMemoryDecisionTrail;
//!
//! let trail = InMemoryDecisionTrail::new();
//! trail.record(&decision_record)?;
//!
//! assert!(trail.verify_integrity());
//! let log = trail.export_log();
//! ```

pub mod chain;
pub mod event;
pub mod memory;

pub use chain::{hash_event, verify_chain};
pub use event::{TrailEvent, TrailLog};
pub use memory::InMemoryDecisionTrail;

// ── Tests ─────────────────────────────────────────────────────────────────────
