//! Reference integration: a discussion-forum back office built on warden.
//!
//! Three scenarios, each exercising a distinct authorization pattern:
//!
//! 1. **Post Management** — a hand-written policy function produces Permit
//!    and Deny outcomes for admins, owners, and strangers; every decision
//!    lands in a hash-chained decision trail.
//! 2. **Editorial Pipeline** — the decision is made early with `authorize`
//!    and honored later by `run` without re-consulting the policy.
//! 3. **Moderation Rule Set** — declarative TOML rules evaluated first-match
//!    wins, shared across actions through an `Arc`.
//!
//! All data is hardcoded and fictional. No external API calls are made.

pub mod mock_data;
pub mod policies;
pub mod scenarios;
