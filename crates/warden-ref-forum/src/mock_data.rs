//! Simulated forum data for the warden reference integration.
//!
//! All data in this module is hardcoded and fictional. No external systems
//! are contacted. This module acts as a stand-in for real user and content
//! stores in a production deployment.

use serde_json::{json, Value};

// ── Users (mock) ──────────────────────────────────────────────────────────────

/// Look up a forum user by handle.
///
/// Known handles:
/// - "alice"  → id 1, role "user"
/// - "bob"    → id 2, role "user"
/// - "morgan" → id 5, role "moderator"
/// - "ada"    → id 9, role "admin"
///
/// Any other handle returns `Value::Null`, the anonymous principal.
pub fn get_user(handle: &str) -> Value {
    match handle {
        "alice" => json!({ "id": 1, "handle": "alice", "role": "user" }),
        "bob" => json!({ "id": 2, "handle": "bob", "role": "user" }),
        "morgan" => json!({ "id": 5, "handle": "morgan", "role": "moderator" }),
        "ada" => json!({ "id": 9, "handle": "ada", "role": "admin" }),
        _ => Value::Null,
    }
}

// ── Posts (mock) ──────────────────────────────────────────────────────────────

/// Look up a forum post by id.
///
/// Known posts:
/// - 100 → owned by user 1 (alice)
/// - 200 → owned by user 2 (bob)
/// - 300 → owned by user 1 (alice), draft pending editorial review
///
/// Any other id returns `Value::Null`.
pub fn get_post(post_id: u64) -> Value {
    match post_id {
        100 => json!({
            "id": 100,
            "owner_id": 1,
            "title": "Borrow checker field notes",
            "status": "published"
        }),
        200 => json!({
            "id": 200,
            "owner_id": 2,
            "title": "Benchmarking async executors",
            "status": "published"
        }),
        300 => json!({
            "id": 300,
            "owner_id": 1,
            "title": "A gentle tour of lifetimes",
            "status": "draft"
        }),
        _ => Value::Null,
    }
}

// ── Threads (mock) ────────────────────────────────────────────────────────────

/// Look up a discussion thread by id.
///
/// Thread 42 exists and is open; any other id returns `Value::Null`.
pub fn get_thread(thread_id: u64) -> Value {
    match thread_id {
        42 => json!({
            "id": 42,
            "title": "Show and tell: February projects",
            "locked": false,
            "post_count": 17
        }),
        _ => Value::Null,
    }
}
