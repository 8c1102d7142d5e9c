//! # warden-contracts
//!
//! Shared types and contracts for the warden workspace.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions and error types.

pub mod action;
pub mod decision;
pub mod error;
pub mod outcome;
pub mod principal;
pub mod record;
