//! Forum reference scenarios.
//!
//! Each scenario is a self-contained module that wires up real warden
//! components (policies, actions, rule sets, decision trail) with mock forum
//! data and demonstrates a distinct authorization pattern.

pub mod editorial_pipeline;
pub mod moderation;
pub mod post_management;
