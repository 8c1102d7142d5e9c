//! Warden Forum Reference — Demo CLI
//!
//! Runs one or all of the three forum demo scenarios.  Each scenario uses
//! real warden components (policies, actions, rule sets, decision trail)
//! wired together with mock forum data.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- post-management
//!   cargo run -p demo -- editorial-pipeline
//!   cargo run -p demo -- moderation

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use warden_ref_forum::scenarios::{editorial_pipeline, moderation, post_management};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Warden — authorization decision layer forum demo.
///
/// Each subcommand runs one or all of the three forum scenarios,
/// demonstrating warden's policy dispatch, action pipeline, and decision
/// trail.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "Warden forum reference demo",
    long_about = "Runs warden forum demo scenarios showing policy dispatch,\n\
                  pre-authorized action pipelines, declarative rule sets, and\n\
                  decision trail integrity."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all three forum scenarios in sequence.
    RunAll,
    /// Scenario 1: Post Management (hand-written policy, three outcomes).
    PostManagement,
    /// Scenario 2: Editorial Pipeline (authorize early, run late).
    EditorialPipeline,
    /// Scenario 3: Moderation Rule Set (declarative TOML rules).
    Moderation,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = match cli.command {
        Command::RunAll => run_all(),
        Command::PostManagement => run_post_management(),
        Command::EditorialPipeline => run_editorial_pipeline(),
        Command::Moderation => run_moderation(),
    };

    match result {
        Ok(()) => {
            println!("All selected scenarios completed successfully.");
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

// ── Scenario dispatch ─────────────────────────────────────────────────────────

fn run_all() -> warden_contracts::error::WardenResult<()> {
    run_post_management()?;
    run_editorial_pipeline()?;
    run_moderation()?;
    Ok(())
}

fn run_post_management() -> warden_contracts::error::WardenResult<()> {
    post_management::run_scenario()
}

fn run_editorial_pipeline() -> warden_contracts::error::WardenResult<()> {
    editorial_pipeline::run_scenario()
}

fn run_moderation() -> warden_contracts::error::WardenResult<()> {
    moderation::run_scenario()
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("Warden — Authorization Decision Layer");
    println!("Forum Reference Demo");
    println!("=====================================");
    println!();
    println!("Warden decision pipeline per action:");
    println!("  [1] Action accumulates principal, action id, and params");
    println!("  [2] Policy decides (principal, action, params) → Permit / Deny(reason)");
    println!("  [3] Job closure invoked — ONLY on a Permit decision");
    println!("  [4] Denials surface as data (RunOutcome::Denied), never as panics");
    println!("  [5] Decisions recorded in a SHA-256 hash-chained trail");
    println!();
}
