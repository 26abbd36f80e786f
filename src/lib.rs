// src/lib.rs
// Public library surface for the CLI and integration tests.

pub mod agent;
pub mod analyze;
pub mod config;
pub mod ingest;
pub mod notify;
pub mod pipeline;
pub mod report;
pub mod store;

// ---- Re-exports for stable public API ----
pub use crate::agent::{run, run_with_providers, RunOutcome};
pub use crate::config::AgentConfig;
pub use crate::ingest::types::{RawPosting, SourceProvider};
pub use crate::pipeline::{ScoredPosting, ScoringContext};
