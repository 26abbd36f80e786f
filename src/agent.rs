// src/agent.rs
//! One complete run: config -> store -> profile -> fetch -> score -> persist -> report -> email.

use anyhow::{Context, Result};
use chrono::Utc;
use std::path::{Path, PathBuf};

use crate::analyze::build_resume_profile;
use crate::config::AgentConfig;
use crate::ingest::http::JsonFetcher;
use crate::ingest::sponsors::load_known_sponsors;
use crate::ingest::types::SourceProvider;
use crate::ingest::{self, providers};
use crate::notify::{deliver_report, DeliveryOutcome};
use crate::pipeline::{score_and_rank, PipelineStats, ScoringContext};
use crate::report::{render_html_report, write_report};
use crate::store::JobStore;

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report_path: PathBuf,
    pub stats: PipelineStats,
    pub failed_sources: usize,
    pub delivery: DeliveryOutcome,
}

/// Load the config and run with the providers it names.
pub async fn run(config_path: &Path) -> Result<RunOutcome> {
    let cfg = AgentConfig::load(config_path)?;
    let fetcher = JsonFetcher::from_config(&cfg.http)?;
    let providers = providers::from_config(&cfg.sources, &fetcher);
    run_with_providers(&cfg, &providers).await
}

/// Run against an explicit provider list (tests, custom sources).
pub async fn run_with_providers(
    cfg: &AgentConfig,
    providers: &[Box<dyn SourceProvider>],
) -> Result<RunOutcome> {
    let mut store = JobStore::open(&cfg.persistence.database_path)?;

    let profile = build_resume_profile(&cfg.resume);
    if profile.is_empty() {
        tracing::warn!("resume profile is empty; every resume match will be 0");
    }
    let known = load_known_sponsors(cfg.h1b.known_sponsors_file.as_deref());
    let ctx = ScoringContext::new(cfg, known, profile);

    let (raw, failed_sources) = ingest::run_once(providers).await;
    tracing::info!(
        raw = raw.len(),
        providers = providers.len(),
        failed = failed_sources,
        "fetched raw postings"
    );

    let (scored, stats) = score_and_rank(raw, &ctx);
    tracing::info!(
        kept = stats.kept,
        non_us = stats.non_us,
        not_entry_level = stats.not_entry_level,
        below_min_match = stats.below_min_match,
        duplicates = stats.duplicates,
        "scored and filtered"
    );

    store
        .upsert_all(&scored)
        .context("persisting scored postings")?;

    let html = render_html_report(&scored, cfg.report.top_n, Utc::now());
    write_report(&cfg.report.output_path, &html)?;

    let delivery = deliver_report(&cfg.email, &html).await;
    if delivery.is_sent() {
        tracing::info!("email sent successfully");
    } else {
        tracing::info!(path = %cfg.report.output_path.display(), "report written");
    }

    Ok(RunOutcome {
        report_path: cfg.report.output_path.clone(),
        stats,
        failed_sources,
        delivery,
    })
}
