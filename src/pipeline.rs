// src/pipeline.rs
//! Filter, score, identify, dedup and rank one run's postings.
//!
//! Per posting, in order:
//! 1) optional US-location gate
//! 2) entry-level score, dropped at <= 0
//! 3) sponsorship confidence + resume match over "title\ndescription"
//! 4) dropped if resume match < configured minimum
//! 5) identity = sha256(canonical url), first occurrence wins
//! 6) final weighted score
//!
//! Output is sorted by final score descending; the sort is stable so ties keep input order.

use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use serde::Serialize;
use std::collections::HashSet;

use crate::analyze::{
    entry_level_score, final_score, is_us_location, match_score, sponsorship_confidence,
    ResumeProfile, ScoreInputs,
};
use crate::config::keywords::{ResolvedFilters, SponsorshipRules};
use crate::config::AgentConfig;
use crate::ingest::sponsors::KnownSponsors;
use crate::ingest::types::RawPosting;

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("pipeline_kept_total", "Postings that survived scoring.");
        describe_counter!(
            "pipeline_dropped_total",
            "Postings dropped, labelled by reason."
        );
    });
}

/// A posting with its identity and scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredPosting {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub url: String,
    pub source: String,
    pub description: String,
    pub date_posted: Option<String>,
    pub entry_level_score: f64,
    pub h1b_confidence: f64,
    pub resume_match: f64,
    pub final_score: f64,
}

/// Everything the scorers need, resolved once per run and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ScoringContext {
    pub filters: ResolvedFilters,
    pub sponsorship: SponsorshipRules,
    pub known_sponsors: KnownSponsors,
    pub profile: ResumeProfile,
    pub min_match_score: f64,
}

impl ScoringContext {
    pub fn new(cfg: &AgentConfig, known_sponsors: KnownSponsors, profile: ResumeProfile) -> Self {
        Self {
            filters: ResolvedFilters::from_config(&cfg.filters),
            sponsorship: SponsorshipRules::from_config(&cfg.h1b),
            known_sponsors,
            profile,
            min_match_score: cfg.resume.min_match_score,
        }
    }
}

/// Counts of what happened to the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub input: usize,
    pub non_us: usize,
    pub not_entry_level: usize,
    pub below_min_match: usize,
    pub duplicates: usize,
    pub kept: usize,
}

/// Canonical form of a posting URL used for identity: surrounding whitespace removed.
pub fn canonical_url(url: &str) -> &str {
    url.trim()
}

/// Stable identity: lowercase hex sha256 of the canonical URL.
pub fn posting_id(url: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(canonical_url(url).as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(64);
    for b in digest.iter() {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// Score a single posting. `None` when a gate drops it; the reason is
/// recorded in `stats`.
fn score_one(
    raw: RawPosting,
    ctx: &ScoringContext,
    stats: &mut PipelineStats,
) -> Option<ScoredPosting> {
    let title = raw.title.trim().to_string();
    let company = raw.company.trim().to_string();
    let location = raw.location.trim().to_string();
    let description = raw.description.trim().to_string();

    if ctx.filters.require_us_location && !is_us_location(&location) {
        stats.non_us += 1;
        return None;
    }

    let entry = entry_level_score(&title, &description, &ctx.filters);
    if entry <= 0.0 {
        stats.not_entry_level += 1;
        return None;
    }

    let combined = format!("{title}\n{description}");
    let h1b = sponsorship_confidence(&company, &combined, &ctx.known_sponsors, &ctx.sponsorship);
    let resume = match_score(&combined, &ctx.profile);

    if resume < ctx.min_match_score {
        stats.below_min_match += 1;
        return None;
    }

    let inputs = ScoreInputs::new(resume, h1b, entry);
    Some(ScoredPosting {
        id: posting_id(&raw.url),
        url: canonical_url(&raw.url).to_string(),
        title,
        company,
        location,
        source: raw.source.trim().to_string(),
        description,
        date_posted: raw.date_posted,
        entry_level_score: inputs.entry_level,
        h1b_confidence: inputs.sponsorship,
        resume_match: inputs.resume_match,
        final_score: final_score(&inputs),
    })
}

/// Run every posting through the gates and scorers; returns ranked survivors.
pub fn score_and_rank(
    raw: Vec<RawPosting>,
    ctx: &ScoringContext,
) -> (Vec<ScoredPosting>, PipelineStats) {
    ensure_metrics_described();

    let mut stats = PipelineStats {
        input: raw.len(),
        ..Default::default()
    };
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(raw.len());

    for rp in raw {
        let Some(scored) = score_one(rp, ctx, &mut stats) else {
            continue;
        };
        if !seen.insert(scored.id.clone()) {
            stats.duplicates += 1;
            continue;
        }
        out.push(scored);
    }

    rank(&mut out);
    stats.kept = out.len();

    counter!("pipeline_kept_total").increment(stats.kept as u64);
    counter!("pipeline_dropped_total", "reason" => "non_us").increment(stats.non_us as u64);
    counter!("pipeline_dropped_total", "reason" => "not_entry_level")
        .increment(stats.not_entry_level as u64);
    counter!("pipeline_dropped_total", "reason" => "below_min_match")
        .increment(stats.below_min_match as u64);
    counter!("pipeline_dropped_total", "reason" => "duplicate").increment(stats.duplicates as u64);

    (out, stats)
}

/// Sort by final score, highest first. Stable: equal scores keep their order.
pub fn rank(postings: &mut [ScoredPosting]) {
    postings.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
}
