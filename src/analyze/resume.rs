// src/analyze/resume.rs
//! Resume skill profile and coverage-weighted matching.
//!
//! The profile is built once per run, either straight from the configured
//! skill map or by scanning extracted resume text for candidate skills.
//! Extraction problems never abort a run; they just shrink the profile.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use crate::config::ResumeConfig;

/// Scanned when `use_pdf` is on and no skills are configured.
pub const DEFAULT_SKILLS: &[(&str, f64)] = &[
    ("python", 1.0),
    ("java", 0.8),
    ("javascript", 0.7),
    ("sql", 1.0),
    ("aws", 0.8),
    ("docker", 0.7),
    ("react", 0.6),
    ("node", 0.6),
    ("data structures", 0.9),
    ("algorithms", 0.9),
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResumeProfile {
    /// lower-cased skill -> non-negative weight
    skills: BTreeMap<String, f64>,
    titles_of_interest: BTreeSet<String>,
}

impl ResumeProfile {
    /// Keys are lower-cased; negative or non-finite weights are dropped.
    pub fn new<I, S>(skills: I, titles_of_interest: &[String]) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let skills = skills
            .into_iter()
            .filter_map(|(k, w)| {
                let key = k.as_ref().trim().to_lowercase();
                (!key.is_empty() && w.is_finite() && w >= 0.0).then_some((key, w))
            })
            .collect();
        let titles_of_interest = titles_of_interest
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self {
            skills,
            titles_of_interest,
        }
    }

    pub fn skills(&self) -> &BTreeMap<String, f64> {
        &self.skills
    }

    pub fn titles_of_interest(&self) -> &BTreeSet<String> {
        &self.titles_of_interest
    }

    pub fn total_weight(&self) -> f64 {
        self.skills.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// Build the run's profile from the resume section of the config.
pub fn build_resume_profile(cfg: &ResumeConfig) -> ResumeProfile {
    if !cfg.use_pdf {
        return ResumeProfile::new(
            cfg.skills.iter().map(|(k, w)| (k.as_str(), *w)),
            &cfg.titles_of_interest,
        );
    }

    let text = cfg
        .resume_pdf_path
        .as_deref()
        .map(extract_resume_text)
        .unwrap_or_default()
        .to_lowercase();

    let candidates: Vec<(String, f64)> = if cfg.skills.is_empty() {
        DEFAULT_SKILLS
            .iter()
            .map(|(k, w)| (k.to_string(), *w))
            .collect()
    } else {
        cfg.skills
            .iter()
            .map(|(k, w)| (k.trim().to_lowercase(), *w))
            .collect()
    };

    let present = candidates
        .into_iter()
        .filter(|(skill, _)| !skill.is_empty() && text.contains(skill.as_str()));
    let profile = ResumeProfile::new(present, &cfg.titles_of_interest);
    tracing::info!(skills = profile.skills.len(), "resume profile built from document");
    profile
}

/// Plain text of a resume document. PDF goes through `pdf-extract`; `.txt`/`.md`
/// are read as-is. Any failure is logged and yields an empty string.
pub fn extract_resume_text(path: &Path) -> String {
    if !path.is_file() {
        tracing::warn!(path = %path.display(), "resume file not found");
        return String::new();
    }
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let result = match ext.as_str() {
        "txt" | "md" | "text" => fs::read_to_string(path).map_err(|e| e.to_string()),
        _ => {
            // pdf-extract panics on some malformed documents
            let p = path.to_path_buf();
            match std::panic::catch_unwind(move || pdf_extract::extract_text(&p)) {
                Ok(r) => r.map_err(|e| format!("{e:?}")),
                Err(_) => Err("pdf extractor panicked".to_string()),
            }
        }
    };

    match result {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "resume text extraction failed");
            String::new()
        }
    }
}

/// Fraction of total profile weight whose skills occur in `text`, in [0,1].
/// Repeated mentions count once.
pub fn match_score(text: &str, profile: &ResumeProfile) -> f64 {
    if profile.is_empty() {
        return 0.0;
    }
    let total = profile.total_weight();
    if total <= 0.0 {
        return 0.0;
    }

    let t = text.to_lowercase();
    let hit: f64 = profile
        .skills
        .iter()
        .filter(|(skill, _)| t.contains(skill.as_str()))
        .map(|(_, w)| *w)
        .sum();

    (hit / total).clamp(0.0, 1.0)
}
