// src/analyze/sponsorship.rs
//! Visa-sponsorship confidence from phrase polarity and the known-sponsor list.

use std::collections::HashSet;

use crate::config::keywords::SponsorshipRules;

pub const POSITIVE_PHRASE_SCORE: f64 = 1.0;
pub const KNOWN_SPONSOR_SCORE: f64 = 0.7;
pub const BASELINE_SCORE: f64 = 0.2;

/// Trim + lowercase; the key used against the known-sponsor set.
pub fn clean_company_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Score in [0,1]. Any negative phrase in `text` forces 0.
pub fn sponsorship_confidence(
    company: &str,
    text: &str,
    known_sponsors: &HashSet<String>,
    rules: &SponsorshipRules,
) -> f64 {
    let s = text.to_lowercase();

    if rules.negative.iter().any(|p| s.contains(p.as_str())) {
        return 0.0;
    }

    let score = if rules.positive.iter().any(|p| s.contains(p.as_str())) {
        POSITIVE_PHRASE_SCORE
    } else if known_sponsors.contains(&clean_company_name(company)) {
        KNOWN_SPONSOR_SCORE
    } else {
        BASELINE_SCORE
    };

    score.clamp(0.0, 1.0)
}
