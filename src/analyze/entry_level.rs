// src/analyze/entry_level.rs
//! Early-career confidence from title/description keywords.
//!
//! Case-insensitive substring containment, not word matching: "leadership"
//! contains "lead" and is vetoed like "Lead Engineer".

use crate::config::keywords::ResolvedFilters;

pub const TITLE_KEYWORD_SCORE: f64 = 0.9;
pub const DESCRIPTION_KEYWORD_SCORE: f64 = 0.8;
pub const TITLE_OF_INTEREST_SCORE: f64 = 0.6;
pub const NEUTRAL_SCORE: f64 = 0.4;

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|n| haystack.contains(n.as_str()))
}

/// Score in [0,1]. A seniority term in the title is a hard veto (0).
pub fn entry_level_score(title: &str, description: &str, filters: &ResolvedFilters) -> f64 {
    let t = title.to_lowercase();
    let d = description.to_lowercase();

    if contains_any(&t, &filters.excluded) {
        return 0.0;
    }

    let score = if contains_any(&t, &filters.entry_terms) {
        TITLE_KEYWORD_SCORE
    } else if contains_any(&d, &filters.entry_terms) {
        DESCRIPTION_KEYWORD_SCORE
    } else if contains_any(&t, &filters.titles_of_interest) {
        TITLE_OF_INTEREST_SCORE
    } else if !contains_any(&d, &filters.excluded) {
        NEUTRAL_SCORE
    } else {
        0.0
    };

    score.clamp(0.0, 1.0)
}
