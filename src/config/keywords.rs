// src/config/keywords.rs
//! Built-in keyword lists and their resolution against the loaded config.
//!
//! A configured list replaces the default only when it is non-empty. Every
//! entry is trimmed and lower-cased here so the scorers can do plain
//! substring checks on lower-cased text.

use super::{FiltersConfig, H1bConfig};

pub const DEFAULT_EXCLUDED_SENIORITY: &[&str] = &[
    "senior",
    "sr.",
    "staff",
    "principal",
    "lead",
    "manager",
    "director",
];

pub const DEFAULT_ENTRY_LEVEL_KEYWORDS: &[&str] = &[
    "new grad",
    "entry-level",
    "junior",
    "graduate",
    "early career",
    "university",
    "campus",
    "recent graduate",
    "0-2 years",
    "1+ years",
];

pub const DEFAULT_POSITIVE_SPONSOR_PHRASES: &[&str] = &[
    "h-1b",
    "h1b",
    "visa sponsorship",
    "sponsor work visa",
    "visa support",
];

pub const DEFAULT_NEGATIVE_SPONSOR_PHRASES: &[&str] = &[
    "no sponsorship",
    "cannot sponsor",
    "not sponsor",
    "without sponsorship",
    "must be authorized to work in the us without sponsorship",
];

/// Entry-level scorer inputs, resolved once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFilters {
    pub excluded: Vec<String>,
    pub entry_terms: Vec<String>,
    pub titles_of_interest: Vec<String>,
    pub require_us_location: bool,
}

impl ResolvedFilters {
    pub fn from_config(cfg: &FiltersConfig) -> Self {
        Self {
            excluded: resolve_list(&cfg.excluded_seniority, DEFAULT_EXCLUDED_SENIORITY),
            entry_terms: resolve_list(&cfg.entry_level_keywords, DEFAULT_ENTRY_LEVEL_KEYWORDS),
            // No defaults: an empty list simply never matches.
            titles_of_interest: clean(&cfg.titles_of_interest),
            require_us_location: cfg.require_us_location,
        }
    }
}

impl Default for ResolvedFilters {
    fn default() -> Self {
        Self::from_config(&FiltersConfig::default())
    }
}

/// Sponsorship scorer phrase lists, resolved once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct SponsorshipRules {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl SponsorshipRules {
    pub fn from_config(cfg: &H1bConfig) -> Self {
        Self {
            positive: resolve_list(&cfg.positive_keywords, DEFAULT_POSITIVE_SPONSOR_PHRASES),
            negative: resolve_list(&cfg.negative_keywords, DEFAULT_NEGATIVE_SPONSOR_PHRASES),
        }
    }
}

impl Default for SponsorshipRules {
    fn default() -> Self {
        Self::from_config(&H1bConfig::default())
    }
}

fn resolve_list(configured: &[String], defaults: &[&str]) -> Vec<String> {
    let cleaned = clean(configured);
    if cleaned.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        cleaned
    }
}

fn clean(items: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim().to_lowercase();
        if !t.is_empty() && !out.contains(&t) {
            out.push(t);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_lists_fall_back_to_defaults() {
        let f = ResolvedFilters::default();
        assert!(f.excluded.iter().any(|x| x == "senior"));
        assert!(f.entry_terms.iter().any(|x| x == "new grad"));
        assert!(f.titles_of_interest.is_empty());
        assert!(f.require_us_location);

        let r = SponsorshipRules::default();
        assert!(r.positive.iter().any(|x| x == "h1b"));
        assert!(r.negative.iter().any(|x| x == "no sponsorship"));
    }

    #[test]
    fn configured_lists_replace_defaults_and_are_lowercased() {
        let cfg = FiltersConfig {
            excluded_seniority: vec![" VP ".into(), "".into(), "vp".into()],
            titles_of_interest: vec!["Backend Engineer".into()],
            ..Default::default()
        };
        let f = ResolvedFilters::from_config(&cfg);
        assert_eq!(f.excluded, vec!["vp".to_string()]);
        assert_eq!(f.titles_of_interest, vec!["backend engineer".to_string()]);
        assert_eq!(f.entry_terms.len(), DEFAULT_ENTRY_LEVEL_KEYWORDS.len());
    }

    #[test]
    fn whitespace_only_list_counts_as_empty() {
        let cfg = H1bConfig {
            negative_keywords: vec!["   ".into()],
            ..Default::default()
        };
        let r = SponsorshipRules::from_config(&cfg);
        assert_eq!(r.negative.len(), DEFAULT_NEGATIVE_SPONSOR_PHRASES.len());
    }
}
