// src/ingest/sponsors.rs
use anyhow::{anyhow, Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Lower-cased company names historically associated with visa sponsorship.
pub type KnownSponsors = HashSet<String>;

/// Load the known-sponsor list. Supports plain text (one name per line),
/// a JSON array, or TOML with `sponsors = [...]`.
pub fn load_known_sponsors_from(path: &Path) -> Result<KnownSponsors> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading known sponsors from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    parse_sponsors(&content, ext.as_str())
}

/// Missing path or unreadable file degrades to an empty set.
pub fn load_known_sponsors(path: Option<&Path>) -> KnownSponsors {
    let Some(p) = path else {
        return KnownSponsors::new();
    };
    if !p.is_file() {
        tracing::warn!(path = %p.display(), "known sponsors file not found");
        return KnownSponsors::new();
    }
    match load_known_sponsors_from(p) {
        Ok(set) => {
            tracing::info!(count = set.len(), "known sponsors loaded");
            set
        }
        Err(e) => {
            tracing::warn!(error = ?e, "known sponsors unreadable");
            KnownSponsors::new()
        }
    }
}

fn parse_sponsors(s: &str, hint_ext: &str) -> Result<KnownSponsors> {
    match hint_ext {
        "json" => parse_json(s),
        "toml" => parse_toml(s),
        _ => {
            let trimmed = s.trim_start();
            if trimmed.starts_with('[') {
                if let Ok(v) = parse_json(s) {
                    return Ok(v);
                }
            }
            Ok(parse_lines(s))
        }
    }
}

fn parse_toml(s: &str) -> Result<KnownSponsors> {
    #[derive(serde::Deserialize)]
    struct TomlSponsors {
        sponsors: Vec<String>,
    }
    let v: TomlSponsors = toml::from_str(s).map_err(|e| anyhow!("sponsors toml: {e}"))?;
    Ok(clean_list(v.sponsors))
}

fn parse_json(s: &str) -> Result<KnownSponsors> {
    let v: Vec<String> = serde_json::from_str(s)?;
    Ok(clean_list(v))
}

fn parse_lines(s: &str) -> KnownSponsors {
    clean_list(s.lines().map(str::to_string))
}

fn clean_list<I: IntoIterator<Item = String>>(items: I) -> KnownSponsors {
    items
        .into_iter()
        .map(|it| it.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
