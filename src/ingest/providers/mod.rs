// src/ingest/providers/mod.rs
pub mod amazon;
pub mod greenhouse;
pub mod lever;

use serde_json::Value;

use crate::config::SourcesConfig;
use crate::ingest::http::JsonFetcher;
use crate::ingest::types::SourceProvider;

/// Build one provider per configured board slug/query, in config order.
pub fn from_config(sources: &SourcesConfig, fetcher: &JsonFetcher) -> Vec<Box<dyn SourceProvider>> {
    let mut out: Vec<Box<dyn SourceProvider>> = Vec::new();
    for slug in &sources.greenhouse {
        out.push(Box::new(greenhouse::GreenhouseProvider::new(
            slug,
            fetcher.clone(),
        )));
    }
    for slug in &sources.lever {
        out.push(Box::new(lever::LeverProvider::new(slug, fetcher.clone())));
    }
    for q in &sources.amazon {
        out.push(Box::new(amazon::AmazonProvider::new(
            q.clone(),
            fetcher.clone(),
        )));
    }
    out
}

/// "new-relic" -> "New-Relic": upper-case every letter that starts a word.
pub(crate) fn title_case(slug: &str) -> String {
    let mut out = String::with_capacity(slug.len());
    let mut at_word_start = true;
    for ch in slug.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

/// Pull the array at `key` out of a payload (or the payload itself if it is an array).
/// Anything else yields an empty slice.
pub(crate) fn items<'a>(payload: &'a Value, key: Option<&str>) -> &'a [Value] {
    let node = match key {
        Some(k) => payload.get(k),
        None => Some(payload),
    };
    node.and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
