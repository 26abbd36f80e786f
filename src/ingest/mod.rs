// src/ingest/mod.rs
pub mod dates;
pub mod http;
pub mod providers;
pub mod sponsors;
pub mod types;

use crate::ingest::types::{RawPosting, SourceProvider};
use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "ingest_postings_total",
            "Postings returned by board adapters."
        );
        describe_counter!(
            "ingest_provider_errors_total",
            "Adapter fetch/parse errors."
        );
    });
}

/// Turn an HTML fragment into plain text: decode entities, strip tags, collapse whitespace.
///
/// Boards often ship entity-escaped markup (`&lt;p&gt;`), so entities are
/// decoded on both sides of the tag strip.
pub fn normalize_text(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }

    // 1) HTML entity decode (turns escaped markup into real tags)
    let mut out = html_escape::decode_html_entities(s).to_string();

    // 2) Strip tags; a space keeps adjacent block elements apart
    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[a-z!][^>]*>").unwrap());
    out = re_tags.replace_all(&out, " ").to_string();

    // 3) Entities that were double-escaped in the source
    out = html_escape::decode_html_entities(&out).to_string();

    // 4) Normalize “ ” ‘ ’ « » to ASCII quotes
    out = out
        .replace(['\u{201C}', '\u{201D}', '\u{00AB}', '\u{00BB}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'");

    // 5) Collapse whitespace (includes NBSP)
    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").to_string();

    out.trim().to_string()
}

/// Fetch from every provider in order. A failing provider is logged and skipped.
/// Returns (postings, failed_provider_count).
pub async fn run_once(providers: &[Box<dyn SourceProvider>]) -> (Vec<RawPosting>, usize) {
    ensure_metrics_described();

    let mut raw = Vec::new();
    let mut failed = 0usize;
    for p in providers {
        match p.fetch_latest().await {
            Ok(mut v) => {
                tracing::info!(provider = p.name(), count = v.len(), "provider fetched");
                counter!("ingest_postings_total").increment(v.len() as u64);
                raw.append(&mut v);
            }
            Err(e) => {
                tracing::warn!(error = ?e, provider = p.name(), "provider error");
                counter!("ingest_provider_errors_total").increment(1);
                failed += 1;
            }
        }
    }

    (raw, failed)
}
