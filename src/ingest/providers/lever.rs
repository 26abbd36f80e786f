// src/ingest/providers/lever.rs
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{items, title_case};
use crate::ingest::dates::{from_epoch_millis, normalize_date};
use crate::ingest::http::{lenient, non_empty, JsonFetcher};
use crate::ingest::normalize_text;
use crate::ingest::types::{RawPosting, SourceProvider};

pub const LEVER_API_BASE: &str = "https://api.lever.co";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Posting {
    #[serde(default, deserialize_with = "lenient")]
    text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    categories: Option<Categories>,
    #[serde(default, deserialize_with = "lenient")]
    hosted_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    apply_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    description_plain: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    created_at: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Categories {
    #[serde(default, deserialize_with = "lenient")]
    location: Option<String>,
}

/// Lever's `createdAt` is epoch millis; some mirrors send a date string instead.
fn created_at_to_iso(v: &Value) -> Option<String> {
    match v {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .and_then(from_epoch_millis),
        Value::String(s) => normalize_date(s),
        _ => None,
    }
}

/// Public Lever postings API (`api.lever.co/v0/postings/{slug}?mode=json`).
pub struct LeverProvider {
    slug: String,
    source: String,
    base_url: String,
    fetcher: JsonFetcher,
}

impl LeverProvider {
    pub fn new(slug: &str, fetcher: JsonFetcher) -> Self {
        let slug = slug.trim().to_string();
        Self {
            source: format!("lever:{slug}"),
            slug,
            base_url: LEVER_API_BASE.to_string(),
            fetcher,
        }
    }

    pub fn with_base_url(mut self, base: &str) -> Self {
        self.base_url = base.trim_end_matches('/').to_string();
        self
    }

    fn parse_payload(&self, payload: &Value) -> Vec<RawPosting> {
        let company = title_case(&self.slug);
        let mut out = Vec::new();
        for item in items(payload, None) {
            let p: Posting = match serde_json::from_value(item.clone()) {
                Ok(p) => p,
                Err(e) => {
                    tracing::debug!(error = %e, provider = %self.source, "skipping malformed posting");
                    continue;
                }
            };
            let Some(url) = non_empty(p.hosted_url.as_deref()).or(non_empty(p.apply_url.as_deref()))
            else {
                tracing::debug!(provider = %self.source, "skipping posting without url");
                continue;
            };

            let title = non_empty(p.text.as_deref())
                .or(non_empty(p.title.as_deref()))
                .unwrap_or_default();
            let description = non_empty(p.description_plain.as_deref())
                .or(non_empty(p.description.as_deref()))
                .unwrap_or_default();

            out.push(RawPosting {
                title: title.to_string(),
                company: company.clone(),
                location: p
                    .categories
                    .and_then(|c| c.location)
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
                url: url.to_string(),
                source: self.source.clone(),
                description: normalize_text(description),
                date_posted: p.created_at.as_ref().and_then(created_at_to_iso),
            });
        }
        out
    }
}

#[async_trait]
impl SourceProvider for LeverProvider {
    async fn fetch_latest(&self) -> Result<Vec<RawPosting>> {
        let url = format!("{}/v0/postings/{}", self.base_url, self.slug);
        let payload = self
            .fetcher
            .get_json(&url, &[("mode", "json".to_string())])
            .await?;
        Ok(self.parse_payload(&payload))
    }

    fn name(&self) -> &str {
        &self.source
    }
}
