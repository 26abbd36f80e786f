// src/ingest/providers/greenhouse.rs
use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{items, title_case};
use crate::ingest::dates::normalize_date;
use crate::ingest::http::{lenient, non_empty, JsonFetcher};
use crate::ingest::normalize_text;
use crate::ingest::types::{RawPosting, SourceProvider};

pub const GREENHOUSE_API_BASE: &str = "https://boards-api.greenhouse.io";

#[derive(Debug, Deserialize)]
struct Job {
    #[serde(default, deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    location: Option<Location>,
    #[serde(default, deserialize_with = "lenient")]
    absolute_url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    content: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    updated_at: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    created_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Location {
    #[serde(default, deserialize_with = "lenient")]
    name: Option<String>,
}

/// Public Greenhouse job board (`boards-api.greenhouse.io/v1/boards/{slug}/jobs`).
pub struct GreenhouseProvider {
    slug: String,
    source: String,
    base_url: String,
    fetcher: JsonFetcher,
}

impl GreenhouseProvider {
    pub fn new(slug: &str, fetcher: JsonFetcher) -> Self {
        let slug = slug.trim().to_string();
        Self {
            source: format!("greenhouse:{slug}"),
            slug,
            base_url: GREENHOUSE_API_BASE.to_string(),
            fetcher,
        }
    }

    /// Point at a different host (tests, proxies).
    pub fn with_base_url(mut self, base: &str) -> Self {
        self.base_url = base.trim_end_matches('/').to_string();
        self
    }

    fn parse_payload(&self, payload: &Value) -> Vec<RawPosting> {
        let company = title_case(&self.slug);
        let mut out = Vec::new();
        for item in items(payload, Some("jobs")) {
            let job: Job = match serde_json::from_value(item.clone()) {
                Ok(j) => j,
                Err(e) => {
                    tracing::debug!(error = %e, provider = %self.source, "skipping malformed job");
                    continue;
                }
            };
            let Some(url) = non_empty(job.absolute_url.as_deref()) else {
                tracing::debug!(provider = %self.source, "skipping job without url");
                continue;
            };

            let date_raw = non_empty(job.updated_at.as_deref()).or(non_empty(job.created_at.as_deref()));
            out.push(RawPosting {
                title: job.title.as_deref().unwrap_or_default().trim().to_string(),
                company: company.clone(),
                location: job
                    .location
                    .and_then(|l| l.name)
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
                url: url.to_string(),
                source: self.source.clone(),
                description: normalize_text(job.content.as_deref().unwrap_or_default()),
                date_posted: date_raw.and_then(normalize_date),
            });
        }
        out
    }
}

#[async_trait]
impl SourceProvider for GreenhouseProvider {
    async fn fetch_latest(&self) -> Result<Vec<RawPosting>> {
        let url = format!("{}/v1/boards/{}/jobs", self.base_url, self.slug);
        let payload = self
            .fetcher
            .get_json(&url, &[("content", "true".to_string())])
            .await?;
        Ok(self.parse_payload(&payload))
    }

    fn name(&self) -> &str {
        &self.source
    }
}
