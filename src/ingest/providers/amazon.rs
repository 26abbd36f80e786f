// src/ingest/providers/amazon.rs
//! amazon.jobs search JSON (the endpoint behind the public search UI; unofficial).
//!
//! Pages with `offset`/`result_limit` until an empty or short page, or `max_pages`.

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use super::items;
use crate::config::AmazonQuery;
use crate::ingest::dates::normalize_date;
use crate::ingest::http::{lenient, non_empty, JsonFetcher};
use crate::ingest::normalize_text;
use crate::ingest::types::{RawPosting, SourceProvider};

pub const AMAZON_JOBS_BASE: &str = "https://www.amazon.jobs";
const SOURCE: &str = "amazon_jobs";
const PAGE_PAUSE: Duration = Duration::from_millis(200);

#[derive(Debug, Deserialize)]
struct Job {
    #[serde(default, deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    job_title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    city: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    state: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    country_code: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    country: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    job_path: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    basic_qualifications: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    preferred_qualifications: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    posted_date: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    updated_time: Option<String>,
}

pub struct AmazonProvider {
    query: AmazonQuery,
    base_url: String,
    fetcher: JsonFetcher,
    page_pause: Duration,
}

impl AmazonProvider {
    pub fn new(query: AmazonQuery, fetcher: JsonFetcher) -> Self {
        Self {
            query,
            base_url: AMAZON_JOBS_BASE.to_string(),
            fetcher,
            page_pause: PAGE_PAUSE,
        }
    }

    pub fn with_base_url(mut self, base: &str) -> Self {
        self.base_url = base.trim_end_matches('/').to_string();
        self
    }

    pub fn with_page_pause(mut self, pause: Duration) -> Self {
        self.page_pause = pause;
        self
    }

    fn page_params(&self, offset: u32) -> Vec<(&'static str, String)> {
        vec![
            ("base_query", self.query.query.clone()),
            ("loc_query", self.query.location_query.clone()),
            ("country", self.query.country.clone()),
            ("result_limit", self.query.page_size.to_string()),
            ("offset", offset.to_string()),
            ("sort", "recent".to_string()),
        ]
    }

    fn to_posting(&self, item: &Value) -> Option<RawPosting> {
        let job: Job = serde_json::from_value(item.clone()).ok()?;
        let path = non_empty(job.job_path.as_deref())?;
        let url = if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{AMAZON_JOBS_BASE}{path}")
        };

        // The search API ships `country_code` ("USA"); older payloads only `country`.
        let country = non_empty(job.country_code.as_deref()).or(non_empty(job.country.as_deref()));
        let location = [non_empty(job.city.as_deref()), non_empty(job.state.as_deref()), country]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");

        let description = [
            job.description.as_deref(),
            job.basic_qualifications.as_deref(),
            job.preferred_qualifications.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(normalize_text)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        let title = non_empty(job.title.as_deref())
            .or(non_empty(job.job_title.as_deref()))
            .unwrap_or_default();
        let date_raw = non_empty(job.posted_date.as_deref()).or(non_empty(job.updated_time.as_deref()));

        Some(RawPosting {
            title: title.to_string(),
            company: "Amazon".to_string(),
            location,
            url,
            source: SOURCE.to_string(),
            description,
            date_posted: date_raw.and_then(normalize_date),
        })
    }
}

#[async_trait]
impl SourceProvider for AmazonProvider {
    async fn fetch_latest(&self) -> Result<Vec<RawPosting>> {
        let url = format!("{}/en/search.json", self.base_url);
        let page_size = self.query.page_size.max(1);
        let mut out = Vec::new();

        for page in 0..self.query.max_pages {
            let params = self.page_params(page * page_size);
            let payload = self.fetcher.get_json(&url, &params).await?;
            let jobs = items(&payload, Some("jobs"));
            if jobs.is_empty() {
                break;
            }
            let before = out.len();
            out.extend(jobs.iter().filter_map(|j| self.to_posting(j)));
            tracing::debug!(
                provider = SOURCE,
                page,
                received = jobs.len(),
                kept = out.len() - before,
                "amazon page"
            );

            if jobs.len() < page_size as usize {
                break;
            }
            tokio::time::sleep(self.page_pause).await;
        }
        Ok(out)
    }

    fn name(&self) -> &str {
        SOURCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn provider() -> AmazonProvider {
        AmazonProvider::new(
            AmazonQuery::default(),
            JsonFetcher::new(Duration::from_secs(1)).unwrap(),
        )
    }

    #[test]
    fn builds_location_url_and_description() {
        let item = json!({
            "title": "Software Dev Engineer I",
            "city": "Seattle",
            "state": "WA",
            "country_code": "USA",
            "job_path": "/en/jobs/123/sde-i",
            "description": "Build <b>services</b>.",
            "basic_qualifications": "- Java&lt;br/&gt;- SQL",
            "posted_date": "January 5, 2024"
        });
        let p = provider().to_posting(&item).unwrap();
        assert_eq!(p.location, "Seattle, WA, USA");
        assert_eq!(p.url, "https://www.amazon.jobs/en/jobs/123/sde-i");
        assert_eq!(p.description, "Build services . - Java - SQL");
        assert_eq!(p.date_posted.as_deref(), Some("2024-01-05"));
        assert_eq!(p.company, "Amazon");
        assert_eq!(p.source, "amazon_jobs");
    }

    #[test]
    fn missing_pieces_degrade() {
        let item = json!({"job_title": "SDE", "country": "US", "job_path": "/en/jobs/9", "posted_date": 12});
        let p = provider().to_posting(&item).unwrap();
        assert_eq!(p.title, "SDE");
        assert_eq!(p.location, "US");
        assert_eq!(p.description, "");
        assert_eq!(p.date_posted, None);

        assert!(provider().to_posting(&json!({"title": "no path"})).is_none());
    }
}
