// src/ingest/http.rs
//! Shared JSON GET client for board adapters.
//!
//! Every request carries a fixed timeout. HTTP 429 is retried with exponential
//! backoff (base, 2*base, 4*base, ... capped at 30s) up to `max_attempts`;
//! every other non-2xx status, transport error or malformed body is returned
//! as an error for the caller to log.

use anyhow::{anyhow, Context, Result};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

use crate::config::HttpConfig;

const MAX_BACKOFF: Duration = Duration::from_secs(30);

#[derive(Clone, Debug)]
pub struct JsonFetcher {
    client: Client,
    max_attempts: u32,
    backoff_base: Duration,
}

impl JsonFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("job-radar/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building http client")?;
        Ok(Self {
            client,
            max_attempts: 3,
            backoff_base: Duration::from_secs(1),
        })
    }

    pub fn from_config(cfg: &HttpConfig) -> Result<Self> {
        Ok(Self::new(Duration::from_secs(cfg.timeout_secs))?
            .with_retries(cfg.max_attempts)
            .with_backoff_base(Duration::from_millis(cfg.backoff_base_ms)))
    }

    pub fn with_retries(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_backoff_base(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }

    fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 1u32 << (attempt.saturating_sub(1)).min(16);
        self.backoff_base.saturating_mul(factor).min(MAX_BACKOFF)
    }

    /// GET `url` with `query` and decode the body as JSON.
    pub async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let rsp = self
                .client
                .get(url)
                .query(query)
                .send()
                .await
                .with_context(|| format!("GET {url}"))?;

            let status = rsp.status();
            if status == StatusCode::TOO_MANY_REQUESTS {
                if attempt < self.max_attempts {
                    let backoff = self.backoff_for(attempt);
                    tracing::warn!(
                        %url,
                        attempt,
                        backoff_ms = backoff.as_millis() as u64,
                        "rate limited, backing off"
                    );
                    tokio::time::sleep(backoff).await;
                    continue;
                }
                return Err(anyhow!(
                    "GET {url}: still rate limited after {attempt} attempts"
                ));
            }
            if !status.is_success() {
                return Err(anyhow!("GET {url}: HTTP {status}"));
            }

            let body = rsp
                .text()
                .await
                .with_context(|| format!("reading body of {url}"))?;
            return serde_json::from_str(&body).with_context(|| format!("malformed json from {url}"));
        }
    }
}

/// Field-level leniency for upstream payloads: a value of the wrong shape is
/// treated as absent instead of failing the whole record.
///
/// Use as `#[serde(default, deserialize_with = "lenient")]` on `Option<T>` fields.
pub fn lenient<'de, D, T>(d: D) -> std::result::Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let v = <Value as serde::Deserialize>::deserialize(d)?;
    Ok(serde_json::from_value(v).ok())
}

/// Trimmed, non-empty string or `None`.
pub fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn backoff_doubles_and_caps() {
        let f = JsonFetcher::new(Duration::from_secs(1))
            .unwrap()
            .with_backoff_base(Duration::from_millis(500));
        assert_eq!(f.backoff_for(1), Duration::from_millis(500));
        assert_eq!(f.backoff_for(2), Duration::from_millis(1000));
        assert_eq!(f.backoff_for(3), Duration::from_millis(2000));
        assert_eq!(f.backoff_for(12), MAX_BACKOFF);
    }

    #[derive(serde::Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "lenient")]
        a: Option<String>,
        #[serde(default, deserialize_with = "lenient")]
        b: Option<String>,
        #[serde(default, deserialize_with = "lenient")]
        c: Option<i64>,
        #[serde(default, deserialize_with = "lenient")]
        missing: Option<String>,
    }

    #[test]
    fn lenient_fields_degrade_to_none() {
        let p: Probe = serde_json::from_value(json!({"a": "x", "b": 3, "c": "nope"})).unwrap();
        assert_eq!(p.a.as_deref(), Some("x"));
        assert_eq!(p.b, None);
        assert_eq!(p.c, None);
        assert_eq!(p.missing, None);
    }

    #[test]
    fn non_empty_trims() {
        assert_eq!(non_empty(Some("  x ")), Some("x"));
        assert_eq!(non_empty(Some("   ")), None);
        assert_eq!(non_empty(None), None);
    }
}
