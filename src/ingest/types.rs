// src/ingest/types.rs
use anyhow::Result;

/// One posting as produced by a board adapter. Text fields are already plain text.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq, Default)]
pub struct RawPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    pub url: String,
    pub source: String, // e.g., "greenhouse:stripe", "amazon_jobs"
    pub description: String,
    pub date_posted: Option<String>, // ISO-8601
}

#[async_trait::async_trait]
pub trait SourceProvider: Send + Sync {
    async fn fetch_latest(&self) -> Result<Vec<RawPosting>>;
    fn name(&self) -> &str;
}
