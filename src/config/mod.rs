// src/config/mod.rs
//! YAML run configuration.
//!
//! Every section is optional; missing fields fall back to the defaults below.
//! Keyword lists are resolved once (see [`keywords`]) so scorers only ever see
//! lower-cased, non-empty lists.

pub mod keywords;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/config.yaml";
pub const EXAMPLE_CONFIG_FILE: &str = "config.example.yaml";

pub const ENV_SMTP_HOST: &str = "SMTP_HOST";
pub const ENV_SMTP_PORT: &str = "SMTP_PORT";
pub const ENV_SMTP_USER: &str = "SMTP_USER";
pub const ENV_SMTP_PASS: &str = "SMTP_PASS";
pub const ENV_REPORT_FROM: &str = "REPORT_FROM_EMAIL";
pub const ENV_REPORT_TO: &str = "REPORT_TO_EMAIL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub sources: SourcesConfig,
    pub filters: FiltersConfig,
    pub h1b: H1bConfig,
    pub resume: ResumeConfig,
    pub persistence: PersistenceConfig,
    pub report: ReportConfig,
    pub email: EmailConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Greenhouse board slugs, e.g. "stripe".
    pub greenhouse: Vec<String>,
    /// Lever company slugs.
    pub lever: Vec<String>,
    pub amazon: Vec<AmazonQuery>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AmazonQuery {
    pub query: String,
    pub location_query: String,
    pub country: String,
    pub page_size: u32,
    pub max_pages: u32,
}

impl Default for AmazonQuery {
    fn default() -> Self {
        Self {
            query: String::new(),
            location_query: String::new(),
            country: "United States".to_string(),
            page_size: 100,
            max_pages: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FiltersConfig {
    pub excluded_seniority: Vec<String>,
    pub entry_level_keywords: Vec<String>,
    pub titles_of_interest: Vec<String>,
    pub require_us_location: bool,
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            excluded_seniority: Vec::new(),
            entry_level_keywords: Vec::new(),
            titles_of_interest: Vec::new(),
            require_us_location: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct H1bConfig {
    pub positive_keywords: Vec<String>,
    pub negative_keywords: Vec<String>,
    pub known_sponsors_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeConfig {
    pub use_pdf: bool,
    pub resume_pdf_path: Option<PathBuf>,
    /// skill -> weight; BTreeMap keeps summation order stable.
    pub skills: BTreeMap<String, f64>,
    pub titles_of_interest: Vec<String>,
    pub min_match_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    pub database_path: PathBuf,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("data/jobs.db"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub top_n: usize,
    pub output_path: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: 50,
            output_path: PathBuf::from("reports/latest_report.html"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub enabled: bool,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_pass: String,
    pub from_email: String,
    pub to_email: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: String::new(),
            smtp_port: 587,
            smtp_user: String::new(),
            smtp_pass: String::new(),
            from_email: String::new(),
            to_email: String::new(),
        }
    }
}

impl EmailConfig {
    /// Environment variables win over the file when set and non-empty.
    pub fn apply_env_overrides(&mut self) {
        override_from_env(ENV_SMTP_HOST, &mut self.smtp_host);
        override_from_env(ENV_SMTP_USER, &mut self.smtp_user);
        override_from_env(ENV_SMTP_PASS, &mut self.smtp_pass);
        override_from_env(ENV_REPORT_FROM, &mut self.from_email);
        override_from_env(ENV_REPORT_TO, &mut self.to_email);

        if let Some(port) = env_non_empty(ENV_SMTP_PORT).and_then(|p| p.trim().parse::<u16>().ok())
        {
            self.smtp_port = port;
        }
    }

    /// Host, port, sender and recipient must all be present before we try SMTP.
    pub fn is_complete(&self) -> bool {
        !self.smtp_host.trim().is_empty()
            && self.smtp_port != 0
            && !self.from_email.trim().is_empty()
            && !self.to_email.trim().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub max_attempts: u32,
    pub backoff_base_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_attempts: 3,
            backoff_base_ms: 1_000,
        }
    }
}

impl AgentConfig {
    /// Parse a YAML document. An empty document yields all defaults.
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: AgentConfig = serde_yaml::from_str(s).context("parsing yaml config")?;
        Ok(cfg.sanitized())
    }

    /// Load from `path`, falling back to `config.example.yaml` next to it.
    /// Email env overrides are applied after parsing.
    pub fn load(path: &Path) -> Result<Self> {
        let resolved = resolve_config_path(path)?;
        let content = fs::read_to_string(&resolved)
            .with_context(|| format!("reading config from {}", resolved.display()))?;
        let mut cfg = Self::from_yaml_str(&content)
            .with_context(|| format!("invalid config {}", resolved.display()))?;
        cfg.email.apply_env_overrides();
        tracing::info!(path = %resolved.display(), "config loaded");
        Ok(cfg)
    }

    fn sanitized(mut self) -> Self {
        if !self.resume.min_match_score.is_finite() {
            self.resume.min_match_score = 0.0;
        }
        self.resume.min_match_score = self.resume.min_match_score.clamp(0.0, 1.0);
        if self.http.max_attempts == 0 {
            self.http.max_attempts = 1;
        }
        self
    }
}

/// The requested path if it exists, else the example file in the same directory.
pub fn resolve_config_path(path: &Path) -> Result<PathBuf> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    let example = path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(EXAMPLE_CONFIG_FILE);
    if example.is_file() {
        tracing::warn!(
            requested = %path.display(),
            fallback = %example.display(),
            "config not found, using example config"
        );
        return Ok(example);
    }
    Err(anyhow!("config not found: {}", path.display()))
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn override_from_env(key: &str, slot: &mut String) {
    if let Some(v) = env_non_empty(key) {
        *slot = v;
    }
}
