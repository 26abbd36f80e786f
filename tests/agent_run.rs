// tests/agent_run.rs
use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use job_radar::notify::DeliveryOutcome;
use job_radar::store::JobStore;
use job_radar::{run_with_providers, AgentConfig, RawPosting, SourceProvider};

struct Board(Vec<RawPosting>);

#[async_trait]
impl SourceProvider for Board {
    async fn fetch_latest(&self) -> Result<Vec<RawPosting>> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &str {
        "board"
    }
}

struct Down;

#[async_trait]
impl SourceProvider for Down {
    async fn fetch_latest(&self) -> Result<Vec<RawPosting>> {
        Err(anyhow!("503"))
    }

    fn name(&self) -> &str {
        "down"
    }
}

fn posting(title: &str, location: &str, url: &str, description: &str) -> RawPosting {
    RawPosting {
        title: title.into(),
        company: "Acme".into(),
        location: location.into(),
        url: url.into(),
        source: "board".into(),
        description: description.into(),
        date_posted: Some("2024-01-05".into()),
    }
}

fn config(dir: &Path) -> AgentConfig {
    let mut cfg = AgentConfig::default();
    cfg.persistence.database_path = dir.join("data").join("jobs.db");
    cfg.report.output_path = dir.join("reports").join("latest_report.html");
    cfg.resume.skills = BTreeMap::from([("python".to_string(), 1.0), ("sql".to_string(), 1.0)]);
    cfg
}

#[tokio::test]
async fn run_persists_reports_and_skips_failed_sources() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());
    let providers: Vec<Box<dyn SourceProvider>> = vec![
        Box::new(Down),
        Box::new(Board(vec![
            posting("New Grad Engineer", "Austin, TX", "https://x/1", "Python, SQL, H1B"),
            posting("Senior Engineer", "Austin, TX", "https://x/2", "python"),
            posting("Software Engineer", "Berlin, Germany", "https://x/3", "python"),
            posting("Software Engineer", "Denver, CO", "https://x/4", "sql"),
            posting("New Grad Engineer", "Austin, TX", "https://x/1", "dup"),
        ])),
    ];

    let out = run_with_providers(&cfg, &providers).await.unwrap();
    assert_eq!(out.failed_sources, 1);
    assert_eq!(out.stats.input, 5);
    assert_eq!(out.stats.kept, 2);
    assert_eq!(out.stats.duplicates, 1);
    assert!(matches!(out.delivery, DeliveryOutcome::Disabled));

    let html = std::fs::read_to_string(&out.report_path).unwrap();
    let first = html.find("https://x/1").unwrap();
    let second = html.find("https://x/4").unwrap();
    assert!(first < second, "higher score is listed first");
    assert!(!html.contains("https://x/2"));

    let store = JobStore::open(&cfg.persistence.database_path).unwrap();
    assert_eq!(store.count().unwrap(), 2);
}

#[tokio::test]
async fn empty_run_still_writes_a_report() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());

    let out = run_with_providers(&cfg, &[]).await.unwrap();
    assert_eq!(out.stats.kept, 0);
    let html = std::fs::read_to_string(&out.report_path).unwrap();
    assert!(html.contains("showing 0 of 0 postings"));
}

#[tokio::test]
async fn rerun_does_not_duplicate_rows() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());
    let board = || -> Vec<Box<dyn SourceProvider>> {
        vec![Box::new(Board(vec![posting(
            "Junior Engineer",
            "USA",
            "https://x/9",
            "python",
        )]))]
    };

    run_with_providers(&cfg, &board()).await.unwrap();
    run_with_providers(&cfg, &board()).await.unwrap();

    let store = JobStore::open(&cfg.persistence.database_path).unwrap();
    assert_eq!(store.count().unwrap(), 1);
}
