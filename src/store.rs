// src/store.rs
//! SQLite job table keyed by posting identity.
//!
//! Rows are only ever inserted or updated. `first_seen` is written once on
//! insert; every later upsert refreshes the mutable fields and `last_seen`.

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::pipeline::ScoredPosting;

pub const JOBS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS jobs (
    job_id            TEXT PRIMARY KEY,
    title             TEXT,
    company           TEXT,
    location          TEXT,
    url               TEXT,
    source            TEXT,
    date_posted       TEXT,
    description       TEXT,
    entry_level_score REAL,
    h1b_confidence    REAL,
    resume_match      REAL,
    final_score       REAL,
    first_seen        TEXT NOT NULL,
    last_seen         TEXT NOT NULL
);
"#;

/// A row as read back from the table.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredJob {
    pub job_id: String,
    pub title: String,
    pub company: String,
    pub url: String,
    pub final_score: f64,
    pub first_seen: String,
    pub last_seen: String,
}

pub struct JobStore {
    conn: Connection,
}

impl JobStore {
    /// Open (or create) the database file, creating parent directories.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating database dir {}", dir.display()))?;
        }
        let conn = Connection::open(path)
            .with_context(|| format!("opening database {}", path.display()))?;
        Self::init(conn)
    }

    pub fn memory() -> Result<Self> {
        Self::init(Connection::open_in_memory().context("opening in-memory database")?)
    }

    fn init(conn: Connection) -> Result<Self> {
        let _ = conn.execute("PRAGMA journal_mode = WAL", []);
        let _ = conn.execute("PRAGMA busy_timeout = 5000", []);
        conn.execute_batch(JOBS_SCHEMA)
            .context("creating jobs table")?;
        Ok(Self { conn })
    }

    /// Insert-or-update by identity, stamping `now`.
    pub fn upsert_at(&self, job: &ScoredPosting, now: DateTime<Utc>) -> Result<()> {
        upsert_row(&self.conn, job, now)
    }

    pub fn upsert(&self, job: &ScoredPosting) -> Result<()> {
        self.upsert_at(job, Utc::now())
    }

    /// Upsert a batch in one transaction; returns the number of rows written.
    pub fn upsert_all(&mut self, jobs: &[ScoredPosting]) -> Result<usize> {
        let now = Utc::now();
        let tx = self.conn.transaction().context("begin transaction")?;
        for job in jobs {
            upsert_row(&tx, job, now)?;
        }
        tx.commit().context("commit upserts")?;
        Ok(jobs.len())
    }

    pub fn get(&self, job_id: &str) -> Result<Option<StoredJob>> {
        get_job(&self.conn, job_id)
    }

    pub fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM jobs", [], |row| row.get(0))
            .context("counting jobs")?;
        Ok(n.max(0) as usize)
    }
}

fn upsert_row(conn: &Connection, job: &ScoredPosting, now: DateTime<Utc>) -> Result<()> {
    let ts = now.to_rfc3339_opts(SecondsFormat::Micros, true);
    conn.execute(
        r#"
        INSERT INTO jobs (
            job_id, title, company, location, url, source, date_posted, description,
            entry_level_score, h1b_confidence, resume_match, final_score,
            first_seen, last_seen
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?13)
        ON CONFLICT(job_id) DO UPDATE SET
            title = excluded.title,
            company = excluded.company,
            location = excluded.location,
            url = excluded.url,
            source = excluded.source,
            date_posted = excluded.date_posted,
            description = excluded.description,
            entry_level_score = excluded.entry_level_score,
            h1b_confidence = excluded.h1b_confidence,
            resume_match = excluded.resume_match,
            final_score = excluded.final_score,
            last_seen = excluded.last_seen
        "#,
        params![
            job.id,
            job.title,
            job.company,
            job.location,
            job.url,
            job.source,
            job.date_posted,
            job.description,
            job.entry_level_score,
            job.h1b_confidence,
            job.resume_match,
            job.final_score,
            ts,
        ],
    )
    .with_context(|| format!("upserting job {}", job.id))?;
    Ok(())
}

fn get_job(conn: &Connection, job_id: &str) -> Result<Option<StoredJob>> {
    conn.query_row(
        r#"
        SELECT job_id, title, company, url, final_score, first_seen, last_seen
        FROM jobs WHERE job_id = ?1
        "#,
        [job_id],
        |row| {
            Ok(StoredJob {
                job_id: row.get(0)?,
                title: row.get(1)?,
                company: row.get(2)?,
                url: row.get(3)?,
                final_score: row.get(4)?,
                first_seen: row.get(5)?,
                last_seen: row.get(6)?,
            })
        },
    )
    .optional()
    .with_context(|| format!("loading job {job_id}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn job(id_url: &str, title: &str, score: f64) -> ScoredPosting {
        ScoredPosting {
            id: crate::pipeline::posting_id(id_url),
            title: title.into(),
            company: "Acme".into(),
            location: "Austin, TX".into(),
            url: id_url.into(),
            source: "test".into(),
            description: String::new(),
            date_posted: None,
            entry_level_score: 0.4,
            h1b_confidence: 0.2,
            resume_match: 0.0,
            final_score: score,
        }
    }

    #[test]
    fn second_upsert_keeps_first_seen_and_refreshes_fields() {
        let store = JobStore::memory().unwrap();
        let t1 = Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2025, 1, 2, 9, 0, 0).unwrap();

        let j = job("https://x/1", "Engineer", 0.3);
        store.upsert_at(&j, t1).unwrap();
        let mut j2 = j.clone();
        j2.title = "Engineer I".into();
        j2.final_score = 0.6;
        store.upsert_at(&j2, t2).unwrap();

        let row = store.get(&j.id).unwrap().unwrap();
        assert_eq!(row.title, "Engineer I");
        assert!((row.final_score - 0.6).abs() < 1e-12);
        assert!(row.first_seen.starts_with("2025-01-01T09:00:00"));
        assert!(row.last_seen.starts_with("2025-01-02T09:00:00"));
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn batch_upsert_and_missing_lookup() {
        let mut store = JobStore::memory().unwrap();
        let n = store
            .upsert_all(&[job("https://x/1", "A", 0.1), job("https://x/2", "B", 0.2)])
            .unwrap();
        assert_eq!(n, 2);
        assert_eq!(store.count().unwrap(), 2);
        assert!(store.get("nope").unwrap().is_none());
    }
}
