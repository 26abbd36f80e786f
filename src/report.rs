// src/report.rs
//! Static HTML report of the ranked postings. Rendering only; no scoring here.

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::pipeline::ScoredPosting;

pub const REPORT_TITLE: &str = "Job Radar Report";

const STYLE: &str = "\
      body { font-family: Arial, sans-serif; padding: 20px; }
      table { border-collapse: collapse; width: 100%; }
      th, td { border: 1px solid #ddd; padding: 8px; }
      th { background-color: #f4f4f4; }
      tr:hover { background: #fafafa; }
";

const COLUMNS: &[&str] = &[
    "#", "Title", "Company", "Location", "Source", "Date", "Resume", "H-1B", "Entry", "Score",
];

/// Render the first `limit` postings (already ranked) as an HTML page.
pub fn render_html_report(
    postings: &[ScoredPosting],
    limit: usize,
    generated_at: DateTime<Utc>,
) -> String {
    let mut rows = String::new();
    for (i, j) in postings.iter().take(limit).enumerate() {
        let _ = write!(
            rows,
            "        <tr>\n\
             \x20         <td>{rank}</td>\n\
             \x20         <td><a href=\"{url}\" target=\"_blank\" rel=\"noopener\">{title}</a></td>\n\
             \x20         <td>{company}</td>\n\
             \x20         <td>{location}</td>\n\
             \x20         <td>{source}</td>\n\
             \x20         <td>{date}</td>\n\
             \x20         <td>{resume:.2}</td>\n\
             \x20         <td>{h1b:.2}</td>\n\
             \x20         <td>{entry:.2}</td>\n\
             \x20         <td><b>{score:.2}</b></td>\n\
             \x20       </tr>\n",
            rank = i + 1,
            url = encode_double_quoted_attribute(&j.url),
            title = encode_text(&j.title),
            company = encode_text(&j.company),
            location = encode_text(&j.location),
            source = encode_text(&j.source),
            date = encode_text(j.date_posted.as_deref().unwrap_or_default()),
            resume = j.resume_match,
            h1b = j.h1b_confidence,
            entry = j.entry_level_score,
            score = j.final_score,
        );
    }

    let header: String = COLUMNS
        .iter()
        .map(|c| format!("          <th>{}</th>\n", encode_text(c)))
        .collect();
    let shown = postings.len().min(limit);
    let generated = generated_at.to_rfc3339_opts(SecondsFormat::Secs, true);

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         \x20 <head>\n\
         \x20   <meta charset=\"utf-8\">\n\
         \x20   <title>{REPORT_TITLE}</title>\n\
         \x20   <style>\n{STYLE}    </style>\n\
         \x20 </head>\n\
         \x20 <body>\n\
         \x20   <h2>{REPORT_TITLE}</h2>\n\
         \x20   <p>Generated at: {generated} &middot; showing {shown} of {total} postings</p>\n\
         \x20   <table>\n\
         \x20     <thead>\n\
         \x20       <tr>\n{header}        </tr>\n\
         \x20     </thead>\n\
         \x20     <tbody>\n{rows}      </tbody>\n\
         \x20   </table>\n\
         \x20 </body>\n\
         </html>\n",
        total = postings.len(),
    )
}

/// Write the rendered report, creating the parent directory if needed.
pub fn write_report(path: &Path, html: &str) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating report dir {}", dir.display()))?;
    }
    fs::write(path, html).with_context(|| format!("writing report {}", path.display()))
}
