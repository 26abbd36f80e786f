// src/analyze/mod.rs
//! Stateless scorers over plain text. Each is a pure function of its inputs
//! plus the run's resolved configuration.

pub mod entry_level;
pub mod location;
pub mod resume;
pub mod scoring;
pub mod sponsorship;

// Re-export convenient types.
pub use crate::analyze::entry_level::entry_level_score;
pub use crate::analyze::location::is_us_location;
pub use crate::analyze::resume::{build_resume_profile, match_score, ResumeProfile};
pub use crate::analyze::scoring::{final_score, ScoreInputs};
pub use crate::analyze::sponsorship::{clean_company_name, sponsorship_confidence};
