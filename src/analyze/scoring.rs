//! Final ranking score.
//!
//! final = 0.5 * resume_match + 0.3 * sponsorship + 0.2 * entry_level
//!
//! The weights are fixed and sum to 1, so three inputs in [0,1] give a final
//! score in [0,1]. Resume fit dominates the ranking.

pub const W_RESUME: f64 = 0.5;
pub const W_SPONSORSHIP: f64 = 0.3;
pub const W_ENTRY_LEVEL: f64 = 0.2;

/// The three sub-scores of a posting, each in [0,1].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScoreInputs {
    pub resume_match: f64,
    pub sponsorship: f64,
    pub entry_level: f64,
}

impl ScoreInputs {
    /// Safe constructor with clamping.
    pub fn new(resume_match: f64, sponsorship: f64, entry_level: f64) -> Self {
        fn c(x: f64) -> f64 {
            if x.is_nan() {
                0.0
            } else {
                x.clamp(0.0, 1.0)
            }
        }
        Self {
            resume_match: c(resume_match),
            sponsorship: c(sponsorship),
            entry_level: c(entry_level),
        }
    }
}

pub fn final_score(inputs: &ScoreInputs) -> f64 {
    let raw = W_RESUME * inputs.resume_match
        + W_SPONSORSHIP * inputs.sponsorship
        + W_ENTRY_LEVEL * inputs.entry_level;
    raw.clamp(0.0, 1.0)
}
