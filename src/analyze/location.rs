// src/analyze/location.rs
//! US / non-US classification of free-text locations.

const US_STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY", "DC",
];

const US_ALIASES: &[&str] = &["us", "usa", "u.s.", "u.s.a."];

/// True for "United States" anywhere, a bare US alias, or any comma/space
/// separated token equal to a state postal code (or DC). Empty is false.
pub fn is_us_location(location: &str) -> bool {
    if location.trim().is_empty() {
        return false;
    }
    let lower = location.to_lowercase();
    if lower.contains("united states") || US_ALIASES.contains(&lower.trim()) {
        return true;
    }
    location
        .to_uppercase()
        .split(|c: char| c == ',' || c.is_whitespace())
        .any(|tok| US_STATES.contains(&tok))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn united_states_any_case() {
        assert!(is_us_location("Remote - United States"));
        assert!(is_us_location("UNITED STATES"));
        assert!(is_us_location("united states of america"));
    }

    #[test]
    fn aliases_only_when_whole_string() {
        assert!(is_us_location(" USA "));
        assert!(is_us_location("u.s."));
        assert!(is_us_location("U.S.A."));
        assert!(!is_us_location("Toronto, Canada"));
    }

    #[test]
    fn state_codes_as_tokens() {
        assert!(is_us_location("New York, NY"));
        assert!(is_us_location("Washington DC"));
        assert!(is_us_location("austin,tx"));
        assert!(!is_us_location("London, UK"));
        assert!(!is_us_location("Berlin, DE-BE"));
    }

    #[test]
    fn empty_is_false() {
        assert!(!is_us_location(""));
        assert!(!is_us_location("   "));
    }
}
