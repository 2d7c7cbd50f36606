//! 12-hour clock strings such as `9PM` or `5:30 AM`.

use regex::Regex;
use std::sync::OnceLock;

/// Message shown when an opening or closing time is malformed.
pub const TIME_FORMAT_MESSAGE: &str = "Incorrect format. Correct format: 9PM or 5:30AM";

/// Hour 1-12 without a leading zero, optional `:MM`, optional single space,
/// uppercase meridiem.
pub const TIME_PATTERN: &str = r"^(1[0-2]|[1-9])(:[0-5][0-9])? ?(AM|PM)$";

pub fn time_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(TIME_PATTERN).expect("time pattern is valid"))
}

pub fn is_valid_time(s: &str) -> bool {
    time_regex().is_match(s)
}

/// Remove all whitespace, e.g. `"5:30 PM"` becomes `"5:30PM"`.
pub fn normalize_time(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_times() {
        for s in ["9PM", "5:30AM", "12:00PM", "1AM", "10AM", "11:59PM", "7 AM", "8:05 PM"] {
            assert!(is_valid_time(s), "expected {:?} to be valid", s);
        }
    }

    #[test]
    fn test_rejects_invalid_times() {
        for s in [
            "13:00", "9 pm", "9:5PM", "25PM", "09PM", "0AM", "13PM", "9:60AM", "120PM", "9",
            "9pm", "9  PM", " 9PM", "9PM ", "", "9:PM", "930PM",
        ] {
            assert!(!is_valid_time(s), "expected {:?} to be invalid", s);
        }
    }

    #[test]
    fn test_normalize_strips_whitespace() {
        assert_eq!(normalize_time("5:30 PM"), "5:30PM");
        assert_eq!(normalize_time("8AM"), "8AM");
    }
}
