//! Composable per-field validation.
//!
//! Each form field owns an ordered list of [`Check`]s. Checks run in order
//! and the message of the first one that fails is reported for the field;
//! later checks are not consulted.

use regex::Regex;
use url::Url;

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const URL_MESSAGE: &str = "Invalid URL.";
pub const CHOICE_MESSAGE: &str = "Not a valid choice.";

/// A single predicate on a field value.
#[derive(Debug, Clone)]
pub enum Check {
    /// Value must be non-empty after trimming.
    Required,
    /// Value must be an absolute URL with a host.
    Url,
    /// Value must match `regex`; `message` is reported otherwise.
    Pattern {
        regex: &'static Regex,
        message: &'static str,
    },
    /// Value must be one of the listed strings.
    OneOf(Vec<String>),
}

impl Check {
    /// Returns the failure message, or `None` when `value` passes.
    pub fn run(&self, value: &str) -> Option<&'static str> {
        let ok = match self {
            Check::Required => !value.trim().is_empty(),
            Check::Url => is_valid_url(value),
            Check::Pattern { regex, .. } => regex.is_match(value),
            Check::OneOf(allowed) => allowed.iter().any(|a| a == value),
        };
        if ok {
            return None;
        }
        Some(match self {
            Check::Required => REQUIRED_MESSAGE,
            Check::Url => URL_MESSAGE,
            Check::Pattern { message, .. } => *message,
            Check::OneOf(_) => CHOICE_MESSAGE,
        })
    }
}

/// The ordered checks for one named field.
#[derive(Debug, Clone)]
pub struct FieldRules {
    pub field: &'static str,
    pub checks: Vec<Check>,
}

impl FieldRules {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            checks: Vec::new(),
        }
    }

    pub fn check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    pub fn first_error(&self, value: &str) -> Option<&'static str> {
        self.checks.iter().find_map(|c| c.run(value))
    }
}

/// URL syntax check: the value parses as an absolute URL and names a host.
/// Any scheme is accepted.
pub fn is_valid_url(value: &str) -> bool {
    Url::parse(value).is_ok_and(|url| url.host().is_some())
}
