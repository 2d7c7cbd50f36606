//! The "add a café" form.
//!
//! Submissions go through two separate stages:
//!
//! 1. [`CafeForm::validate`] checks every field and parses the rating
//!    selections into in-domain [`Rating`]s, producing a [`ValidatedCafe`].
//! 2. [`ValidatedCafe::into_record`] normalizes the times and resolves each
//!    rating to its glyph string through the shared [`RatingChoices`] table,
//!    producing the [`CafeRecord`] to store.
//!
//! Stage 2 cannot fail, so nothing is written unless every field passed.
//! Values are checked and stored exactly as posted; only the times lose
//! their whitespace, and only after they have passed the format check.

use serde::Deserialize;
use std::sync::Arc;

use crate::models::CafeRecord;
use crate::rating::{Category, Rating, RatingChoices};
use crate::time_format::{normalize_time, time_regex, TIME_FORMAT_MESSAGE};
use crate::validate::{Check, FieldRules};

pub const FIELD_NAME: &str = "name";
pub const FIELD_LOCATION: &str = "location";
pub const FIELD_OPENING: &str = "opening";
pub const FIELD_CLOSING: &str = "closing";
pub const FIELD_COFFEE: &str = "coffee_rating";
pub const FIELD_WIFI: &str = "wifi_rating";
pub const FIELD_POWER: &str = "power_rating";

/// A form submission exactly as posted. Missing fields deserialize as empty
/// strings and are reported by validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CafeSubmission {
    pub name: String,
    pub location: String,
    pub opening: String,
    pub closing: String,
    pub coffee_rating: String,
    pub wifi_rating: String,
    pub power_rating: String,
    pub csrf_token: String,
}

impl CafeSubmission {
    pub fn value(&self, field: &str) -> &str {
        match field {
            FIELD_NAME => &self.name,
            FIELD_LOCATION => &self.location,
            FIELD_OPENING => &self.opening,
            FIELD_CLOSING => &self.closing,
            FIELD_COFFEE => &self.coffee_rating,
            FIELD_WIFI => &self.wifi_rating,
            FIELD_POWER => &self.power_rating,
            _ => "",
        }
    }
}

/// Per-field messages, in form order, plus an optional form-level message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: Vec<(&'static str, String)>,
    form: Option<String>,
}

impl FormErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.push((field, message.into()));
    }

    pub fn set_form_error(&mut self, message: impl Into<String>) {
        self.form = Some(message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn form_error(&self) -> Option<&str> {
        self.form.as_deref()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.form.is_none()
    }
}

/// Output of stage 1: every field present and well-formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCafe {
    pub name: String,
    pub location_url: String,
    pub opening_time: String,
    pub closing_time: String,
    pub coffee: Rating,
    pub wifi: Rating,
    pub power: Rating,
}

impl ValidatedCafe {
    /// Stage 2: normalize times and encode ratings for storage.
    pub fn into_record(self, choices: &RatingChoices) -> CafeRecord {
        CafeRecord {
            name: self.name,
            location_url: self.location_url,
            opening_time: normalize_time(&self.opening_time),
            closing_time: normalize_time(&self.closing_time),
            coffee_display: choices.label(self.coffee).to_string(),
            wifi_display: choices.label(self.wifi).to_string(),
            power_display: choices.label(self.power).to_string(),
        }
    }
}

/// Validation rules for the café form, built once from the rating choices.
#[derive(Debug, Clone)]
pub struct CafeForm {
    choices: Arc<RatingChoices>,
    rules: Vec<FieldRules>,
}

impl CafeForm {
    pub fn new(choices: Arc<RatingChoices>) -> Self {
        let time_check = || Check::Pattern {
            regex: time_regex(),
            message: TIME_FORMAT_MESSAGE,
        };
        let rating_check = |category| {
            Check::OneOf(
                choices
                    .choices(category)
                    .iter()
                    .map(|c| c.value.to_string())
                    .collect(),
            )
        };

        let rules = vec![
            FieldRules::new(FIELD_NAME).check(Check::Required),
            FieldRules::new(FIELD_LOCATION)
                .check(Check::Required)
                .check(Check::Url),
            FieldRules::new(FIELD_OPENING)
                .check(Check::Required)
                .check(time_check()),
            FieldRules::new(FIELD_CLOSING)
                .check(Check::Required)
                .check(time_check()),
            FieldRules::new(FIELD_COFFEE)
                .check(Check::Required)
                .check(rating_check(Category::Coffee)),
            FieldRules::new(FIELD_WIFI)
                .check(Check::Required)
                .check(rating_check(Category::Wifi)),
            FieldRules::new(FIELD_POWER)
                .check(Check::Required)
                .check(rating_check(Category::Power)),
        ];

        Self { choices, rules }
    }

    pub fn choices(&self) -> &RatingChoices {
        &self.choices
    }

    /// Stage 1. Every field is checked so that all problems are reported at
    /// once.
    pub fn validate(&self, submission: &CafeSubmission) -> Result<ValidatedCafe, FormErrors> {
        let mut errors = FormErrors::default();
        for rules in &self.rules {
            let value = submission.value(rules.field);
            if let Some(message) = rules.first_error(value) {
                errors.add(rules.field, message);
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let coffee = parse_rating(submission, FIELD_COFFEE, Category::Coffee);
        let wifi = parse_rating(submission, FIELD_WIFI, Category::Wifi);
        let power = parse_rating(submission, FIELD_POWER, Category::Power);

        match (coffee, wifi, power) {
            (Some(coffee), Some(wifi), Some(power)) => Ok(ValidatedCafe {
                name: submission.name.clone(),
                location_url: submission.location.clone(),
                opening_time: submission.opening.clone(),
                closing_time: submission.closing.clone(),
                coffee,
                wifi,
                power,
            }),
            (coffee, wifi, power) => {
                // Only reachable if the choice table and the rating domain disagree.
                for (field, rating) in [
                    (FIELD_COFFEE, coffee),
                    (FIELD_WIFI, wifi),
                    (FIELD_POWER, power),
                ] {
                    if rating.is_none() {
                        errors.add(field, crate::validate::CHOICE_MESSAGE);
                    }
                }
                Err(errors)
            }
        }
    }

    /// Both stages: the record to append, or the messages to show.
    pub fn submit(&self, submission: &CafeSubmission) -> Result<CafeRecord, FormErrors> {
        self.validate(submission)
            .map(|cafe| cafe.into_record(&self.choices))
    }
}

fn parse_rating(submission: &CafeSubmission, field: &str, category: Category) -> Option<Rating> {
    let value: u8 = submission.value(field).parse().ok()?;
    Rating::new(category, value)
}
