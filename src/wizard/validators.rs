// ABOUTME: Pure per-step predicates over wizard field values
// Declared alongside each step; the engine only ever asks whether they pass

use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

use super::field::{FieldMap, FieldName, FieldValue};

lazy_static! {
    static ref EMAIL_SHAPE: Regex = Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles");
}

/// The closed set of step validators
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validator {
    /// Informational steps with nothing to check
    Always,
    /// Exactly `len` decimal digits, from a text field or a slot sequence
    DigitCode { field: FieldName, len: usize },
    /// Every listed field holds non-blank text
    NonEmpty(&'static [FieldName]),
    /// A choice is made, and picking `other_option` also requires `other_field`
    ChoiceWithOther {
        field: FieldName,
        other_option: &'static str,
        other_field: FieldName,
    },
    /// Date of birth at least `years` old on the evaluation day
    MinimumAge { field: FieldName, years: i32 },
    /// Basic `x@y.z` shape
    Email { field: FieldName },
    /// Something follows the immutable `prefix`
    BeyondPrefix { field: FieldName, prefix: &'static str },
}

impl Validator {
    /// Evaluate against the current field values; `today` anchors age checks
    pub fn check(&self, fields: &FieldMap, today: NaiveDate) -> bool {
        match self {
            Self::Always => true,
            Self::DigitCode { field, len } => match fields.get(field) {
                Some(FieldValue::Text(s)) => is_digit_string(s, *len),
                Some(FieldValue::Code(slots)) => is_complete_code(slots, *len),
                _ => false,
            },
            Self::NonEmpty(names) => names.iter().all(|n| !fields.text(n).trim().is_empty()),
            Self::ChoiceWithOther {
                field,
                other_option,
                other_field,
            } => {
                let selected = fields.text(field);
                !selected.is_empty()
                    && (selected != *other_option || !fields.text(other_field).trim().is_empty())
            }
            Self::MinimumAge { field, years } => fields
                .date(field)
                .is_some_and(|dob| age_on(dob, today) >= *years),
            Self::Email { field } => {
                let email = fields.text(field);
                !email.trim().is_empty() && EMAIL_SHAPE.is_match(email)
            }
            Self::BeyondPrefix { field, prefix } => has_content_beyond(fields.text(field), prefix),
        }
    }

    /// Fields this validator reads
    pub fn fields(&self) -> Vec<FieldName> {
        match self {
            Self::Always => Vec::new(),
            Self::NonEmpty(names) => names.to_vec(),
            Self::ChoiceWithOther {
                field, other_field, ..
            } => vec![*field, *other_field],
            Self::DigitCode { field, .. }
            | Self::MinimumAge { field, .. }
            | Self::Email { field }
            | Self::BeyondPrefix { field, .. } => vec![*field],
        }
    }
}

/// Whole years between `dob` and `today` by calendar difference
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

fn is_digit_string(s: &str, len: usize) -> bool {
    s.len() == len && s.chars().all(|c| c.is_ascii_digit())
}

fn is_complete_code(slots: &[Option<char>], len: usize) -> bool {
    slots.len() == len && slots.iter().all(|s| s.is_some_and(|c| c.is_ascii_digit()))
}

fn has_content_beyond(value: &str, prefix: &str) -> bool {
    value
        .trim()
        .strip_prefix(prefix)
        .is_some_and(|rest| !rest.trim().is_empty())
}
