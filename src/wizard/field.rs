// ABOUTME: Field values collected by a wizard and the name-keyed map that holds them
// Values survive backward navigation; the map is the snapshot handed out on completion

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Name of a declared wizard field (e.g. "first_name", "otp")
pub type FieldName = &'static str;

/// One piece of user input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// Free text, possibly partial
    Text(String),
    /// Selected option out of an enumerated set
    Choice(String),
    /// Fixed-length digit code; `None` marks an empty slot
    Code(Vec<Option<char>>),
    /// Calendar date
    Date(NaiveDate),
}

impl FieldValue {
    /// Text content of `Text` and `Choice` values
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Choice(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Assembled string for code values, skipping empty slots
    pub fn code_string(&self) -> Option<String> {
        match self {
            Self::Code(slots) => Some(slots.iter().flatten().collect()),
            _ => None,
        }
    }
}

/// Field name to value mapping, lazily populated as steps are visited
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldMap(BTreeMap<String, FieldValue>);

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn set(&mut self, name: &str, value: FieldValue) {
        self.0.insert(name.to_string(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.0.remove(name)
    }

    /// Text of a field, or "" when unset or not textual
    pub fn text(&self, name: &str) -> &str {
        self.get(name).and_then(FieldValue::as_text).unwrap_or("")
    }

    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        self.get(name).and_then(FieldValue::as_date)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}
