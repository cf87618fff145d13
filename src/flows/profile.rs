// ABOUTME: Seven-step profile intake wizard and the profile document it produces
// Name, gender, birth date, locations, then email/Instagram/LinkedIn with review detours

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ProfileConfig;
use crate::wizard::{
    age_on, BoundInput, ChoiceInput, ConfirmationKind, DateInput, FieldInput, FieldMap,
    PrefixedInput, StepDescriptor, TextInput, Validator,
};

use super::FlowDefinition;

pub const TITLE: &str = "title";
pub const FIRST_NAME: &str = "first_name";
pub const LAST_NAME: &str = "last_name";
pub const GENDER: &str = "gender";
pub const GENDER_CUSTOM: &str = "gender_custom";
pub const DOB: &str = "dob";
pub const CURRENT_LOCATION: &str = "current_location";
pub const HOME_LOCATION: &str = "home_location";
pub const EMAIL: &str = "email";
pub const INSTAGRAM: &str = "instagram";
pub const LINKEDIN: &str = "linkedin";

pub const TITLES: &[&str] = &["Mr", "Mrs", "Miss", "Ms"];
pub const GENDERS: &[&str] = &["Woman", "Man", "Non-binary", "Other"];
pub const GENDER_OTHER: &str = "Other";

pub const INSTAGRAM_PREFIX: &str = "@";
pub const LINKEDIN_PREFIX: &str = "linkedin.com/in/";

pub fn definition(config: &ProfileConfig, today: NaiveDate) -> FlowDefinition {
    let steps = vec![
        StepDescriptor::new("name", "What's your name?", Validator::NonEmpty(&[FIRST_NAME, LAST_NAME])),
        StepDescriptor::new(
            "gender",
            "Which gender best describes you?",
            Validator::ChoiceWithOther {
                field: GENDER,
                other_option: GENDER_OTHER,
                other_field: GENDER_CUSTOM,
            },
        ),
        StepDescriptor::new(
            "dob",
            "What's your date of birth?",
            Validator::MinimumAge {
                field: DOB,
                years: config.minimum_age,
            },
        ),
        StepDescriptor::new(
            "location",
            "Where do you live?",
            Validator::NonEmpty(&[CURRENT_LOCATION, HOME_LOCATION]),
        ),
        StepDescriptor::new("email", "What's your email?", Validator::Email { field: EMAIL })
            .confirm(ConfirmationKind::Email, EMAIL),
        StepDescriptor::new(
            "instagram",
            "Your Instagram",
            Validator::BeyondPrefix {
                field: INSTAGRAM,
                prefix: INSTAGRAM_PREFIX,
            },
        )
        .confirm(ConfirmationKind::Handle, INSTAGRAM),
        StepDescriptor::new(
            "linkedin",
            "Your LinkedIn",
            Validator::BeyondPrefix {
                field: LINKEDIN,
                prefix: LINKEDIN_PREFIX,
            },
        )
        .confirm(ConfirmationKind::ProfileUrl, LINKEDIN),
    ];

    let layouts = vec![
        vec![
            BoundInput::new(TITLE, "Title", FieldInput::Choice(ChoiceInput::preselected(TITLES))),
            BoundInput::new(FIRST_NAME, "First name", FieldInput::Text(TextInput::new())),
            BoundInput::new(LAST_NAME, "Last name", FieldInput::Text(TextInput::new())),
        ],
        vec![
            BoundInput::new(GENDER, "Gender", FieldInput::Choice(ChoiceInput::new(GENDERS))),
            BoundInput::new(GENDER_CUSTOM, "Your gender", FieldInput::Text(TextInput::new()))
                .shown_when(GENDER, GENDER_OTHER),
        ],
        vec![BoundInput::new(
            DOB,
            "Date of birth",
            FieldInput::Date(DateInput::starting(today)),
        )],
        vec![
            BoundInput::new(CURRENT_LOCATION, "Current location", FieldInput::Text(TextInput::new())),
            BoundInput::new(HOME_LOCATION, "Home town", FieldInput::Text(TextInput::new())),
        ],
        vec![BoundInput::new(EMAIL, "Email", FieldInput::Text(TextInput::new()))],
        vec![BoundInput::new(
            INSTAGRAM,
            "Instagram username",
            FieldInput::Prefixed(PrefixedInput::new(INSTAGRAM_PREFIX)),
        )],
        vec![BoundInput::new(
            LINKEDIN,
            "LinkedIn profile",
            FieldInput::Prefixed(PrefixedInput::new(LINKEDIN_PREFIX)),
        )],
    ];

    FlowDefinition {
        name: "profile",
        steps,
        layouts,
    }
}

/// Profile document stored under `users/<uid>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub dob: NaiveDate,
    pub current_location: String,
    pub home_location: String,
    pub email: String,
    pub instagram_username: String,
    pub linked_in_username: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ProfileRecord {
    /// Build the document from a completed intake snapshot. Returns `None`
    /// when the birth date is missing.
    pub fn from_fields(fields: &FieldMap, phone_number: &str) -> Option<Self> {
        let gender = match fields.text(GENDER) {
            GENDER_OTHER => fields.text(GENDER_CUSTOM).trim().to_string(),
            other => other.to_string(),
        };

        Some(Self {
            title: fields.text(TITLE).to_string(),
            first_name: fields.text(FIRST_NAME).trim().to_string(),
            last_name: fields.text(LAST_NAME).trim().to_string(),
            gender,
            dob: fields.date(DOB)?,
            current_location: fields.text(CURRENT_LOCATION).trim().to_string(),
            home_location: fields.text(HOME_LOCATION).trim().to_string(),
            email: fields.text(EMAIL).trim().to_string(),
            instagram_username: unless_bare(fields.text(INSTAGRAM), INSTAGRAM_PREFIX),
            linked_in_username: unless_bare(fields.text(LINKEDIN), LINKEDIN_PREFIX),
            phone_number: phone_number.to_string(),
            bio: None,
            created_at: Utc::now(),
        })
    }

    pub fn age_on(&self, today: NaiveDate) -> i32 {
        age_on(self.dob, today)
    }

    /// "First, Last, Age" headline
    pub fn headline(&self, today: NaiveDate) -> String {
        let mut parts = vec![self.first_name.clone()];
        if !self.last_name.is_empty() {
            parts.push(self.last_name.clone());
        }
        parts.push(self.age_on(today).to_string());
        parts.join(", ")
    }
}

fn unless_bare(value: &str, prefix: &str) -> String {
    let value = value.trim();
    if value == prefix {
        String::new()
    } else {
        value.to_string()
    }
}
