// ABOUTME: Review-before-advance requests raised by confirm-required steps

use super::field::FieldName;

/// Kind of value under review
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationKind {
    Email,
    /// Social handle shown behind an `@`
    Handle,
    /// Profile URL shown behind its fixed base path
    ProfileUrl,
}

impl ConfirmationKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Email => "Confirm Email Address",
            Self::Handle => "Confirm Instagram Username",
            Self::ProfileUrl => "Confirm LinkedIn Profile",
        }
    }

    /// What the user is asked to check, used in the dialog body
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Email => "email address",
            Self::Handle => "Instagram username",
            Self::ProfileUrl => "LinkedIn profile",
        }
    }

    /// Immutable prefix stripped from the request value and restored for display
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Email => "",
            Self::Handle => "@",
            Self::ProfileUrl => "linkedin.com/in/",
        }
    }
}

/// Declares that a step must be reviewed before it advances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmSpec {
    pub kind: ConfirmationKind,
    pub field: FieldName,
}

/// A pending review of one field value; at most one exists per wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationRequest {
    pub kind: ConfirmationKind,
    pub field: FieldName,
    /// Value with the kind's prefix removed
    pub value: String,
}

impl ConfirmationRequest {
    pub fn new(kind: ConfirmationKind, field: FieldName, raw: &str) -> Self {
        let trimmed = raw.trim();
        let value = trimmed.strip_prefix(kind.prefix()).unwrap_or(trimmed).to_string();
        Self { kind, field, value }
    }

    pub fn display_value(&self) -> String {
        format!("{}{}", self.kind.prefix(), self.value)
    }

    pub fn message(&self) -> String {
        format!(
            "Please confirm your {} for verification and account recovery.",
            self.kind.noun()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_prefix_round_trips_for_display() {
        let req = ConfirmationRequest::new(ConfirmationKind::Handle, "instagram", "@asha.rao");
        assert_eq!(req.value, "asha.rao");
        assert_eq!(req.display_value(), "@asha.rao");
    }

    #[test]
    fn test_profile_url_strips_base_path() {
        let req = ConfirmationRequest::new(
            ConfirmationKind::ProfileUrl,
            "linkedin",
            "linkedin.com/in/asharao",
        );
        assert_eq!(req.value, "asharao");
        assert_eq!(req.display_value(), "linkedin.com/in/asharao");
    }

    #[test]
    fn test_email_is_shown_verbatim() {
        let req = ConfirmationRequest::new(ConfirmationKind::Email, "email", " a@b.co ");
        assert_eq!(req.display_value(), "a@b.co");
        assert!(req.message().contains("email address"));
    }
}
