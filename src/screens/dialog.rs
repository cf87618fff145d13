// ABOUTME: Two-button confirmation dialog model shared by review detours and prompts
// Rendering lives in components::confirmation_dialog

use crate::app::events::AppEvent;
use crate::wizard::ConfirmationRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationDialog {
    pub title: String,
    pub message: String,
    /// Highlighted value under review, if any
    pub detail: Option<String>,
    pub yes_label: &'static str,
    pub no_label: &'static str,
    pub selected_option: bool, // true = yes
}

impl ConfirmationDialog {
    /// Yes/No prompt defaulting to "No"
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            detail: None,
            yes_label: "Yes",
            no_label: "No",
            selected_option: false,
        }
    }

    /// Review of a value entered on a confirm-required step
    pub fn review(request: &ConfirmationRequest) -> Self {
        Self {
            title: request.kind.title().to_string(),
            message: request.message(),
            detail: Some(request.display_value()),
            yes_label: "Confirm",
            no_label: "Edit",
            selected_option: true,
        }
    }

    pub fn with_labels(mut self, yes: &'static str, no: &'static str) -> Self {
        self.yes_label = yes;
        self.no_label = no;
        self
    }

    pub fn preselect(mut self, yes: bool) -> Self {
        self.selected_option = yes;
        self
    }

    pub fn toggle(&mut self) {
        self.selected_option = !self.selected_option;
    }

    /// Feed one event. Returns the answer once the user picks a button;
    /// Esc always answers "no".
    pub fn handle(&mut self, event: &AppEvent) -> Option<bool> {
        match event {
            AppEvent::Left | AppEvent::Right | AppEvent::NextField | AppEvent::PrevField => {
                self.toggle();
                None
            }
            AppEvent::Submit => Some(self.selected_option),
            AppEvent::Char('y') | AppEvent::Char('Y') => Some(true),
            AppEvent::Char('n') | AppEvent::Char('N') | AppEvent::Back => Some(false),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::ConfirmationKind;

    #[test]
    fn test_review_dialog_shows_prefixed_value() {
        let request = ConfirmationRequest::new(ConfirmationKind::Handle, "instagram", "@asha.rao");
        let dialog = ConfirmationDialog::review(&request);
        assert_eq!(dialog.title, "Confirm Instagram Username");
        assert_eq!(dialog.detail.as_deref(), Some("@asha.rao"));
        assert!(dialog.selected_option);
    }

    #[test]
    fn test_toggle_then_submit() {
        let mut dialog = ConfirmationDialog::new("Delete Account", "Are you sure?");
        assert_eq!(dialog.handle(&AppEvent::Down), None);
        assert_eq!(dialog.handle(&AppEvent::Submit), Some(false));
        dialog.handle(&AppEvent::Right);
        assert_eq!(dialog.handle(&AppEvent::Submit), Some(true));
    }

    #[test]
    fn test_escape_rejects() {
        let mut dialog = ConfirmationDialog::new("t", "m").preselect(true);
        assert_eq!(dialog.handle(&AppEvent::Back), Some(false));
        assert_eq!(dialog.handle(&AppEvent::Char('y')), Some(true));
    }
}
