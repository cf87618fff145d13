// ABOUTME: Binds a wizard to its per-step input adapters and the review dialog
// Keystrokes edit the focused input, whose value is pushed into the wizard immediately

use tracing::debug;

use crate::app::events::AppEvent;
use crate::flows::FlowDefinition;
use crate::wizard::{
    AdvanceOutcome, BoundInput, Clock, ConfirmationRequest, FieldInput, FieldMap, FieldName,
    FieldValue, ResolveOutcome, RetreatOutcome, StepChange, StepEffect, Wizard, WizardError,
};

use super::dialog::ConfirmationDialog;

/// What a handled event did to the wizard, for the owning screen to act on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSignal {
    None,
    Moved(StepChange),
    /// A review dialog was opened
    Reviewing(ConfirmationRequest),
    /// Back from the first step
    Exit,
    Complete(FieldMap),
}

#[derive(Debug)]
pub struct FormBinding {
    wizard: Wizard,
    layouts: Vec<Vec<BoundInput>>,
    pristine: Vec<Vec<BoundInput>>,
    /// Index into the visible inputs of the current step
    focus: usize,
    review: Option<ConfirmationDialog>,
}

impl FormBinding {
    pub fn new(definition: FlowDefinition, clock: Clock) -> Result<Self, WizardError> {
        let (wizard, layouts) = definition.into_parts()?;
        let mut binding = Self {
            wizard: wizard.with_shared_clock(clock),
            pristine: layouts.clone(),
            layouts,
            focus: 0,
            review: None,
        };
        binding.seed();
        Ok(binding)
    }

    /// Inputs that start out holding a value (preselected choices, prefixes)
    /// publish it right away
    fn seed(&mut self) {
        for layout in &self.layouts {
            for bound in layout {
                if let Some(value) = bound.input.value() {
                    self.wizard.set_field(bound.field, value);
                }
            }
        }
        self.reset_hidden();
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    /// Effects of entering step one, applied by the screen on mount
    pub fn entry_effects(&self) -> Vec<StepEffect> {
        self.wizard.entry_effects()
    }

    pub fn review(&self) -> Option<&ConfirmationDialog> {
        self.review.as_ref()
    }

    /// Set a field the screen manages itself (no bound input)
    pub fn set_field(&mut self, name: FieldName, value: FieldValue) {
        self.wizard.set_field(name, value);
    }

    fn step_index(&self) -> usize {
        self.wizard.step() - 1
    }

    fn is_visible(&self, bound: &BoundInput) -> bool {
        match bound.visible_when {
            None => true,
            Some((field, choice)) => self.wizard.fields().text(field) == choice,
        }
    }

    /// Inputs shown on the current step, in layout order
    pub fn visible_inputs(&self) -> Vec<&BoundInput> {
        self.layouts[self.step_index()]
            .iter()
            .filter(|b| self.is_visible(b))
            .collect()
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused_input(&self) -> Option<&BoundInput> {
        self.visible_inputs().get(self.focus).copied()
    }

    fn focused_layout_index(&self) -> Option<usize> {
        self.layouts[self.step_index()]
            .iter()
            .enumerate()
            .filter(|(_, b)| self.is_visible(b))
            .nth(self.focus)
            .map(|(i, _)| i)
    }

    pub fn move_focus(&mut self, delta: i32) {
        let count = self.visible_inputs().len() as i32;
        if count > 0 {
            self.focus = (self.focus as i32 + delta).rem_euclid(count) as usize;
        }
    }

    /// Apply `edit` to the focused input and publish the resulting value
    fn edit<R>(&mut self, edit: impl FnOnce(&mut FieldInput) -> R) -> Option<R> {
        let index = self.focused_layout_index()?;
        let step = self.step_index();
        let bound = &mut self.layouts[step][index];
        let result = edit(&mut bound.input);
        let field = bound.field;
        match bound.input.value() {
            Some(value) => self.wizard.set_field(field, value),
            None => self.wizard.clear_field(field),
        }
        self.reset_hidden();
        Some(result)
    }

    /// Inputs whose condition no longer holds lose their value
    fn reset_hidden(&mut self) {
        let step = self.step_index();
        for index in 0..self.layouts[step].len() {
            let Some((field, choice)) = self.layouts[step][index].visible_when else {
                continue;
            };
            if self.wizard.fields().text(field) == choice {
                continue;
            }
            if self.layouts[step][index] != self.pristine[step][index] {
                self.layouts[step][index] = self.pristine[step][index].clone();
            }
            let hidden = self.layouts[step][index].field;
            self.wizard.clear_field(hidden);
        }
        let count = self.visible_inputs().len();
        if self.focus >= count {
            self.focus = count.saturating_sub(1);
        }
    }

    pub fn advance(&mut self) -> FormSignal {
        match self.wizard.advance() {
            AdvanceOutcome::Blocked => FormSignal::None,
            AdvanceOutcome::ConfirmationRequested(request) => {
                self.review = Some(ConfirmationDialog::review(&request));
                FormSignal::Reviewing(request)
            }
            AdvanceOutcome::Moved(change) => {
                self.focus = 0;
                FormSignal::Moved(change)
            }
            AdvanceOutcome::Complete(fields) => FormSignal::Complete(fields),
        }
    }

    pub fn retreat(&mut self) -> FormSignal {
        match self.wizard.retreat() {
            RetreatOutcome::Moved(change) => {
                self.focus = 0;
                FormSignal::Moved(change)
            }
            RetreatOutcome::Exit => FormSignal::Exit,
            RetreatOutcome::Blocked => FormSignal::None,
        }
    }

    pub fn resolve(&mut self, accept: bool) -> FormSignal {
        self.review = None;
        match self.wizard.resolve_confirmation(accept) {
            ResolveOutcome::NoPending | ResolveOutcome::Rejected => FormSignal::None,
            ResolveOutcome::Moved(change) => {
                self.focus = 0;
                FormSignal::Moved(change)
            }
            ResolveOutcome::Complete(fields) => FormSignal::Complete(fields),
        }
    }

    /// Route one key to the review dialog when open, otherwise to the
    /// focused input or the wizard
    pub fn handle_event(&mut self, event: &AppEvent) -> FormSignal {
        if let Some(dialog) = self.review.as_mut() {
            return match dialog.handle(event) {
                Some(accept) => self.resolve(accept),
                None => FormSignal::None,
            };
        }

        match event {
            AppEvent::Submit => self.advance(),
            AppEvent::Back => self.retreat(),
            AppEvent::Char(c) => {
                self.edit(|input| input.input_char(*c));
                FormSignal::None
            }
            AppEvent::Backspace => {
                self.edit(FieldInput::backspace);
                FormSignal::None
            }
            AppEvent::Up | AppEvent::Down => {
                let down = *event == AppEvent::Down;
                self.edit(|input| {
                    // Date wheels count up with Up; option lists move down with Down
                    let delta = match (&*input, down) {
                        (FieldInput::Date(_), false) | (FieldInput::Choice(_), true) => 1,
                        _ => -1,
                    };
                    input.cycle(delta);
                });
                FormSignal::None
            }
            AppEvent::Left | AppEvent::Right => {
                let delta = if *event == AppEvent::Right { 1 } else { -1 };
                let handled = self.edit(|input| input.shift(delta)).unwrap_or(false);
                if !handled {
                    self.move_focus(delta);
                }
                FormSignal::None
            }
            AppEvent::NextField => {
                self.move_focus(1);
                FormSignal::None
            }
            AppEvent::PrevField => {
                self.move_focus(-1);
                FormSignal::None
            }
            AppEvent::Quit => {
                debug!(wizard = self.wizard.name(), "quit ignored by form");
                FormSignal::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::flows::profile::{self, GENDER, GENDER_CUSTOM, TITLE};
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn profile_form() -> FormBinding {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let definition = profile::definition(&AppConfig::default().profile, today);
        FormBinding::new(definition, Arc::new(move || today)).unwrap()
    }

    fn type_text(form: &mut FormBinding, text: &str) {
        for c in text.chars() {
            form.handle_event(&AppEvent::Char(c));
        }
    }

    #[test]
    fn test_preselected_title_is_published() {
        let form = profile_form();
        assert_eq!(form.wizard().fields().text(TITLE), "Mr");
        assert_eq!(form.visible_inputs().len(), 3);
    }

    #[test]
    fn test_name_step_via_keys() {
        let mut form = profile_form();
        form.handle_event(&AppEvent::NextField);
        type_text(&mut form, "Asha");
        assert_eq!(form.handle_event(&AppEvent::Submit), FormSignal::None);
        form.handle_event(&AppEvent::NextField);
        type_text(&mut form, "Rao");
        assert!(matches!(form.handle_event(&AppEvent::Submit), FormSignal::Moved(_)));
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn test_other_gender_reveals_and_clears_custom_field() {
        let mut form = profile_form();
        form.handle_event(&AppEvent::NextField);
        type_text(&mut form, "Asha");
        form.handle_event(&AppEvent::NextField);
        type_text(&mut form, "Rao");
        form.handle_event(&AppEvent::Submit);

        // Up from no selection wraps to the last option, "Other"
        form.handle_event(&AppEvent::Up);
        assert_eq!(form.wizard().fields().text(GENDER), "Other");
        assert_eq!(form.visible_inputs().len(), 2);
        assert!(!form.wizard().can_advance());

        form.handle_event(&AppEvent::NextField);
        type_text(&mut form, "Agender");
        assert!(form.wizard().can_advance());

        form.handle_event(&AppEvent::PrevField);
        form.handle_event(&AppEvent::Down);
        assert_eq!(form.wizard().fields().text(GENDER), "Woman");
        assert!(form.wizard().fields().get(GENDER_CUSTOM).is_none());
        assert_eq!(form.visible_inputs().len(), 1);

        // Back to Other: the custom text starts empty again
        form.handle_event(&AppEvent::Up);
        assert_eq!(form.wizard().fields().text(GENDER_CUSTOM), "");
        assert!(!form.wizard().can_advance());
    }

    #[test]
    fn test_review_dialog_intercepts_keys() {
        let mut form = profile_form();
        for (name, value) in [
            ("first_name", "Asha"),
            ("last_name", "Rao"),
            ("current_location", "Bengaluru"),
            ("home_location", "Mysuru"),
            ("email", "asha@luyona.app"),
        ] {
            form.set_field(name, FieldValue::Text(value.to_string()));
        }
        form.set_field(GENDER, FieldValue::Choice("Woman".into()));
        form.set_field(
            "dob",
            FieldValue::Date(NaiveDate::from_ymd_opt(1996, 3, 14).unwrap()),
        );
        for _ in 0..4 {
            assert!(matches!(form.advance(), FormSignal::Moved(_)));
        }

        assert!(matches!(form.handle_event(&AppEvent::Submit), FormSignal::Reviewing(_)));
        assert!(form.review().is_some());
        // Typing goes to the dialog, not the email input
        form.handle_event(&AppEvent::Char('x'));
        assert_eq!(form.wizard().fields().text("email"), "asha@luyona.app");

        assert_eq!(form.handle_event(&AppEvent::Back), FormSignal::None);
        assert!(form.review().is_none());
        assert_eq!(form.wizard().step(), 5);

        form.handle_event(&AppEvent::Submit);
        assert!(matches!(form.handle_event(&AppEvent::Submit), FormSignal::Moved(_)));
        assert_eq!(form.wizard().step(), 6);
    }
}
