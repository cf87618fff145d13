// ABOUTME: Generic stepped form wizard engine
// Drives step transitions from an ordered list of step descriptors and never
// moves forward on data its validator rejects

use std::fmt;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info};

use super::confirmation::{ConfirmSpec, ConfirmationKind, ConfirmationRequest};
use super::field::{FieldMap, FieldName, FieldValue};
use super::validators::Validator;

/// Errors raised while building a wizard
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("wizard '{0}' declares no steps")]
    NoSteps(&'static str),
}

/// Side effects a step asks its host to perform when it is entered or left.
/// The engine only reports them; the owning screen carries them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepEffect {
    /// Reset the resend countdown to its initial value and start ticking
    RestartCountdown,
    /// Stop ticking the resend countdown
    StopCountdown,
}

/// Per-step enter/exit effects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepHooks {
    pub on_enter: Vec<StepEffect>,
    pub on_exit: Vec<StepEffect>,
}

/// One declared step: its validator, optional review detour and hooks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepDescriptor {
    pub id: &'static str,
    pub title: &'static str,
    pub validator: Validator,
    pub confirm: Option<ConfirmSpec>,
    pub hooks: StepHooks,
}

impl StepDescriptor {
    pub fn new(id: &'static str, title: &'static str, validator: Validator) -> Self {
        Self {
            id,
            title,
            validator,
            confirm: None,
            hooks: StepHooks::default(),
        }
    }

    /// Require a review of `field` before this step advances
    pub fn confirm(mut self, kind: ConfirmationKind, field: FieldName) -> Self {
        self.confirm = Some(ConfirmSpec { kind, field });
        self
    }

    pub fn on_enter(mut self, effect: StepEffect) -> Self {
        self.hooks.on_enter.push(effect);
        self
    }

    pub fn on_exit(mut self, effect: StepEffect) -> Self {
        self.hooks.on_exit.push(effect);
        self
    }
}

/// Where the wizard currently is. Step indices are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardPhase {
    Editing(usize),
    /// Review detour on a confirm-required step
    Confirming(usize),
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// A committed move between two steps plus the effects of leaving and entering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepChange {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
    pub effects: Vec<StepEffect>,
}

/// Result of [`Wizard::advance`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Validation failed or the wizard is already complete; nothing changed
    Blocked,
    /// The step needs a review before it can advance
    ConfirmationRequested(ConfirmationRequest),
    Moved(StepChange),
    /// The last step advanced; carries the final field snapshot
    Complete(FieldMap),
}

/// Result of [`Wizard::retreat`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetreatOutcome {
    Moved(StepChange),
    /// Retreat from the first step; the host should leave the screen
    Exit,
    /// A review is pending or the wizard is complete
    Blocked,
}

/// Result of [`Wizard::resolve_confirmation`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveOutcome {
    NoPending,
    /// Request discarded, still editing the same step
    Rejected,
    Moved(StepChange),
    Complete(FieldMap),
}

/// Observable view of the wizard published after every mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardSnapshot {
    pub phase: WizardPhase,
    pub step: usize,
    pub total: usize,
    pub can_advance: bool,
}

/// Mutable wizard data, owned by exactly one screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardState {
    pub step: usize,
    pub fields: FieldMap,
    pub pending: Option<ConfirmationRequest>,
    pub complete: bool,
}

/// Source of "today" for age checks
pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

/// Stepped form wizard
pub struct Wizard {
    name: &'static str,
    steps: Vec<StepDescriptor>,
    state: WizardState,
    clock: Clock,
    notifier: watch::Sender<WizardSnapshot>,
}

impl fmt::Debug for Wizard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wizard")
            .field("name", &self.name)
            .field("steps", &self.steps.len())
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Wizard {
    pub fn new(name: &'static str, steps: Vec<StepDescriptor>) -> Result<Self, WizardError> {
        if steps.is_empty() {
            return Err(WizardError::NoSteps(name));
        }
        let state = WizardState {
            step: 1,
            ..WizardState::default()
        };
        let initial = WizardSnapshot {
            phase: WizardPhase::Editing(1),
            step: 1,
            total: steps.len(),
            can_advance: false,
        };
        let (notifier, _) = watch::channel(initial);
        let mut wizard = Self {
            name,
            steps,
            state,
            clock: Arc::new(|| Local::now().date_naive()),
            notifier,
        };
        wizard.notify();
        Ok(wizard)
    }

    /// Replace the date source used by age validators
    pub fn with_clock(self, clock: impl Fn() -> NaiveDate + Send + Sync + 'static) -> Self {
        self.with_shared_clock(Arc::new(clock))
    }

    pub fn with_shared_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self.notify();
        self
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn total(&self) -> usize {
        self.steps.len()
    }

    /// Current 1-based step index
    pub fn step(&self) -> usize {
        self.state.step
    }

    pub fn current(&self) -> &StepDescriptor {
        &self.steps[self.state.step - 1]
    }

    pub fn steps(&self) -> &[StepDescriptor] {
        &self.steps
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn fields(&self) -> &FieldMap {
        &self.state.fields
    }

    pub fn pending(&self) -> Option<&ConfirmationRequest> {
        self.state.pending.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.state.complete
    }

    pub fn phase(&self) -> WizardPhase {
        if self.state.complete {
            WizardPhase::Complete
        } else if self.state.pending.is_some() {
            WizardPhase::Confirming(self.state.step)
        } else {
            WizardPhase::Editing(self.state.step)
        }
    }

    /// Fraction of the wizard reached, counting the current step
    pub fn progress(&self) -> f64 {
        self.state.step as f64 / self.steps.len() as f64
    }

    /// Whether the current step's validator accepts the current values
    pub fn can_advance(&self) -> bool {
        let today = (self.clock)();
        self.current().validator.check(&self.state.fields, today)
    }

    /// Effects of entering the first step, for the host to apply on mount
    pub fn entry_effects(&self) -> Vec<StepEffect> {
        self.steps[0].hooks.on_enter.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<WizardSnapshot> {
        self.notifier.subscribe()
    }

    pub fn snapshot(&self) -> WizardSnapshot {
        WizardSnapshot {
            phase: self.phase(),
            step: self.state.step,
            total: self.steps.len(),
            can_advance: !self.state.complete && self.can_advance(),
        }
    }

    /// Update one field. Never moves the step and never fails.
    pub fn set_field(&mut self, name: FieldName, value: FieldValue) {
        debug!(wizard = self.name, field = name, "field updated");
        self.state.fields.set(name, value);
        self.notify();
    }

    pub fn clear_field(&mut self, name: FieldName) {
        if self.state.fields.remove(name).is_some() {
            self.notify();
        }
    }

    pub fn advance(&mut self) -> AdvanceOutcome {
        match self.phase() {
            WizardPhase::Complete => return AdvanceOutcome::Blocked,
            WizardPhase::Confirming(_) => {
                if let Some(request) = &self.state.pending {
                    return AdvanceOutcome::ConfirmationRequested(request.clone());
                }
            }
            WizardPhase::Editing(_) => {}
        }

        if !self.can_advance() {
            debug!(wizard = self.name, step = self.state.step, "advance blocked by validation");
            return AdvanceOutcome::Blocked;
        }

        if let Some(spec) = self.current().confirm {
            let request =
                ConfirmationRequest::new(spec.kind, spec.field, self.state.fields.text(spec.field));
            info!(
                wizard = self.name,
                step = self.state.step,
                kind = ?spec.kind,
                "confirmation requested"
            );
            self.state.pending = Some(request.clone());
            self.notify();
            return AdvanceOutcome::ConfirmationRequested(request);
        }

        self.commit_forward()
    }

    pub fn retreat(&mut self) -> RetreatOutcome {
        match self.phase() {
            WizardPhase::Complete | WizardPhase::Confirming(_) => RetreatOutcome::Blocked,
            WizardPhase::Editing(1) => {
                info!(wizard = self.name, "retreat from first step, exiting");
                RetreatOutcome::Exit
            }
            WizardPhase::Editing(from) => {
                let to = from - 1;
                let change = self.transition(from, to, Direction::Backward);
                self.state.step = to;
                self.notify();
                RetreatOutcome::Moved(change)
            }
        }
    }

    /// Accept or reject the pending review. Accepting performs the deferred
    /// advance; rejecting leaves the step and its values untouched.
    pub fn resolve_confirmation(&mut self, accept: bool) -> ResolveOutcome {
        let Some(request) = self.state.pending.take() else {
            return ResolveOutcome::NoPending;
        };
        info!(wizard = self.name, kind = ?request.kind, accept, "confirmation resolved");

        if !accept {
            self.notify();
            return ResolveOutcome::Rejected;
        }

        match self.commit_forward() {
            AdvanceOutcome::Moved(change) => ResolveOutcome::Moved(change),
            AdvanceOutcome::Complete(fields) => ResolveOutcome::Complete(fields),
            AdvanceOutcome::Blocked | AdvanceOutcome::ConfirmationRequested(_) => {
                ResolveOutcome::Rejected
            }
        }
    }

    fn commit_forward(&mut self) -> AdvanceOutcome {
        let from = self.state.step;
        if from == self.steps.len() {
            self.state.complete = true;
            info!(wizard = self.name, fields = self.state.fields.len(), "wizard complete");
            self.notify();
            return AdvanceOutcome::Complete(self.state.fields.clone());
        }

        let to = from + 1;
        let change = self.transition(from, to, Direction::Forward);
        self.state.step = to;
        info!(wizard = self.name, from, to, "step advanced");
        self.notify();
        AdvanceOutcome::Moved(change)
    }

    fn transition(&self, from: usize, to: usize, direction: Direction) -> StepChange {
        let mut effects = self.steps[from - 1].hooks.on_exit.clone();
        effects.extend(self.steps[to - 1].hooks.on_enter.iter().copied());
        StepChange {
            from,
            to,
            direction,
            effects,
        }
    }

    fn notify(&mut self) {
        let snapshot = self.snapshot();
        self.notifier.send_replace(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> FieldValue {
        FieldValue::Text(s.to_string())
    }

    fn sample() -> Wizard {
        Wizard::new(
            "sample",
            vec![
                StepDescriptor::new("name", "Name", Validator::NonEmpty(&["name"])),
                StepDescriptor::new("email", "Email", Validator::Email { field: "email" })
                    .confirm(ConfirmationKind::Email, "email"),
                StepDescriptor::new("code", "Code", Validator::DigitCode { field: "code", len: 4 })
                    .on_enter(StepEffect::RestartCountdown)
                    .on_exit(StepEffect::StopCountdown),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_empty_wizard_is_rejected() {
        assert!(matches!(Wizard::new("none", vec![]), Err(WizardError::NoSteps("none"))));
    }

    #[test]
    fn test_initial_state_is_editing_first_step() {
        let wizard = sample();
        assert_eq!(wizard.phase(), WizardPhase::Editing(1));
        assert_eq!(wizard.total(), 3);
        assert!(!wizard.can_advance());
    }

    #[test]
    fn test_advance_blocked_on_invalid_data() {
        let mut wizard = sample();
        assert_eq!(wizard.advance(), AdvanceOutcome::Blocked);
        wizard.set_field("name", text("   "));
        assert_eq!(wizard.advance(), AdvanceOutcome::Blocked);
        assert_eq!(wizard.step(), 1);
    }

    #[test]
    fn test_set_field_never_advances() {
        let mut wizard = sample();
        wizard.set_field("name", text("Asha"));
        assert_eq!(wizard.step(), 1);
        assert!(wizard.can_advance());
    }

    #[test]
    fn test_confirm_required_step_detours() {
        let mut wizard = sample();
        wizard.set_field("name", text("Asha"));
        wizard.advance();
        wizard.set_field("email", text("asha@luyona.app"));

        let outcome = wizard.advance();
        let AdvanceOutcome::ConfirmationRequested(request) = outcome else {
            panic!("expected confirmation");
        };
        assert_eq!(request.value, "asha@luyona.app");
        assert_eq!(wizard.phase(), WizardPhase::Confirming(2));
        assert_eq!(wizard.step(), 2);

        // Advancing again while confirming only re-surfaces the request
        assert!(matches!(wizard.advance(), AdvanceOutcome::ConfirmationRequested(_)));
        assert_eq!(wizard.retreat(), RetreatOutcome::Blocked);
    }

    #[test]
    fn test_reject_keeps_step_and_value() {
        let mut wizard = sample();
        wizard.set_field("name", text("Asha"));
        wizard.advance();
        wizard.set_field("email", text("asha@luyona.app"));
        wizard.advance();

        assert_eq!(wizard.resolve_confirmation(false), ResolveOutcome::Rejected);
        assert_eq!(wizard.phase(), WizardPhase::Editing(2));
        assert_eq!(wizard.fields().text("email"), "asha@luyona.app");
    }

    #[test]
    fn test_accept_performs_deferred_advance_with_enter_effects() {
        let mut wizard = sample();
        wizard.set_field("name", text("Asha"));
        wizard.advance();
        wizard.set_field("email", text("asha@luyona.app"));
        wizard.advance();

        let outcome = wizard.resolve_confirmation(true);
        assert_eq!(
            outcome,
            ResolveOutcome::Moved(StepChange {
                from: 2,
                to: 3,
                direction: Direction::Forward,
                effects: vec![StepEffect::RestartCountdown],
            })
        );
        assert_eq!(wizard.resolve_confirmation(true), ResolveOutcome::NoPending);
    }

    #[test]
    fn test_last_step_completes_with_snapshot() {
        let mut wizard = sample();
        wizard.set_field("name", text("Asha"));
        wizard.advance();
        wizard.set_field("email", text("asha@luyona.app"));
        wizard.advance();
        wizard.resolve_confirmation(true);
        wizard.set_field("code", text("1234"));

        let AdvanceOutcome::Complete(fields) = wizard.advance() else {
            panic!("expected completion");
        };
        assert_eq!(fields.text("name"), "Asha");
        assert_eq!(fields.text("code"), "1234");
        assert_eq!(wizard.phase(), WizardPhase::Complete);
        assert_eq!(wizard.advance(), AdvanceOutcome::Blocked);
    }

    #[test]
    fn test_retreat_from_first_step_exits() {
        let mut wizard = sample();
        assert_eq!(wizard.retreat(), RetreatOutcome::Exit);
        assert_eq!(wizard.step(), 1);
    }

    #[test]
    fn test_retreat_reports_exit_effects() {
        let mut wizard = sample();
        wizard.set_field("name", text("Asha"));
        wizard.advance();
        wizard.set_field("email", text("asha@luyona.app"));
        wizard.advance();
        wizard.resolve_confirmation(true);

        let RetreatOutcome::Moved(change) = wizard.retreat() else {
            panic!("expected move");
        };
        assert_eq!(change.to, 2);
        assert_eq!(change.direction, Direction::Backward);
        assert_eq!(change.effects, vec![StepEffect::StopCountdown]);
    }

    #[test]
    fn test_values_survive_backward_navigation() {
        let mut wizard = sample();
        wizard.set_field("name", text("Asha"));
        wizard.advance();
        wizard.set_field("email", text("asha@luyona.app"));
        wizard.retreat();
        assert_eq!(wizard.fields().text("email"), "asha@luyona.app");
        wizard.advance();
        assert_eq!(wizard.step(), 2);
        assert!(wizard.can_advance());
    }

    #[test]
    fn test_subscribers_see_each_change() {
        let mut wizard = sample();
        let rx = wizard.subscribe();
        assert!(!rx.borrow().can_advance);
        wizard.set_field("name", text("Asha"));
        assert!(rx.borrow().can_advance);
        wizard.advance();
        assert_eq!(rx.borrow().step, 2);
        assert_eq!(rx.borrow().phase, WizardPhase::Editing(2));
    }

    #[test]
    fn test_clock_drives_age_validation() {
        let birthday = NaiveDate::from_ymd_opt(2008, 10, 19).unwrap();
        let mut wizard = Wizard::new(
            "age",
            vec![StepDescriptor::new(
                "dob",
                "Age",
                Validator::MinimumAge { field: "dob", years: 18 },
            )],
        )
        .unwrap()
        .with_clock(|| NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
        wizard.set_field("dob", FieldValue::Date(birthday));
        assert_eq!(wizard.advance(), AdvanceOutcome::Blocked);

        let mut wizard = wizard.with_clock(|| NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        assert!(matches!(wizard.advance(), AdvanceOutcome::Complete(_)));
    }
}
