// ABOUTME: Stepped form wizard: engine, validators, field adapters and timers
// Concrete onboarding flows only supply step descriptors and input layouts

pub mod confirmation;
pub mod countdown;
pub mod engine;
pub mod field;
pub mod inputs;
pub mod slots;
pub mod validators;

pub use confirmation::{ConfirmSpec, ConfirmationKind, ConfirmationRequest};
pub use countdown::ResendCountdown;
pub use engine::{
    AdvanceOutcome, Clock, Direction, ResolveOutcome, RetreatOutcome, StepChange, StepDescriptor,
    StepEffect, StepHooks, Wizard, WizardError, WizardPhase, WizardSnapshot, WizardState,
};
pub use field::{FieldMap, FieldName, FieldValue};
pub use inputs::{
    BoundInput, ChoiceInput, DateInput, DatePart, DigitsInput, FieldInput, PrefixedInput,
    TextInput,
};
pub use slots::DigitSlots;
pub use validators::{age_on, Validator};
