// ABOUTME: Concrete onboarding wizards built from step descriptors and input layouts
// Phone verification, profile intake and referral entry

pub mod phone;
pub mod profile;
pub mod referral;

use crate::wizard::{BoundInput, StepDescriptor, Wizard, WizardError};

pub use profile::ProfileRecord;

/// A wizard's step list together with the inputs shown on each step
#[derive(Debug, Clone)]
pub struct FlowDefinition {
    pub name: &'static str,
    pub steps: Vec<StepDescriptor>,
    /// One entry per step, in step order
    pub layouts: Vec<Vec<BoundInput>>,
}

impl FlowDefinition {
    pub fn into_parts(self) -> Result<(Wizard, Vec<Vec<BoundInput>>), WizardError> {
        let wizard = Wizard::new(self.name, self.steps)?;
        Ok((wizard, self.layouts))
    }
}
