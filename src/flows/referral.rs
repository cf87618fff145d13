// ABOUTME: Referral code entry wizard
// Step one records the contacts-permission answer; step two takes the code

use crate::config::ReferralConfig;
use crate::wizard::{BoundInput, DigitSlots, FieldInput, StepDescriptor, Validator};

use super::FlowDefinition;

pub const CONTACTS_PERMISSION: &str = "contacts_permission";
pub const REFERRAL_CODE: &str = "referral_code";

pub const PERMISSION_ALLOWED: &str = "allowed";
pub const PERMISSION_DENIED: &str = "denied";

pub fn definition(config: &ReferralConfig) -> FlowDefinition {
    let steps = vec![
        StepDescriptor::new(
            "intro",
            "Add your referrals",
            Validator::NonEmpty(&[CONTACTS_PERMISSION]),
        ),
        StepDescriptor::new(
            "code",
            "Enter referral code",
            Validator::DigitCode {
                field: REFERRAL_CODE,
                len: config.code_length,
            },
        ),
    ];

    let layouts = vec![
        Vec::new(),
        vec![BoundInput::new(
            REFERRAL_CODE,
            "Referral code",
            FieldInput::Code(DigitSlots::new(config.code_length)),
        )],
    ];

    FlowDefinition {
        name: "referral",
        steps,
        layouts,
    }
}
