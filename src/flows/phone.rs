// ABOUTME: Phone number + OTP verification wizard

use crate::config::PhoneConfig;
use crate::wizard::{
    BoundInput, DigitSlots, DigitsInput, FieldInput, StepDescriptor, StepEffect, Validator,
};

use super::FlowDefinition;

pub const PHONE_NUMBER: &str = "phone_number";
pub const OTP: &str = "otp";

pub const STEP_NUMBER: usize = 1;
pub const STEP_CODE: usize = 2;

pub fn definition(config: &PhoneConfig) -> FlowDefinition {
    let steps = vec![
        StepDescriptor::new(
            "number",
            "Enter your mobile number",
            Validator::DigitCode {
                field: PHONE_NUMBER,
                len: config.number_length,
            },
        ),
        StepDescriptor::new(
            "code",
            "Enter verification code",
            Validator::DigitCode {
                field: OTP,
                len: config.code_length,
            },
        )
        .on_enter(StepEffect::RestartCountdown)
        .on_exit(StepEffect::StopCountdown),
        StepDescriptor::new("verified", "Verification successful", Validator::Always),
    ];

    let layouts = vec![
        vec![BoundInput::new(
            PHONE_NUMBER,
            "Mobile number",
            FieldInput::Digits(DigitsInput::new(config.number_length)),
        )],
        vec![BoundInput::new(
            OTP,
            "Verification code",
            FieldInput::Code(DigitSlots::new(config.code_length)),
        )],
        Vec::new(),
    ];

    FlowDefinition {
        name: "phone",
        steps,
        layouts,
    }
}
