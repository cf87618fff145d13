// ABOUTME: Referral screen: contacts-permission prompt, then the six-digit code

use tracing::info;

use crate::app::events::AppEvent;
use crate::config::AppConfig;
use crate::flows::referral::{
    self, CONTACTS_PERMISSION, PERMISSION_ALLOWED, PERMISSION_DENIED, REFERRAL_CODE,
};
use crate::services::Route;
use crate::wizard::{Clock, FieldValue, WizardError};

use super::dialog::ConfirmationDialog;
use super::form::{FormBinding, FormSignal};
use super::{Screen, ScreenContext};

#[derive(Debug)]
pub struct ReferralScreen {
    form: FormBinding,
    permission_prompt: Option<ConfirmationDialog>,
}

impl ReferralScreen {
    pub fn new(config: &AppConfig, clock: Clock) -> Result<Self, WizardError> {
        Ok(Self {
            form: FormBinding::new(referral::definition(&config.referral), clock)?,
            permission_prompt: None,
        })
    }

    pub fn form(&self) -> &FormBinding {
        &self.form
    }

    pub fn permission_prompt(&self) -> Option<&ConfirmationDialog> {
        self.permission_prompt.as_ref()
    }

    fn needs_permission_answer(&self) -> bool {
        self.form.wizard().step() == 1
            && self.form.wizard().fields().text(CONTACTS_PERMISSION).is_empty()
    }

    fn handle_signal(&mut self, signal: FormSignal, ctx: &mut ScreenContext) {
        match signal {
            FormSignal::Exit => ctx.nav.go_back(),
            FormSignal::Complete(fields) => {
                let code = fields
                    .get(REFERRAL_CODE)
                    .and_then(FieldValue::code_string)
                    .unwrap_or_default();
                info!(%code, "referral code accepted");
                ctx.nav.go_to(Route::WaitlistStatus);
            }
            FormSignal::Moved(_) | FormSignal::Reviewing(_) | FormSignal::None => {}
        }
    }
}

impl Screen for ReferralScreen {
    fn on_event(&mut self, event: AppEvent, ctx: &mut ScreenContext) {
        if let Some(prompt) = self.permission_prompt.as_mut() {
            if event == AppEvent::Back {
                self.permission_prompt = None;
                return;
            }
            if let Some(allow) = prompt.handle(&event) {
                self.permission_prompt = None;
                let answer = if allow {
                    PERMISSION_ALLOWED
                } else {
                    PERMISSION_DENIED
                };
                info!(answer, "contacts permission answered");
                self.form
                    .set_field(CONTACTS_PERMISSION, FieldValue::Choice(answer.to_string()));
                let signal = self.form.advance();
                self.handle_signal(signal, ctx);
            }
            return;
        }

        if event == AppEvent::Submit && self.needs_permission_answer() {
            self.permission_prompt = Some(
                ConfirmationDialog::new(
                    "Contacts",
                    "Allow Luyona to access your contacts to find people you know?",
                )
                .with_labels("Allow", "Don't allow")
                .preselect(true),
            );
            return;
        }

        let signal = self.form.handle_event(&event);
        self.handle_signal(signal, ctx);
    }

    fn accepts_text(&self) -> bool {
        true
    }
}
