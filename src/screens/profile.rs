// ABOUTME: Profile intake screen; saves the completed snapshot once, retrying on demand

use tracing::{info, warn};

use crate::app::actions::{ActionResult, AsyncAction};
use crate::app::events::AppEvent;
use crate::config::AppConfig;
use crate::flows::profile;
use crate::services::Route;
use crate::wizard::{Clock, FieldMap, WizardError};

use super::form::{FormBinding, FormSignal};
use super::{Screen, ScreenContext};

#[derive(Debug)]
pub struct ProfileScreen {
    form: FormBinding,
    /// Completed snapshot not yet stored
    unsaved: Option<FieldMap>,
    saving: bool,
    pub error_message: Option<String>,
}

impl ProfileScreen {
    pub fn new(config: &AppConfig, clock: Clock) -> Result<Self, WizardError> {
        let today = clock();
        Ok(Self {
            form: FormBinding::new(profile::definition(&config.profile, today), clock)?,
            unsaved: None,
            saving: false,
            error_message: None,
        })
    }

    pub fn form(&self) -> &FormBinding {
        &self.form
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    fn save(&mut self, ctx: &mut ScreenContext) {
        let Some(fields) = self.unsaved.clone() else {
            return;
        };
        if ctx.request(AsyncAction::SaveProfile { fields }) {
            self.saving = true;
            self.error_message = None;
        }
    }
}

impl Screen for ProfileScreen {
    fn on_event(&mut self, event: AppEvent, ctx: &mut ScreenContext) {
        if self.saving {
            return;
        }
        if self.unsaved.is_some() {
            // Save failed earlier; Enter retries, Esc leaves
            match event {
                AppEvent::Submit => self.save(ctx),
                AppEvent::Back => ctx.nav.go_back(),
                _ => {}
            }
            return;
        }

        match self.form.handle_event(&event) {
            FormSignal::Exit => ctx.nav.go_back(),
            FormSignal::Complete(fields) => {
                info!(fields = fields.len(), "profile intake complete");
                self.unsaved = Some(fields);
                self.save(ctx);
            }
            FormSignal::Moved(_) | FormSignal::Reviewing(_) | FormSignal::None => {}
        }
    }

    fn on_action_result(&mut self, result: ActionResult, ctx: &mut ScreenContext) {
        let ActionResult::ProfileSaved(outcome) = result else {
            return;
        };
        self.saving = false;
        match outcome {
            Ok(()) => {
                self.unsaved = None;
                ctx.nav.go_to(Route::Referral);
            }
            Err(e) => {
                warn!("saving profile failed: {}", e);
                self.error_message = Some(format!("Could not save your profile: {}", e));
            }
        }
    }

    fn accepts_text(&self) -> bool {
        true
    }
}
