// ABOUTME: Mobile verification screen: number, OTP with resend countdown, success
// Completing the wizard signs the verified number in

use std::time::Duration;

use tracing::{info, warn};

use crate::app::actions::{ActionResult, AsyncAction};
use crate::app::events::AppEvent;
use crate::config::AppConfig;
use crate::flows::phone::{self, PHONE_NUMBER, STEP_CODE};
use crate::scheduler::{ScheduledTask, Scheduler, TimerFired};
use crate::services::Route;
use crate::wizard::{Clock, ResendCountdown, StepEffect, WizardError};

use super::form::{FormBinding, FormSignal};
use super::{Screen, ScreenContext};

const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// Resend countdown plus the one-second ticker that drives it
#[derive(Debug)]
pub struct ResendTimer {
    countdown: ResendCountdown,
    ticker: Option<ScheduledTask>,
}

impl ResendTimer {
    pub fn new(seconds: u32) -> Self {
        Self {
            countdown: ResendCountdown::new(seconds),
            ticker: None,
        }
    }

    pub fn countdown(&self) -> &ResendCountdown {
        &self.countdown
    }

    pub fn restart(&mut self, scheduler: &Scheduler) {
        self.countdown.restart();
        self.ticker = Some(scheduler.every(COUNTDOWN_PERIOD));
    }

    pub fn stop(&mut self) {
        self.countdown.stop();
        self.ticker = None;
    }

    pub fn apply(&mut self, effect: StepEffect, scheduler: &Scheduler) {
        match effect {
            StepEffect::RestartCountdown => self.restart(scheduler),
            StepEffect::StopCountdown => self.stop(),
        }
    }

    /// Returns false for events belonging to another registration
    pub fn on_timer(&mut self, fired: TimerFired) -> bool {
        if !self.ticker.as_ref().is_some_and(|t| t.owns(fired)) {
            return false;
        }
        self.countdown.tick();
        if !self.countdown.is_running() {
            self.ticker = None;
        }
        true
    }

    pub fn ticker(&self) -> Option<&ScheduledTask> {
        self.ticker.as_ref()
    }
}

#[derive(Debug)]
pub struct PhoneScreen {
    form: FormBinding,
    resend: ResendTimer,
    country_code: String,
    /// Verified number awaiting a successful sign-in
    verified_phone: Option<String>,
    signing_in: bool,
    resend_count: u32,
    pub error_message: Option<String>,
}

impl PhoneScreen {
    pub fn new(config: &AppConfig, clock: Clock) -> Result<Self, WizardError> {
        Ok(Self {
            form: FormBinding::new(phone::definition(&config.phone), clock)?,
            resend: ResendTimer::new(config.timing.resend_countdown_secs),
            country_code: config.phone.country_code.clone(),
            verified_phone: None,
            signing_in: false,
            resend_count: 0,
            error_message: None,
        })
    }

    pub fn form(&self) -> &FormBinding {
        &self.form
    }

    pub fn resend(&self) -> &ResendTimer {
        &self.resend
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn is_signing_in(&self) -> bool {
        self.signing_in
    }

    pub fn resend_count(&self) -> u32 {
        self.resend_count
    }

    fn request_resend(&mut self, scheduler: &Scheduler) {
        if !self.resend.countdown().can_resend() {
            return;
        }
        self.resend_count += 1;
        info!(count = self.resend_count, "verification code resent");
        self.resend.restart(scheduler);
    }

    fn sign_in(&mut self, ctx: &mut ScreenContext) {
        let Some(phone) = self.verified_phone.clone() else {
            return;
        };
        if ctx.request(AsyncAction::SignIn { phone }) {
            self.signing_in = true;
            self.error_message = None;
        }
    }
}

impl Screen for PhoneScreen {
    fn on_mount(&mut self, ctx: &mut ScreenContext) {
        for effect in self.form.entry_effects() {
            self.resend.apply(effect, ctx.scheduler);
        }
    }

    fn on_event(&mut self, event: AppEvent, ctx: &mut ScreenContext) {
        if self.signing_in {
            return;
        }
        if self.verified_phone.is_some() {
            // Sign-in failed earlier; Enter retries, Esc leaves
            match event {
                AppEvent::Submit => self.sign_in(ctx),
                AppEvent::Back => ctx.nav.go_back(),
                _ => {}
            }
            return;
        }
        let on_code_step = self.form.wizard().step() == STEP_CODE;
        if on_code_step && event == AppEvent::Char('r') {
            self.request_resend(ctx.scheduler);
            return;
        }

        match self.form.handle_event(&event) {
            FormSignal::Moved(change) => {
                for effect in change.effects {
                    self.resend.apply(effect, ctx.scheduler);
                }
            }
            FormSignal::Exit => ctx.nav.go_back(),
            FormSignal::Complete(fields) => {
                self.verified_phone =
                    Some(format!("{}{}", self.country_code, fields.text(PHONE_NUMBER)));
                self.sign_in(ctx);
            }
            FormSignal::None | FormSignal::Reviewing(_) => {}
        }
    }

    fn on_timer(&mut self, fired: TimerFired, _ctx: &mut ScreenContext) {
        self.resend.on_timer(fired);
    }

    fn on_action_result(&mut self, result: ActionResult, ctx: &mut ScreenContext) {
        let ActionResult::SignedIn(outcome) = result else {
            return;
        };
        self.signing_in = false;
        match outcome {
            Ok(identity) => {
                info!(uid = %identity.uid, "phone verified, continuing to profile");
                ctx.nav.go_to(Route::UserInfo);
            }
            Err(e) => {
                warn!("sign-in failed: {}", e);
                self.error_message = Some(format!("Sign-in failed: {}", e));
            }
        }
    }

    fn accepts_text(&self) -> bool {
        true
    }

    fn teardown(&mut self) {
        self.resend.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{Identity, MockNavigator, ServiceError};
    use chrono::NaiveDate;
    use mockall::predicate::eq;
    use std::sync::Arc;

    fn screen() -> PhoneScreen {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        PhoneScreen::new(&AppConfig::default(), Arc::new(move || today)).unwrap()
    }

    fn type_keys(screen: &mut PhoneScreen, ctx: &mut ScreenContext, keys: &str) {
        for c in keys.chars() {
            screen.on_event(AppEvent::Char(c), ctx);
        }
    }

    fn tick(screen: &mut PhoneScreen, ctx: &mut ScreenContext, times: u32) {
        for _ in 0..times {
            let id = screen.resend().ticker().unwrap().id();
            screen.on_timer(TimerFired { id }, ctx);
        }
    }

    #[test]
    fn test_countdown_runs_only_on_code_step() {
        let scheduler = Scheduler::manual();
        let mut pending = None;
        let mut nav = MockNavigator::new();
        let mut ctx = ScreenContext::new(&mut nav, &scheduler, &mut pending);
        let mut screen = screen();
        screen.on_mount(&mut ctx);
        assert!(screen.resend().ticker().is_none());

        type_keys(&mut screen, &mut ctx, "9876543210");
        screen.on_event(AppEvent::Submit, &mut ctx);
        assert_eq!(screen.form().wizard().step(), 2);
        assert!(screen.resend().countdown().is_running());

        tick(&mut screen, &mut ctx, 45);
        assert_eq!(screen.resend().countdown().remaining(), 75);

        screen.on_event(AppEvent::Back, &mut ctx);
        assert!(screen.resend().ticker().is_none());
        screen.on_event(AppEvent::Submit, &mut ctx);
        assert_eq!(screen.resend().countdown().remaining(), 120);
    }

    #[test]
    fn test_resend_locked_until_zero() {
        let scheduler = Scheduler::manual();
        let mut pending = None;
        let mut nav = MockNavigator::new();
        let mut ctx = ScreenContext::new(&mut nav, &scheduler, &mut pending);
        let mut screen = screen();

        type_keys(&mut screen, &mut ctx, "9876543210");
        screen.on_event(AppEvent::Submit, &mut ctx);
        screen.on_event(AppEvent::Char('r'), &mut ctx);
        assert_eq!(screen.resend_count(), 0);

        tick(&mut screen, &mut ctx, 120);
        assert!(screen.resend().countdown().can_resend());
        assert!(screen.resend().ticker().is_none());

        screen.on_event(AppEvent::Char('r'), &mut ctx);
        assert_eq!(screen.resend_count(), 1);
        assert_eq!(screen.resend().countdown().remaining(), 120);
    }

    #[test]
    fn test_completion_signs_in_then_navigates_once() {
        let scheduler = Scheduler::manual();
        let mut pending = None;
        let mut nav = MockNavigator::new();
        nav.expect_go_to()
            .with(eq(Route::UserInfo))
            .times(1)
            .return_const(());
        let mut screen = screen();

        {
            let mut ctx = ScreenContext::new(&mut nav, &scheduler, &mut pending);
            type_keys(&mut screen, &mut ctx, "9876543210");
            screen.on_event(AppEvent::Submit, &mut ctx);
            type_keys(&mut screen, &mut ctx, "482913");
            screen.on_event(AppEvent::Submit, &mut ctx);
            assert_eq!(screen.form().wizard().step(), 3);
            screen.on_event(AppEvent::Submit, &mut ctx);
            assert!(screen.is_signing_in());
            // Trigger disabled while the call is outstanding
            screen.on_event(AppEvent::Submit, &mut ctx);
        }
        assert_eq!(
            pending,
            Some(AsyncAction::SignIn {
                phone: "+919876543210".to_string()
            })
        );

        let mut ctx = ScreenContext::new(&mut nav, &scheduler, &mut pending);
        screen.on_action_result(
            ActionResult::SignedIn(Ok(Identity {
                uid: "u1".into(),
                phone: "+919876543210".into(),
            })),
            &mut ctx,
        );
        assert!(!screen.is_signing_in());
    }

    #[test]
    fn test_failed_sign_in_shows_error_and_allows_retry() {
        let scheduler = Scheduler::manual();
        let mut pending = None;
        let mut nav = MockNavigator::new();
        nav.expect_go_to().never();
        let mut screen = screen();
        screen.verified_phone = Some("+919876543210".into());
        screen.signing_in = true;

        let mut ctx = ScreenContext::new(&mut nav, &scheduler, &mut pending);
        screen.on_action_result(
            ActionResult::SignedIn(Err(ServiceError::Backend("quota exceeded".into()))),
            &mut ctx,
        );
        assert!(screen.error_message.as_deref().unwrap().contains("quota exceeded"));

        screen.on_event(AppEvent::Submit, &mut ctx);
        assert!(screen.is_signing_in());
        assert!(screen.error_message.is_none());
    }

    #[test]
    fn test_back_after_failed_sign_in_leaves_screen() {
        let scheduler = Scheduler::manual();
        let mut pending = None;
        let mut nav = MockNavigator::new();
        nav.expect_go_back().times(1).return_const(());
        let mut screen = screen();
        screen.verified_phone = Some("+919876543210".into());
        screen.signing_in = true;

        let mut ctx = ScreenContext::new(&mut nav, &scheduler, &mut pending);
        screen.on_action_result(
            ActionResult::SignedIn(Err(ServiceError::Backend("x".into()))),
            &mut ctx,
        );
        screen.on_event(AppEvent::Back, &mut ctx);
        assert!(!screen.is_signing_in());
        assert!(!ctx.has_pending());
    }

    #[test]
    fn test_back_from_first_step_leaves_screen() {
        let scheduler = Scheduler::manual();
        let mut pending = None;
        let mut nav = MockNavigator::new();
        nav.expect_go_back().times(1).return_const(());
        let mut ctx = ScreenContext::new(&mut nav, &scheduler, &mut pending);
        let mut screen = screen();
        screen.on_event(AppEvent::Back, &mut ctx);
    }
}
