// ABOUTME: Screen bindings for every route: event handling, timers and collaborator results
// Each screen owns its state for its lifetime; unmounting drops its timers

pub mod dialog;
pub mod form;
pub mod gateway;
pub mod home;
pub mod phone;
pub mod profile;
pub mod referral;
pub mod splash;
pub mod waitlist;

use tracing::{debug, warn};

use crate::app::actions::{ActionResult, AsyncAction};
use crate::app::events::AppEvent;
use crate::config::AppConfig;
use crate::scheduler::{Scheduler, TimerFired};
use crate::services::{Navigator, Route};
use crate::wizard::{Clock, WizardError};

pub use dialog::ConfirmationDialog;
pub use form::{FormBinding, FormSignal};
pub use gateway::GatewayScreen;
pub use home::{HomeScreen, HomeTab, ProfileView, SettingsItem};
pub use phone::PhoneScreen;
pub use profile::ProfileScreen;
pub use referral::ReferralScreen;
pub use splash::SplashScreen;
pub use waitlist::WaitlistScreen;

/// What a screen may touch while handling input
pub struct ScreenContext<'a> {
    pub nav: &'a mut dyn Navigator,
    pub scheduler: &'a Scheduler,
    pending: &'a mut Option<AsyncAction>,
}

impl<'a> ScreenContext<'a> {
    pub fn new(
        nav: &'a mut dyn Navigator,
        scheduler: &'a Scheduler,
        pending: &'a mut Option<AsyncAction>,
    ) -> Self {
        Self {
            nav,
            scheduler,
            pending,
        }
    }

    /// Queue a collaborator call. Refused while another one is outstanding.
    pub fn request(&mut self, action: AsyncAction) -> bool {
        if let Some(current) = self.pending.as_ref() {
            warn!(?current, ?action, "async action already pending, request dropped");
            return false;
        }
        debug!(?action, "async action queued");
        *self.pending = Some(action);
        true
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

pub trait Screen {
    fn on_mount(&mut self, _ctx: &mut ScreenContext) {}

    fn on_event(&mut self, event: AppEvent, ctx: &mut ScreenContext);

    fn on_timer(&mut self, _fired: TimerFired, _ctx: &mut ScreenContext) {}

    fn on_action_result(&mut self, _result: ActionResult, _ctx: &mut ScreenContext) {}

    /// Whether printable keys are text input rather than shortcuts
    fn accepts_text(&self) -> bool {
        false
    }

    /// Release timers before the screen goes away
    fn teardown(&mut self) {}
}

/// The mounted screen
#[derive(Debug)]
pub enum ActiveScreen {
    Splash(SplashScreen),
    Gateway(GatewayScreen),
    Phone(PhoneScreen),
    Profile(ProfileScreen),
    Referral(ReferralScreen),
    Waitlist(WaitlistScreen),
    Home(HomeScreen),
}

impl ActiveScreen {
    pub fn build(route: Route, config: &AppConfig, clock: Clock) -> Result<Self, WizardError> {
        let screen = match route {
            Route::Splash => Self::Splash(SplashScreen::new(config.timing.splash_delay())),
            Route::Gateway => Self::Gateway(GatewayScreen::new()),
            Route::MobileVerification => Self::Phone(PhoneScreen::new(config, clock)?),
            Route::UserInfo => Self::Profile(ProfileScreen::new(config, clock)?),
            Route::Referral => Self::Referral(ReferralScreen::new(config, clock)?),
            Route::WaitlistStatus => Self::Waitlist(WaitlistScreen::new(&config.timing)),
            Route::Home => Self::Home(HomeScreen::new(clock)),
        };
        Ok(screen)
    }

    pub fn route(&self) -> Route {
        match self {
            Self::Splash(_) => Route::Splash,
            Self::Gateway(_) => Route::Gateway,
            Self::Phone(_) => Route::MobileVerification,
            Self::Profile(_) => Route::UserInfo,
            Self::Referral(_) => Route::Referral,
            Self::Waitlist(_) => Route::WaitlistStatus,
            Self::Home(_) => Route::Home,
        }
    }

    pub fn as_screen(&self) -> &dyn Screen {
        match self {
            Self::Splash(s) => s,
            Self::Gateway(s) => s,
            Self::Phone(s) => s,
            Self::Profile(s) => s,
            Self::Referral(s) => s,
            Self::Waitlist(s) => s,
            Self::Home(s) => s,
        }
    }

    pub fn as_screen_mut(&mut self) -> &mut dyn Screen {
        match self {
            Self::Splash(s) => s,
            Self::Gateway(s) => s,
            Self::Phone(s) => s,
            Self::Profile(s) => s,
            Self::Referral(s) => s,
            Self::Waitlist(s) => s,
            Self::Home(s) => s,
        }
    }
}
