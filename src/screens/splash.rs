// ABOUTME: Splash screen: holds the logo, then routes on session and profile state

use std::time::Duration;

use tracing::{error, info};

use crate::app::actions::{ActionResult, AsyncAction, SessionProbe};
use crate::app::events::AppEvent;
use crate::scheduler::{ScheduledTask, TimerFired};
use crate::services::Route;

use super::{Screen, ScreenContext};

#[derive(Debug)]
pub struct SplashScreen {
    delay: Duration,
    timer: Option<ScheduledTask>,
    checking: bool,
}

impl SplashScreen {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            timer: None,
            checking: false,
        }
    }

    pub fn is_checking(&self) -> bool {
        self.checking
    }

    pub fn timer(&self) -> Option<&ScheduledTask> {
        self.timer.as_ref()
    }
}

impl Screen for SplashScreen {
    fn on_mount(&mut self, ctx: &mut ScreenContext) {
        self.timer = Some(ctx.scheduler.after(self.delay));
    }

    fn on_event(&mut self, event: AppEvent, ctx: &mut ScreenContext) {
        if event == AppEvent::Back {
            ctx.nav.go_back();
        }
    }

    fn on_timer(&mut self, fired: TimerFired, ctx: &mut ScreenContext) {
        if !self.timer.as_ref().is_some_and(|t| t.owns(fired)) {
            return;
        }
        self.timer = None;
        self.checking = ctx.request(AsyncAction::CheckSession);
    }

    fn on_action_result(&mut self, result: ActionResult, ctx: &mut ScreenContext) {
        let ActionResult::SessionChecked(probe) = result else {
            return;
        };
        self.checking = false;
        let route = match probe {
            Ok(SessionProbe::SignedOut) => Route::Gateway,
            Ok(SessionProbe::SignedIn {
                has_profile: true, ..
            }) => Route::Home,
            Ok(SessionProbe::SignedIn { .. }) => Route::UserInfo,
            Err(e) => {
                error!("session check failed, falling back to gateway: {}", e);
                Route::Gateway
            }
        };
        info!(?route, "splash routing");
        ctx.nav.replace(route);
    }

    fn teardown(&mut self) {
        self.timer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::Scheduler;
    use crate::services::{Identity, MockNavigator, ServiceError};
    use mockall::predicate::eq;

    fn identity() -> Identity {
        Identity {
            uid: "u1".into(),
            phone: "+919876543210".into(),
        }
    }

    fn route_for(probe: Result<SessionProbe, ServiceError>, expected: Route) {
        let scheduler = Scheduler::manual();
        let mut pending = None;
        let mut nav = MockNavigator::new();
        nav.expect_replace().with(eq(expected)).times(1).return_const(());
        let mut ctx = ScreenContext::new(&mut nav, &scheduler, &mut pending);

        let mut splash = SplashScreen::new(Duration::from_millis(2000));
        splash.on_mount(&mut ctx);
        let id = splash.timer().unwrap().id();
        splash.on_timer(TimerFired { id }, &mut ctx);
        assert!(splash.is_checking());
        assert!(ctx.has_pending());

        splash.on_action_result(ActionResult::SessionChecked(probe), &mut ctx);
    }

    #[test]
    fn test_routes_on_session_state() {
        route_for(Ok(SessionProbe::SignedOut), Route::Gateway);
        route_for(
            Ok(SessionProbe::SignedIn {
                identity: identity(),
                has_profile: true,
            }),
            Route::Home,
        );
        route_for(
            Ok(SessionProbe::SignedIn {
                identity: identity(),
                has_profile: false,
            }),
            Route::UserInfo,
        );
        route_for(Err(ServiceError::Backend("down".into())), Route::Gateway);
    }

    #[test]
    fn test_foreign_timer_is_ignored() {
        let scheduler = Scheduler::manual();
        let mut pending = None;
        let mut nav = MockNavigator::new();
        let mut ctx = ScreenContext::new(&mut nav, &scheduler, &mut pending);

        let mut splash = SplashScreen::new(Duration::from_millis(2000));
        splash.on_mount(&mut ctx);
        let other = ctx.scheduler.after(Duration::from_secs(1));
        splash.on_timer(TimerFired { id: other.id() }, &mut ctx);
        assert!(!ctx.has_pending());
        assert!(splash.timer().is_some());
    }
}
