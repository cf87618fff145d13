// ABOUTME: Application state: router, mounted screen, pending collaborator call
// All mutation happens on the UI loop; timers and results arrive as messages

use std::sync::Arc;

use chrono::Local;
use tracing::{error, info};

use crate::app::actions::{run_action, ActionResult, AsyncAction};
use crate::app::events::AppEvent;
use crate::app::router::Router;
use crate::config::AppConfig;
use crate::scheduler::{Scheduler, TimerFired};
use crate::screens::{ActiveScreen, Screen, ScreenContext};
use crate::services::{Route, Services};
use crate::wizard::Clock;

pub struct AppState {
    pub config: AppConfig,
    pub router: Router,
    pub screen: Option<ActiveScreen>,
    mounted_generation: Option<u64>,
    pub pending_async_action: Option<AsyncAction>,
    pub should_quit: bool,
    pub error_message: Option<String>,
    scheduler: Scheduler,
    clock: Clock,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("router", &self.router)
            .field("screen", &self.screen)
            .field("pending_async_action", &self.pending_async_action)
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default(), Scheduler::manual())
    }
}

impl AppState {
    pub fn new(config: AppConfig, scheduler: Scheduler) -> Self {
        Self::with_clock(config, scheduler, Arc::new(|| Local::now().date_naive()))
    }

    /// Start on the splash screen with a fixed date source
    pub fn with_clock(config: AppConfig, scheduler: Scheduler, clock: Clock) -> Self {
        Self::starting_at(Route::Splash, config, scheduler, clock)
    }

    pub fn starting_at(route: Route, config: AppConfig, scheduler: Scheduler, clock: Clock) -> Self {
        let mut state = Self {
            config,
            router: Router::new(route),
            screen: None,
            mounted_generation: None,
            pending_async_action: None,
            should_quit: false,
            error_message: None,
            scheduler,
            clock,
        };
        state.sync_route();
        state
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn current_route(&self) -> Option<Route> {
        self.screen.as_ref().map(ActiveScreen::route)
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn accepts_text(&self) -> bool {
        self.screen
            .as_ref()
            .is_some_and(|s| s.as_screen().accepts_text())
    }

    pub fn dispatch(&mut self, event: AppEvent) {
        self.with_screen(|screen, ctx| screen.on_event(event, ctx));
    }

    pub fn on_timer(&mut self, fired: TimerFired) {
        self.with_screen(|screen, ctx| screen.on_timer(fired, ctx));
    }

    pub fn on_action_result(&mut self, result: ActionResult) {
        self.with_screen(|screen, ctx| screen.on_action_result(result, ctx));
    }

    fn with_screen(&mut self, f: impl FnOnce(&mut dyn Screen, &mut ScreenContext)) {
        let Some(screen) = self.screen.as_mut() else {
            return;
        };
        let mut ctx = ScreenContext::new(
            &mut self.router,
            &self.scheduler,
            &mut self.pending_async_action,
        );
        f(screen.as_screen_mut(), &mut ctx);
        self.sync_route();
    }

    /// Remount when the router moved since the last mount
    fn sync_route(&mut self) {
        while self.mounted_generation != Some(self.router.generation()) {
            self.mounted_generation = Some(self.router.generation());

            if let Some(mut old) = self.screen.take() {
                old.as_screen_mut().teardown();
            }

            let Some(route) = self.router.current() else {
                info!("navigation history empty, quitting");
                self.should_quit = true;
                return;
            };

            match ActiveScreen::build(route, &self.config, self.clock.clone()) {
                Ok(mut screen) => {
                    info!(?route, "screen mounted");
                    let mut ctx = ScreenContext::new(
                        &mut self.router,
                        &self.scheduler,
                        &mut self.pending_async_action,
                    );
                    screen.as_screen_mut().on_mount(&mut ctx);
                    self.screen = Some(screen);
                }
                Err(e) => {
                    error!(?route, "failed to build screen: {}", e);
                    self.error_message = Some(e.to_string());
                    self.should_quit = true;
                    return;
                }
            }
        }
    }

    pub async fn process_async_action(&mut self, services: &Services) {
        if let Some(action) = self.pending_async_action.take() {
            let result = run_action(action, services).await;
            self.on_action_result(result);
        }
    }
}

pub struct App {
    pub state: AppState,
    services: Services,
}

impl App {
    pub fn new(state: AppState, services: Services) -> Self {
        Self { state, services }
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub async fn tick(&mut self) -> anyhow::Result<()> {
        self.state.process_async_action(&self.services).await;
        Ok(())
    }
}
