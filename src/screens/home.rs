// ABOUTME: Home shell with feed/explore/messages/profile/settings tabs
// The profile tab reads the stored profile once per mount; settings handles logout and deletion

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::app::actions::{ActionResult, AsyncAction};
use crate::app::events::AppEvent;
use crate::flows::ProfileRecord;
use crate::services::Route;
use crate::wizard::Clock;

use super::dialog::ConfirmationDialog;
use super::{Screen, ScreenContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeTab {
    Feed,
    Explore,
    Messages,
    Profile,
    Settings,
}

impl HomeTab {
    pub const ALL: [HomeTab; 5] = [
        HomeTab::Feed,
        HomeTab::Explore,
        HomeTab::Messages,
        HomeTab::Profile,
        HomeTab::Settings,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            HomeTab::Feed => "Feed",
            HomeTab::Explore => "Explore",
            HomeTab::Messages => "Messages",
            HomeTab::Profile => "Profile",
            HomeTab::Settings => "Settings",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }

    fn offset(&self, delta: i32) -> Self {
        let len = Self::ALL.len() as i32;
        Self::ALL[(self.index() as i32 + delta).rem_euclid(len) as usize]
    }
}

/// Profile tab content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileView {
    Loading,
    Loaded(Box<ProfileRecord>),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsItem {
    Logout,
    DeleteAccount,
}

impl SettingsItem {
    pub const ALL: [SettingsItem; 2] = [SettingsItem::Logout, SettingsItem::DeleteAccount];

    pub fn label(&self) -> &'static str {
        match self {
            SettingsItem::Logout => "Logout",
            SettingsItem::DeleteAccount => "Delete account",
        }
    }
}

pub struct HomeScreen {
    tab: HomeTab,
    profile: Option<ProfileView>,
    /// Tab visit whose profile read is still wanted
    profile_request: u64,
    selected_setting: usize,
    delete_dialog: Option<ConfirmationDialog>,
    busy: bool,
    clock: Clock,
    pub error_message: Option<String>,
}

impl std::fmt::Debug for HomeScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HomeScreen")
            .field("tab", &self.tab)
            .field("profile", &self.profile)
            .field("busy", &self.busy)
            .finish_non_exhaustive()
    }
}

impl HomeScreen {
    pub fn new(clock: Clock) -> Self {
        Self {
            tab: HomeTab::Feed,
            profile: None,
            profile_request: 0,
            selected_setting: 0,
            delete_dialog: None,
            busy: false,
            clock,
            error_message: None,
        }
    }

    pub fn tab(&self) -> HomeTab {
        self.tab
    }

    pub fn profile(&self) -> Option<&ProfileView> {
        self.profile.as_ref()
    }

    pub fn selected_setting(&self) -> SettingsItem {
        SettingsItem::ALL[self.selected_setting]
    }

    pub fn delete_dialog(&self) -> Option<&ConfirmationDialog> {
        self.delete_dialog.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    pub fn select_tab(&mut self, tab: HomeTab, ctx: &mut ScreenContext) {
        if tab == self.tab {
            return;
        }
        self.tab = tab;
        self.error_message = None;
        self.profile = None;
        // Each visit numbers its reads; anything older is stale
        self.profile_request += 1;
        if tab == HomeTab::Profile {
            self.load_profile(ctx);
        }
    }

    fn load_profile(&mut self, ctx: &mut ScreenContext) {
        let request = self.profile_request;
        self.profile = Some(if ctx.request(AsyncAction::LoadProfile { request }) {
            ProfileView::Loading
        } else {
            ProfileView::Failed("Another request is still running".to_string())
        });
    }

    fn activate_setting(&mut self, ctx: &mut ScreenContext) {
        match self.selected_setting() {
            SettingsItem::Logout => {
                if ctx.request(AsyncAction::SignOut) {
                    self.busy = true;
                }
            }
            SettingsItem::DeleteAccount => {
                self.delete_dialog = Some(ConfirmationDialog::new(
                    "Delete Account",
                    "Are you sure you want to delete your account? Your profile will be removed permanently.",
                ));
            }
        }
    }
}

impl Screen for HomeScreen {
    fn on_event(&mut self, event: AppEvent, ctx: &mut ScreenContext) {
        if self.busy {
            return;
        }
        if let Some(dialog) = self.delete_dialog.as_mut() {
            if let Some(confirmed) = dialog.handle(&event) {
                self.delete_dialog = None;
                if confirmed && ctx.request(AsyncAction::DeleteAccount) {
                    info!("account deletion confirmed");
                    self.busy = true;
                }
            }
            return;
        }

        match event {
            AppEvent::Left => self.select_tab(self.tab.offset(-1), ctx),
            AppEvent::Right | AppEvent::NextField => self.select_tab(self.tab.offset(1), ctx),
            AppEvent::PrevField => self.select_tab(self.tab.offset(-1), ctx),
            AppEvent::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.select_tab(HomeTab::ALL[index], ctx);
            }
            AppEvent::Back => ctx.nav.go_back(),
            AppEvent::Up | AppEvent::Down if self.tab == HomeTab::Settings => {
                let len = SettingsItem::ALL.len();
                self.selected_setting = if event == AppEvent::Up {
                    (self.selected_setting + len - 1) % len
                } else {
                    (self.selected_setting + 1) % len
                };
            }
            AppEvent::Submit => match self.tab {
                HomeTab::Settings => self.activate_setting(ctx),
                HomeTab::Profile if matches!(self.profile, Some(ProfileView::Failed(_))) => {
                    self.load_profile(ctx);
                }
                _ => {}
            },
            _ => {}
        }
    }

    fn on_action_result(&mut self, result: ActionResult, ctx: &mut ScreenContext) {
        match result {
            ActionResult::ProfileLoaded { request, outcome } => {
                if request != self.profile_request || self.profile.is_none() {
                    debug!(request, current = self.profile_request, "stale profile read dropped");
                    return;
                }
                match outcome {
                    Ok(Some(record)) => self.profile = Some(ProfileView::Loaded(Box::new(record))),
                    Ok(None) => {
                        info!("no profile stored, sending user to intake");
                        ctx.nav.replace(Route::UserInfo);
                    }
                    Err(e) => {
                        warn!("loading profile failed: {}", e);
                        self.profile = Some(ProfileView::Failed(e.to_string()));
                    }
                }
            }
            ActionResult::SignedOut(outcome) => {
                self.busy = false;
                match outcome {
                    Ok(()) => ctx.nav.replace(Route::Gateway),
                    Err(e) => self.error_message = Some(format!("Logout failed: {}", e)),
                }
            }
            ActionResult::AccountDeleted(outcome) => {
                self.busy = false;
                match outcome {
                    Ok(()) => ctx.nav.replace(Route::Splash),
                    Err(e) => {
                        self.error_message = Some(format!("Could not delete account: {}", e));
                    }
                }
            }
            other => warn!(?other, "unexpected result on home screen"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::Scheduler;
    use crate::services::{MockNavigator, ServiceError};
    use mockall::predicate::eq;
    use std::sync::Arc;

    fn screen() -> HomeScreen {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        HomeScreen::new(Arc::new(move || today))
    }

    #[test]
    fn test_profile_tab_reads_once_per_mount() {
        let scheduler = Scheduler::manual();
        let mut pending = None;
        let mut nav = MockNavigator::new();
        let mut home = screen();
        {
            let mut ctx = ScreenContext::new(&mut nav, &scheduler, &mut pending);
            home.on_event(AppEvent::Char('4'), &mut ctx);
            assert_eq!(home.tab(), HomeTab::Profile);
            assert_eq!(home.profile(), Some(&ProfileView::Loading));
            // Re-selecting the same tab does not read again
            home.on_event(AppEvent::Char('4'), &mut ctx);
        }
        assert_eq!(pending, Some(AsyncAction::LoadProfile { request: 1 }));
    }

    #[test]
    fn test_missing_profile_redirects_to_intake() {
        let scheduler = Scheduler::manual();
        let mut pending = None;
        let mut nav = MockNavigator::new();
        nav.expect_replace()
            .with(eq(Route::UserInfo))
            .times(1)
            .return_const(());
        let mut ctx = ScreenContext::new(&mut nav, &scheduler, &mut pending);
        let mut home = screen();
        home.on_event(AppEvent::Char('4'), &mut ctx);
        home.on_action_result(
            ActionResult::ProfileLoaded {
                request: 1,
                outcome: Ok(None),
            },
            &mut ctx,
        );
    }

    #[test]
    fn test_read_from_an_earlier_visit_is_dropped() {
        let scheduler = Scheduler::manual();
        let mut pending = None;
        let mut nav = MockNavigator::new();
        nav.expect_replace()
            .with(eq(Route::UserInfo))
            .times(1)
            .return_const(());
        let mut home = screen();
        {
            let mut ctx = ScreenContext::new(&mut nav, &scheduler, &mut pending);
            home.on_event(AppEvent::Char('4'), &mut ctx);
            home.on_event(AppEvent::Char('1'), &mut ctx);
        }
        // The first read was picked up before the user came back
        assert_eq!(pending.take(), Some(AsyncAction::LoadProfile { request: 1 }));

        let mut ctx = ScreenContext::new(&mut nav, &scheduler, &mut pending);
        home.on_event(AppEvent::Char('4'), &mut ctx);
        assert_eq!(home.profile(), Some(&ProfileView::Loading));

        home.on_action_result(
            ActionResult::ProfileLoaded {
                request: 1,
                outcome: Ok(None),
            },
            &mut ctx,
        );
        assert_eq!(home.profile(), Some(&ProfileView::Loading));

        home.on_action_result(
            ActionResult::ProfileLoaded {
                request: 3,
                outcome: Ok(None),
            },
            &mut ctx,
        );
    }

    #[test]
    fn test_load_failure_is_inline_and_retryable() {
        let scheduler = Scheduler::manual();
        let mut pending = None;
        let mut nav = MockNavigator::new();
        let mut home = screen();
        {
            let mut ctx = ScreenContext::new(&mut nav, &scheduler, &mut pending);
            home.on_event(AppEvent::Char('4'), &mut ctx);
            home.on_action_result(
                ActionResult::ProfileLoaded {
                    request: 1,
                    outcome: Err(ServiceError::Backend("timeout".into())),
                },
                &mut ctx,
            );
            assert!(matches!(home.profile(), Some(ProfileView::Failed(_))));
        }
        pending = None;
        let mut ctx = ScreenContext::new(&mut nav, &scheduler, &mut pending);
        home.on_event(AppEvent::Submit, &mut ctx);
        assert_eq!(home.profile(), Some(&ProfileView::Loading));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let scheduler = Scheduler::manual();
        let mut pending = None;
        let mut nav = MockNavigator::new();
        nav.expect_replace()
            .with(eq(Route::Splash))
            .times(1)
            .return_const(());
        let mut home = screen();
        {
            let mut ctx = ScreenContext::new(&mut nav, &scheduler, &mut pending);
            home.on_event(AppEvent::Char('5'), &mut ctx);
            home.on_event(AppEvent::Down, &mut ctx);
            assert_eq!(home.selected_setting(), SettingsItem::DeleteAccount);

            home.on_event(AppEvent::Submit, &mut ctx);
            assert!(home.delete_dialog().is_some());
            // Default answer is No
            home.on_event(AppEvent::Submit, &mut ctx);
            assert!(home.delete_dialog().is_none());
            assert!(!ctx.has_pending());

            home.on_event(AppEvent::Submit, &mut ctx);
            home.on_event(AppEvent::Left, &mut ctx);
            home.on_event(AppEvent::Submit, &mut ctx);
            assert!(home.is_busy());
        }
        assert_eq!(pending, Some(AsyncAction::DeleteAccount));

        let mut ctx = ScreenContext::new(&mut nav, &scheduler, &mut pending);
        home.on_action_result(ActionResult::AccountDeleted(Ok(())), &mut ctx);
        assert!(!home.is_busy());
    }

    #[test]
    fn test_logout_returns_to_gateway() {
        let scheduler = Scheduler::manual();
        let mut pending = None;
        let mut nav = MockNavigator::new();
        nav.expect_replace()
            .with(eq(Route::Gateway))
            .times(1)
            .return_const(());
        let mut ctx = ScreenContext::new(&mut nav, &scheduler, &mut pending);
        let mut home = screen();
        home.on_event(AppEvent::Char('5'), &mut ctx);
        home.on_event(AppEvent::Submit, &mut ctx);
        assert!(home.is_busy());
        home.on_action_result(ActionResult::SignedOut(Ok(())), &mut ctx);
    }
}
