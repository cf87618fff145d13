// ABOUTME: Route identifiers and the navigation contract screens call on exit/completion

use serde::{Deserialize, Serialize};

/// Screens reachable in the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Splash,
    Gateway,
    MobileVerification,
    UserInfo,
    Referral,
    WaitlistStatus,
    Home,
}

impl Route {
    pub fn title(&self) -> &'static str {
        match self {
            Route::Splash => "Luyona",
            Route::Gateway => "Welcome",
            Route::MobileVerification => "Mobile Verification",
            Route::UserInfo => "About You",
            Route::Referral => "Referrals",
            Route::WaitlistStatus => "Waitlist",
            Route::Home => "Home",
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait Navigator {
    /// Push `route` on top of the history
    fn go_to(&mut self, route: Route);

    /// Pop the current route
    fn go_back(&mut self);

    /// Swap the current route for `route`
    fn replace(&mut self, route: Route);
}
