// ABOUTME: Gateway screen with a single call to action into phone verification

use crate::app::events::AppEvent;
use crate::services::Route;

use super::{Screen, ScreenContext};

#[derive(Debug, Default)]
pub struct GatewayScreen;

impl GatewayScreen {
    pub fn new() -> Self {
        Self
    }
}

impl Screen for GatewayScreen {
    fn on_event(&mut self, event: AppEvent, ctx: &mut ScreenContext) {
        match event {
            AppEvent::Submit => ctx.nav.go_to(Route::MobileVerification),
            AppEvent::Back => ctx.nav.go_back(),
            _ => {}
        }
    }
}
