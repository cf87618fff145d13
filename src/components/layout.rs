// ABOUTME: Top-level layout: draws whichever screen is mounted, plus any overlay it owns

use ratatui::{prelude::*, widgets::Clear};

use super::confirmation_dialog::ConfirmationDialogComponent;
use super::home::HomeComponent;
use super::onboarding::{phone_view, profile_view, referral_view};
use super::splash::{GatewayComponent, SplashComponent};
use super::waitlist::WaitlistComponent;
use super::wizard::{render_status_line, WizardComponent};
use crate::app::AppState;
use crate::screens::ActiveScreen;

pub struct LayoutComponent {
    wizard: WizardComponent,
    confirmation_dialog: ConfirmationDialogComponent,
    home: HomeComponent,
}

impl LayoutComponent {
    pub fn new() -> Self {
        Self {
            wizard: WizardComponent::new(),
            confirmation_dialog: ConfirmationDialogComponent::new(),
            home: HomeComponent::new(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, state: &AppState) {
        let area = frame.size();
        let Some(screen) = &state.screen else {
            frame.render_widget(Clear, area);
            render_status_line(frame, area, None, state.error_message.as_deref());
            return;
        };

        match screen {
            ActiveScreen::Splash(splash) => SplashComponent::render(frame, area, splash),
            ActiveScreen::Gateway(_) => GatewayComponent::render(frame, area),
            ActiveScreen::Phone(phone) => self.wizard.render(frame, area, &phone_view(phone)),
            ActiveScreen::Profile(profile) => self.wizard.render(
                frame,
                area,
                &profile_view(profile, state.config.profile.minimum_age),
            ),
            ActiveScreen::Referral(referral) => {
                self.wizard.render(frame, area, &referral_view(referral));
                if let Some(prompt) = referral.permission_prompt() {
                    self.confirmation_dialog.render(frame, area, prompt);
                }
            }
            ActiveScreen::Waitlist(waitlist) => WaitlistComponent::render(frame, area, waitlist),
            ActiveScreen::Home(home) => self.home.render(frame, area, home),
        }
    }
}

impl Default for LayoutComponent {
    fn default() -> Self {
        Self::new()
    }
}
