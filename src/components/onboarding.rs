// ABOUTME: Step copy and notices for the phone, profile and referral wizards
// Each builder turns a screen into a WizardView for the shared wizard renderer

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

use super::palette::{GOLD, MUTED_GRAY, SELECTION_GREEN, SOFT_WHITE};
use super::wizard::WizardView;
use crate::flows::phone::PHONE_NUMBER;
use crate::flows::referral::CONTACTS_PERMISSION;
use crate::screens::{PhoneScreen, ProfileScreen, ReferralScreen};

fn text(s: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(s.into(), Style::default().fg(SOFT_WHITE)))
}

fn muted(s: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(s.into(), Style::default().fg(MUTED_GRAY)))
}

pub fn phone_view(screen: &PhoneScreen) -> WizardView<'_> {
    let form = screen.form();
    let wizard = form.wizard();
    let number = wizard.fields().text(PHONE_NUMBER);

    let (intro, notice, hints) = match wizard.current().id {
        "number" => (
            vec![
                text("Enter your mobile number to get started."),
                muted(format!("Country code {}", screen.country_code())),
            ],
            None,
            vec![("0-9", "type"), ("Enter", "send code"), ("Esc", "back")],
        ),
        "code" => {
            let countdown = screen.resend().countdown();
            let notice = if countdown.can_resend() {
                Line::from(vec![
                    Span::styled("Didn't get it? Press ", Style::default().fg(MUTED_GRAY)),
                    Span::styled("r", Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
                    Span::styled(" to resend", Style::default().fg(MUTED_GRAY)),
                ])
            } else {
                muted(format!("Resend code in {}", countdown.display()))
            };
            (
                vec![text(format!(
                    "Enter the code sent to {} {}",
                    screen.country_code(),
                    number
                ))],
                Some(notice),
                vec![("0-9", "type"), ("←→", "move"), ("Enter", "verify"), ("Esc", "change number")],
            )
        }
        _ => {
            let status = if screen.is_signing_in() {
                muted("Signing you in...")
            } else {
                muted("Press Enter to try again")
            };
            (
                vec![
                    Line::from(Span::styled(
                        "✓ Verification successful",
                        Style::default().fg(SELECTION_GREEN).add_modifier(Modifier::BOLD),
                    )),
                    status,
                ],
                None,
                vec![("Enter", "continue")],
            )
        }
    };

    WizardView::new("Verify your phone", form)
        .intro(intro)
        .notice(notice)
        .error(screen.error_message.as_deref())
        .hints(hints)
}

pub fn profile_view(screen: &ProfileScreen, minimum_age: i32) -> WizardView<'_> {
    let form = screen.form();
    let intro = match form.wizard().current().id {
        "name" => vec![muted("This is how you'll appear to other members.")],
        "gender" => vec![muted("Use ↑↓ to choose. Pick Other to describe it yourself.")],
        "dob" => vec![
            muted(format!("You must be at least {} to join.", minimum_age)),
            muted("Use ←→ to pick day, month or year and ↑↓ to change it."),
        ],
        "location" => vec![muted("Where do you live now, and where are you from?")],
        "email" => vec![muted("We'll use it for account recovery.")],
        "instagram" | "linkedin" => vec![muted("Members review profiles before accepting you.")],
        _ => Vec::new(),
    };

    let notice = screen.is_saving().then(|| muted("Saving your profile..."));
    let hints = if form.review().is_some() {
        vec![("←→", "choose"), ("Enter", "select"), ("Esc", "edit")]
    } else {
        vec![("Enter", "continue"), ("Esc", "back"), ("Tab", "next field"), ("↑↓", "change")]
    };

    WizardView::new("Tell us about yourself", form)
        .intro(intro)
        .notice(notice)
        .error(screen.error_message.as_deref())
        .hints(hints)
}

pub fn referral_view(screen: &ReferralScreen) -> WizardView<'_> {
    let form = screen.form();
    let wizard = form.wizard();
    let intro = match wizard.current().id {
        "intro" => {
            let mut lines = vec![
                text("Luyona is invite-only."),
                muted("Let us check your contacts for members who can vouch for you."),
            ];
            let answer = wizard.fields().text(CONTACTS_PERMISSION);
            if !answer.is_empty() {
                lines.push(muted(format!("Contacts access: {}", answer)));
            }
            lines
        }
        _ => vec![text("Enter the referral code you received.")],
    };

    WizardView::new("Referral", form)
        .intro(intro)
        .hints(vec![("Enter", "continue"), ("Esc", "back")])
}
