// ABOUTME: UI components for every screen: wizard steps, digit slots, dialogs and the home shell

pub mod confirmation_dialog;
pub mod home;
pub mod layout;
pub mod onboarding;
pub mod palette;
pub mod slots;
pub mod splash;
pub mod waitlist;
pub mod wizard;

pub use confirmation_dialog::ConfirmationDialogComponent;
pub use home::HomeComponent;
pub use layout::LayoutComponent;
pub use slots::SlotsComponent;
pub use splash::{GatewayComponent, SplashComponent};
pub use waitlist::WaitlistComponent;
pub use wizard::{WizardComponent, WizardView};
