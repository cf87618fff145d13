// ABOUTME: Collaborator calls queued by screens and executed on the next app tick
// At most one action is in flight; its result is handed back to the active screen

use tracing::{info, warn};

use crate::flows::ProfileRecord;
use crate::services::{Identity, ServiceError, ServiceResult, Services, USERS_COLLECTION};
use crate::wizard::FieldMap;

#[derive(Debug, Clone, PartialEq)]
pub enum AsyncAction {
    /// Splash routing: who is signed in and do they have a profile
    CheckSession,
    SignIn { phone: String },
    SaveProfile { fields: FieldMap },
    /// `request` is echoed back so the caller can drop answers it no longer wants
    LoadProfile { request: u64 },
    SignOut,
    DeleteAccount,
}

/// Session state as seen by the splash screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionProbe {
    SignedOut,
    SignedIn { identity: Identity, has_profile: bool },
}

#[derive(Debug)]
pub enum ActionResult {
    SessionChecked(ServiceResult<SessionProbe>),
    SignedIn(ServiceResult<Identity>),
    ProfileSaved(ServiceResult<()>),
    /// `Ok(None)` when the signed-in user has no profile yet
    ProfileLoaded {
        request: u64,
        outcome: ServiceResult<Option<ProfileRecord>>,
    },
    SignedOut(ServiceResult<()>),
    AccountDeleted(ServiceResult<()>),
}

impl ActionResult {
    pub fn error(&self) -> Option<&ServiceError> {
        match self {
            Self::SessionChecked(Err(e))
            | Self::SignedIn(Err(e))
            | Self::ProfileSaved(Err(e))
            | Self::ProfileLoaded { outcome: Err(e), .. }
            | Self::SignedOut(Err(e))
            | Self::AccountDeleted(Err(e)) => Some(e),
            _ => None,
        }
    }
}

pub async fn run_action(action: AsyncAction, services: &Services) -> ActionResult {
    info!(?action, "running async action");
    let result = match action {
        AsyncAction::CheckSession => ActionResult::SessionChecked(check_session(services).await),
        AsyncAction::SignIn { phone } => {
            ActionResult::SignedIn(services.session.sign_in(&phone).await)
        }
        AsyncAction::SaveProfile { fields } => {
            ActionResult::ProfileSaved(save_profile(services, &fields).await)
        }
        AsyncAction::LoadProfile { request } => ActionResult::ProfileLoaded {
            request,
            outcome: load_profile(services).await,
        },
        AsyncAction::SignOut => ActionResult::SignedOut(services.session.sign_out().await),
        AsyncAction::DeleteAccount => ActionResult::AccountDeleted(delete_account(services).await),
    };
    if let Some(e) = result.error() {
        warn!("async action failed: {}", e);
    }
    result
}

async fn signed_in(services: &Services) -> ServiceResult<Identity> {
    services
        .session
        .current_user()
        .await?
        .ok_or(ServiceError::NotSignedIn)
}

pub async fn check_session(services: &Services) -> ServiceResult<SessionProbe> {
    let Some(identity) = services.session.current_user().await? else {
        return Ok(SessionProbe::SignedOut);
    };
    let has_profile = services
        .store
        .get(USERS_COLLECTION, &identity.uid)
        .await?
        .is_some();
    Ok(SessionProbe::SignedIn {
        identity,
        has_profile,
    })
}

async fn save_profile(services: &Services, fields: &FieldMap) -> ServiceResult<()> {
    let identity = signed_in(services).await?;
    let record = ProfileRecord::from_fields(fields, &identity.phone)
        .ok_or_else(|| ServiceError::Backend("profile is missing a date of birth".to_string()))?;
    let document = serde_json::to_value(&record)?;
    services
        .store
        .set(USERS_COLLECTION, &identity.uid, document)
        .await?;
    info!(uid = %identity.uid, "profile saved");
    Ok(())
}

pub async fn load_profile(services: &Services) -> ServiceResult<Option<ProfileRecord>> {
    let identity = signed_in(services).await?;
    match services.store.get(USERS_COLLECTION, &identity.uid).await? {
        Some(document) => Ok(Some(serde_json::from_value(document)?)),
        None => Ok(None),
    }
}

/// Document first, then the account, so a failed account deletion can be retried
async fn delete_account(services: &Services) -> ServiceResult<()> {
    let identity = signed_in(services).await?;
    services
        .store
        .delete(USERS_COLLECTION, &identity.uid)
        .await?;
    services.session.delete_account().await?;
    info!(uid = %identity.uid, "account and profile deleted");
    Ok(())
}
