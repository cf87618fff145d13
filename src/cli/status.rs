// ABOUTME: CLI status and profile commands
//
// status: who is signed in and whether a profile is stored (text/JSON output)
// profile: print the stored profile of the signed-in user

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;

use super::OutputFormat;
use crate::app::actions::{check_session, load_profile, SessionProbe};
use crate::flows::ProfileRecord;
use crate::services::{ServiceError, Services};

/// JSON output structure for status command
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct StatusOutput {
    pub signed_in: bool,
    pub uid: Option<String>,
    pub phone: Option<String>,
    pub has_profile: bool,
}

pub async fn collect_status(services: &Services) -> Result<StatusOutput> {
    let probe = check_session(services)
        .await
        .context("Failed to read the local session")?;
    Ok(match probe {
        SessionProbe::SignedOut => StatusOutput {
            signed_in: false,
            uid: None,
            phone: None,
            has_profile: false,
        },
        SessionProbe::SignedIn {
            identity,
            has_profile,
        } => StatusOutput {
            signed_in: true,
            uid: Some(identity.uid),
            phone: Some(identity.phone),
            has_profile,
        },
    })
}

/// Execute the status command
pub async fn execute(services: &Services, format: OutputFormat) -> Result<()> {
    let status = collect_status(services).await?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&status).context("Failed to serialize status")?
            );
        }
        OutputFormat::Text => {
            let (Some(uid), Some(phone)) = (&status.uid, &status.phone) else {
                println!("\x1b[33m●\x1b[0m Not signed in");
                println!();
                println!("Run 'luyona' to start onboarding.");
                return Ok(());
            };
            let profile = if status.has_profile {
                "\x1b[32m●\x1b[0m Complete"
            } else {
                "\x1b[33m●\x1b[0m Not started"
            };
            println!("Signed in");
            println!("{}", "━".repeat(44));
            println!("User:         {uid}");
            println!("Phone:        {phone}");
            println!("Profile:      {profile}");
        }
    }

    Ok(())
}

/// The stored profile, or `None` when signed out or nothing is stored yet
pub async fn find_profile(services: &Services) -> Result<Option<ProfileRecord>> {
    match load_profile(services).await {
        Ok(profile) => Ok(profile),
        Err(ServiceError::NotSignedIn) => Ok(None),
        Err(e) => Err(e).context("Failed to load profile"),
    }
}

/// Execute the profile command. A missing profile is reported, not an error.
pub async fn profile(services: &Services, format: OutputFormat) -> Result<()> {
    let Some(record) = find_profile(services).await? else {
        match format {
            OutputFormat::Json => println!("null"),
            OutputFormat::Text => println!("No profile stored."),
        }
        return Ok(());
    };

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&record).context("Failed to serialize profile")?
            );
        }
        OutputFormat::Text => {
            let today = Local::now().date_naive();
            println!("{}", record.headline(today));
            println!("{}", "━".repeat(44));
            println!("Gender:       {}", record.gender);
            println!("Born:         {}", record.dob.format("%d %b %Y"));
            println!("Lives in:     {}", record.current_location);
            println!("From:         {}", record.home_location);
            println!("Email:        {}", record.email);
            println!("Instagram:    @{}", record.instagram_username);
            println!("LinkedIn:     linkedin.com/in/{}", record.linked_in_username);
            println!("Phone:        {}", record.phone_number);
            println!("Joined:       {}", record.created_at.format("%Y-%m-%d %H:%M:%S UTC"));
        }
    }

    Ok(())
}
