// ABOUTME: CLI sign-out and reset commands
//
// sign-out: end the local session, keeping stored profiles
// reset: delete the whole data directory after a confirmation prompt

use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

use super::ResetArgs;
use crate::services::Services;

/// Execute the sign-out command
pub async fn sign_out(services: &Services) -> Result<()> {
    let current = services
        .session
        .current_user()
        .await
        .context("Failed to read the local session")?;

    let Some(identity) = current else {
        println!("Not signed in.");
        return Ok(());
    };

    services
        .session
        .sign_out()
        .await
        .context("Failed to sign out")?;
    info!(uid = %identity.uid, "signed out from the command line");
    println!("Signed out {}.", identity.phone);
    Ok(())
}

/// Remove `data_dir` and everything under it. Returns false when there was
/// nothing to remove.
pub async fn wipe_data_dir(data_dir: &Path) -> Result<bool> {
    match tokio::fs::remove_dir_all(data_dir).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => {
            Err(e).with_context(|| format!("Failed to remove {}", data_dir.display()))
        }
    }
}

/// Execute the reset command
pub async fn reset(args: ResetArgs, data_dir: &Path) -> Result<()> {
    if !args.yes {
        print!(
            "Delete all local Luyona data in '{}'? [y/N] ",
            data_dir.display()
        );
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    if wipe_data_dir(data_dir).await? {
        info!(path = %data_dir.display(), "local data removed");
        println!("Local data removed.");
    } else {
        println!("Nothing to remove.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_wipe_removes_store_and_tolerates_missing_dir() {
        let temp = TempDir::new().unwrap();
        let data_dir = temp.path().join("luyona");
        let services = Services::local(&data_dir);
        services.session.sign_in("+919876543210").await.unwrap();
        assert!(data_dir.exists());

        assert!(wipe_data_dir(&data_dir).await.unwrap());
        assert!(!data_dir.exists());
        assert!(!wipe_data_dir(&data_dir).await.unwrap());
    }

    #[tokio::test]
    async fn test_sign_out_when_signed_out_is_ok() {
        sign_out(&Services::in_memory()).await.unwrap();
    }
}
