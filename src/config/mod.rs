// ABOUTME: Configuration management for luyona
// Handles timing, phone, profile and referral settings persisted as TOML

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "LUYONA_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application version
    #[serde(default = "default_version")]
    pub version: String,

    /// Root for the local document store, session file and logs
    /// (default: ~/.luyona)
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Timers used by the onboarding screens
    #[serde(default)]
    pub timing: TimingConfig,

    /// Phone verification settings
    #[serde(default)]
    pub phone: PhoneConfig,

    /// Profile intake settings
    #[serde(default)]
    pub profile: ProfileConfig,

    /// Referral entry settings
    #[serde(default)]
    pub referral: ReferralConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// How long the splash logo stays up (default: 2000ms)
    #[serde(default = "default_splash_delay")]
    pub splash_delay_ms: u64,

    /// Seconds before an OTP can be resent (default: 120)
    #[serde(default = "default_resend_countdown")]
    pub resend_countdown_secs: u32,

    /// Length of the simulated submission progress (default: 4000ms)
    #[serde(default = "default_submission_duration")]
    pub submission_duration_ms: u64,

    /// Progress update interval (default: 50ms)
    #[serde(default = "default_submission_tick")]
    pub submission_tick_ms: u64,

    /// UI redraw/poll interval (default: 250ms)
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            splash_delay_ms: default_splash_delay(),
            resend_countdown_secs: default_resend_countdown(),
            submission_duration_ms: default_submission_duration(),
            submission_tick_ms: default_submission_tick(),
            tick_rate_ms: default_tick_rate(),
        }
    }
}

impl TimingConfig {
    pub fn splash_delay(&self) -> Duration {
        Duration::from_millis(self.splash_delay_ms)
    }

    pub fn submission_tick(&self) -> Duration {
        Duration::from_millis(self.submission_tick_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    /// Number of progress updates in one submission run
    pub fn submission_ticks(&self) -> u32 {
        let ticks = self.submission_duration_ms / self.submission_tick_ms.max(1);
        u32::try_from(ticks.max(1)).unwrap_or(u32::MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneConfig {
    /// Dialling prefix shown in front of the number (default: "+91")
    #[serde(default = "default_country_code")]
    pub country_code: String,

    /// Digits in a phone number (default: 10)
    #[serde(default = "default_number_length")]
    pub number_length: usize,

    /// Digits in the OTP (default: 6)
    #[serde(default = "default_code_length")]
    pub code_length: usize,
}

impl Default for PhoneConfig {
    fn default() -> Self {
        Self {
            country_code: default_country_code(),
            number_length: default_number_length(),
            code_length: default_code_length(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Minimum age in whole years (default: 18)
    #[serde(default = "default_minimum_age")]
    pub minimum_age: i32,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            minimum_age: default_minimum_age(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralConfig {
    /// Digits in a referral code (default: 6)
    #[serde(default = "default_code_length")]
    pub code_length: usize,
}

impl Default for ReferralConfig {
    fn default() -> Self {
        Self {
            code_length: default_code_length(),
        }
    }
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_splash_delay() -> u64 {
    2000
}

fn default_resend_countdown() -> u32 {
    120
}

fn default_submission_duration() -> u64 {
    4000
}

fn default_submission_tick() -> u64 {
    50
}

fn default_tick_rate() -> u64 {
    250
}

fn default_country_code() -> String {
    "+91".to_string()
}

fn default_number_length() -> usize {
    10
}

fn default_code_length() -> usize {
    6
}

fn default_minimum_age() -> i32 {
    18
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            data_dir: None,
            timing: TimingConfig::default(),
            phone: PhoneConfig::default(),
            profile: ProfileConfig::default(),
            referral: ReferralConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the user config file; missing file means defaults
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = Self::load_from(&path)?;
        config.apply_env();
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: AppConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the user config file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    /// ~/.luyona/config.toml
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::base_dir()?.join("config.toml"))
    }

    /// ~/.luyona
    pub fn base_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".luyona"))
    }

    /// Effective data directory
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::base_dir(),
        }
    }

    pub fn log_dir(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("logs"))
    }

    fn apply_env(&mut self) {
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                self.data_dir = Some(PathBuf::from(dir));
            }
        }
    }

    /// Reject values the flows cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.phone.number_length == 0 {
            bail!("phone.number_length must be greater than zero");
        }
        if self.phone.code_length == 0 {
            bail!("phone.code_length must be greater than zero");
        }
        if self.referral.code_length == 0 {
            bail!("referral.code_length must be greater than zero");
        }
        if self.timing.submission_tick_ms == 0 {
            bail!("timing.submission_tick_ms must be greater than zero");
        }
        if self.timing.tick_rate_ms == 0 {
            bail!("timing.tick_rate_ms must be greater than zero");
        }
        if self.profile.minimum_age < 0 {
            bail!("profile.minimum_age cannot be negative");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(config.timing.resend_countdown_secs, 120);
        assert_eq!(config.phone.number_length, 10);
        assert_eq!(config.referral.code_length, 6);
        assert_eq!(config.profile.minimum_age, 18);
        assert_eq!(config.timing.submission_ticks(), 80);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[timing]\nresend_countdown_secs = 30\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.timing.resend_countdown_secs, 30);
        assert_eq!(config.timing.splash_delay_ms, 2000);
        assert_eq!(config.phone.country_code, "+91");
    }

    #[test]
    fn test_save_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.data_dir = Some(temp_dir.path().to_path_buf());
        config.phone.country_code = "+44".to_string();

        config.save_to(&path).unwrap();
        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[referral]\ncode_length = 0\n").unwrap();
        assert!(AppConfig::load_from(&path).is_err());

        fs::write(&path, "not = [valid").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }
}
