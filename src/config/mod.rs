//! # Configuration
//!
//! Typed TOML configuration with defaults for every option.
//!
//! ## Sections
//!
//! - [`BotConfig`] - command prefix, display name, token variable
//! - [`QuestConfig`] - daily add/claim limits and claim reset behavior
//! - [`ScheduleConfig`] - reset timezone and check interval
//! - [`LoggingConfig`] - log level, log file and audit file
//! - `[[servers]]` - the server code registry, in display order
//!
//! ## Example
//!
//! ```toml
//! [bot]
//! name = "Guild Quest Bot"
//! command_prefix = "!"
//! token_env = "DISCORD_BOT_TOKEN"
//!
//! [quests]
//! add_limit = 10
//! claim_limit = 10
//! reset_claims_daily = false
//!
//! [schedule]
//! timezone = "Asia/Singapore"
//! check_interval_secs = 60
//!
//! [logging]
//! level = "info"
//! file = "guildquest.log"
//!
//! [[servers]]
//! code = "cal"
//! name = "Calpheon"
//! ```
//!
//! The bot token itself never lives in this file; it is read from the environment variable
//! named by `bot.token_env`.

use anyhow::{anyhow, bail, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::fs;

use crate::quest::registry::{default_entries, ServerEntry, ServerRegistry};
use crate::quest::{QuestPolicy, RegistryError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub quests: QuestConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default = "default_entries")]
    pub servers: Vec<ServerEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default = "default_bot_name")]
    pub name: String,
    /// Text that must precede every command, e.g. `!` for `!gql`.
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
    /// Environment variable holding the bot token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

fn default_bot_name() -> String {
    "Guild Quest Bot".to_string()
}

fn default_command_prefix() -> String {
    "!".to_string()
}

fn default_token_env() -> String {
    "DISCORD_BOT_TOKEN".to_string()
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_bot_name(),
            command_prefix: default_command_prefix(),
            token_env: default_token_env(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestConfig {
    pub add_limit: u32,
    pub claim_limit: u32,
    /// Also zero the claimed counter at the daily reset. Off by default: the claim counter
    /// then behaves as a lifetime cap until restart.
    #[serde(default)]
    pub reset_claims_daily: bool,
}

impl Default for QuestConfig {
    fn default() -> Self {
        let policy = QuestPolicy::default();
        Self {
            add_limit: policy.add_limit,
            claim_limit: policy.claim_limit,
            reset_claims_daily: policy.reset_claims_daily,
        }
    }
}

impl QuestConfig {
    pub fn policy(&self) -> QuestPolicy {
        QuestPolicy {
            add_limit: self.add_limit,
            claim_limit: self.claim_limit,
            reset_claims_daily: self.reset_claims_daily,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// IANA timezone whose midnight starts a new quest day.
    pub timezone: String,
    /// Seconds between clock checks.
    #[serde(default = "default_check_interval")]
    pub check_interval_secs: u64,
}

fn default_check_interval() -> u64 {
    60
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            timezone: "Asia/Singapore".to_string(),
            check_interval_secs: default_check_interval(),
        }
    }
}

impl ScheduleConfig {
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow!("Invalid schedule.timezone '{}': {}", self.timezone, e))
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
    /// Separate file receiving only quest mutation records.
    #[serde(default)]
    pub audit_file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            audit_file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    ///
    /// Runs before logging is set up, so callers report the fallback themselves.
    pub async fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    /// Reject values the bot cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.bot.command_prefix.trim().is_empty()
            || self.bot.command_prefix.chars().any(char::is_whitespace)
        {
            bail!("bot.command_prefix must be non-empty and contain no whitespace");
        }
        if self.bot.token_env.trim().is_empty() {
            bail!("bot.token_env must name an environment variable");
        }
        if self.quests.add_limit == 0 || self.quests.claim_limit == 0 {
            bail!("quests.add_limit and quests.claim_limit must be at least 1");
        }
        if self.schedule.check_interval_secs == 0 {
            bail!("schedule.check_interval_secs must be at least 1");
        }
        self.schedule.tz()?;
        if self.servers.is_empty() {
            bail!("at least one [[servers]] entry is required");
        }
        self.registry()?;
        Ok(())
    }

    pub fn registry(&self) -> Result<ServerRegistry, RegistryError> {
        ServerRegistry::new(self.servers.iter().cloned())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bot: BotConfig::default(),
            quests: QuestConfig::default(),
            schedule: ScheduleConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                file: Some("guildquest.log".to_string()),
                audit_file: Some("guildquest-audit.log".to_string()),
            },
            servers: default_entries(),
        }
    }
}
