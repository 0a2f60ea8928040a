use thiserror::Error;

use super::registry::ServerEntry;
use super::types::VALID_STATUS_TOKENS;

/// Rejections produced by the quest controller.
///
/// Every variant is recoverable. The `Display` text is what the command surface sends back
/// to the user, so wording matters here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestError {
    /// Code not present in the server registry; carries the full registry for display.
    #[error(
        "Unknown server abbreviation \"{}\".\nHere is a list of valid server abbreviations:\n{}",
        .code,
        format_listing(.valid)
    )]
    UnknownServer {
        code: String,
        valid: Vec<ServerEntry>,
    },

    #[error("You have reached the daily quest limit of {limit}. Try again tomorrow.")]
    DailyAddLimitReached { limit: u32 },

    #[error("The limit of {limit} claimed quests has been reached for today.")]
    DailyClaimLimitReached { limit: u32 },

    #[error("A quest is already in progress for {server}. Please complete or remove it first.")]
    QuestAlreadyExists { server: String },

    #[error("No quest found for server \"{server}\".")]
    NoQuestForServer { server: String },

    #[error(
        "Invalid status \"{}\". Choose from: {}.",
        .status,
        VALID_STATUS_TOKENS.join(", ")
    )]
    InvalidStatus { status: String },

    /// Add requested without a quest name.
    #[error("A quest name is required.")]
    MissingDescription,
}

/// Errors raised while building the server registry from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("server entry #{index} has an empty code")]
    EmptyCode { index: usize },

    #[error("server code \"{0}\" is defined more than once")]
    DuplicateCode(String),

    #[error("server code \"{0}\" has an empty name")]
    EmptyName(String),
}

/// One `code = Name` line per registry entry, in registry order.
pub fn format_listing(entries: &[ServerEntry]) -> String {
    entries
        .iter()
        .map(|e| format!("{} = {}", e.code, e.name))
        .collect::<Vec<_>>()
        .join("\n")
}
