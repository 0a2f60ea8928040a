//! Chat command parser.
//!
//! Turns a raw chat line into a typed [`BotCommand`]. Only text that starts with the
//! configured prefix (default `!`) immediately followed by a known command name is treated
//! as a command; everything else is [`BotCommand::Unknown`] and the bot stays quiet. Command
//! names are case-insensitive.
//!
//! | Command | Arguments |
//! |---------|-----------|
//! | `gqa`   | `<server> <quest name...>` |
//! | `gql`   | `[server]` |
//! | `gqu`   | `<server> <status>` |
//! | `help`  | none |
use log::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Add { code: String, description: String },
    List { code: Option<String> },
    Update { code: String, status: String },
    Help,
    /// A known command with missing arguments; carries the usage line to reply with.
    Invalid(String),
    Unknown,
}

impl BotCommand {
    /// Name used for metrics.
    pub fn name(&self) -> &'static str {
        match self {
            BotCommand::Add { .. } => "gqa",
            BotCommand::List { .. } => "gql",
            BotCommand::Update { .. } => "gqu",
            BotCommand::Help => "help",
            BotCommand::Invalid(_) => "invalid",
            BotCommand::Unknown => "unknown",
        }
    }
}

pub struct CommandParser {
    prefix: String,
}

impl CommandParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn parse(&self, raw: &str) -> BotCommand {
        let trimmed = raw.trim();
        let Some(body) = trimmed.strip_prefix(self.prefix.as_str()) else {
            return BotCommand::Unknown;
        };
        if body.is_empty() || body.starts_with(char::is_whitespace) {
            return BotCommand::Unknown;
        }
        let (name, rest) = split_word(body);

        if name.eq_ignore_ascii_case("gqa") {
            let (code, description) = split_word(rest);
            if code.is_empty() || description.is_empty() {
                return BotCommand::Invalid(format!(
                    "Usage: {}gqa <server> <quest name>",
                    self.prefix
                ));
            }
            trace!("Parsed GQA {} from '{}'", code, raw);
            return BotCommand::Add {
                code: code.to_string(),
                description: description.to_string(),
            };
        }
        if name.eq_ignore_ascii_case("gql") {
            let (code, _) = split_word(rest);
            trace!("Parsed GQL from '{}'", raw);
            return BotCommand::List {
                code: (!code.is_empty()).then(|| code.to_string()),
            };
        }
        if name.eq_ignore_ascii_case("gqu") {
            let (code, rest) = split_word(rest);
            let (status, _) = split_word(rest);
            if code.is_empty() || status.is_empty() {
                return BotCommand::Invalid(format!(
                    "Usage: {}gqu <server> <ongoing|done|claimed>",
                    self.prefix
                ));
            }
            trace!("Parsed GQU {} {} from '{}'", code, status, raw);
            return BotCommand::Update {
                code: code.to_string(),
                status: status.to_string(),
            };
        }
        if name.eq_ignore_ascii_case("help") {
            return BotCommand::Help;
        }
        BotCommand::Unknown
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new("!")
    }
}

/// Split off the first whitespace-delimited word; the remainder is trimmed.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (s, ""),
    }
}
