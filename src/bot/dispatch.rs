//! Command dispatcher shared by every transport.
//!
//! Parses one inbound line, runs the matching controller operation under the board lock and
//! renders the reply. The lock is held for exactly one operation and released before the
//! transport does any I/O, so a slow send never blocks the reset scheduler or other commands.
//! Controller rejections become text replies here; nothing propagates past this boundary.
use log::{debug, info};

use super::commands::{BotCommand, CommandParser};
use super::reply::{self, Reply};
use crate::logutil::escape_log;
use crate::metrics;
use crate::quest::{QuestError, SharedBoard};

pub struct Dispatcher {
    parser: CommandParser,
    board: SharedBoard,
}

impl Dispatcher {
    pub fn new(parser: CommandParser, board: SharedBoard) -> Self {
        Self { parser, board }
    }

    pub fn board(&self) -> &SharedBoard {
        &self.board
    }

    pub fn prefix(&self) -> &str {
        self.parser.prefix()
    }

    /// Handle one chat line. `None` means the line was not addressed to the bot.
    pub async fn handle(&self, raw: &str) -> Option<Reply> {
        let command = self.parser.parse(raw);
        if command == BotCommand::Unknown {
            return None;
        }
        metrics::record_command(command.name());
        debug!("Dispatching {}: '{}'", command.name(), escape_log(raw));

        let reply = match command {
            BotCommand::Add { code, description } => {
                let result = self.board.lock().await.add(&code, &description);
                result.map(|record| reply::added(&record))
            }
            BotCommand::List { code } => {
                let result = self.board.lock().await.list(code.as_deref());
                result.map(|view| reply::quest_list(&view))
            }
            BotCommand::Update { code, status } => {
                let result = self.board.lock().await.update(&code, &status);
                result.map(|outcome| reply::updated(&outcome))
            }
            BotCommand::Help => Ok(reply::help(self.parser.prefix())),
            BotCommand::Invalid(usage) => Ok(Reply::Text(usage)),
            BotCommand::Unknown => return None,
        };
        Some(reply.unwrap_or_else(|err| Self::rejected(&err)))
    }

    fn rejected(err: &QuestError) -> Reply {
        metrics::inc_rejected();
        info!("Command rejected: {}", escape_log(&err.to_string()));
        reply::rejected(err)
    }
}
