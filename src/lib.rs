//! # Guildquest - guild quest tracker for chat servers
//!
//! Guildquest is a command bot that tracks one "guild quest" per game server through a
//! small lifecycle (ongoing → done → claimed), enforces daily quotas on adding and claiming,
//! and renders the current board on demand.
//!
//! ## Features
//!
//! - **Prefix Commands**: `!gqa`, `!gql`, `!gqu` and `!help`, with a configurable prefix.
//! - **Server Codes**: short case-insensitive codes (`cal`, `v1`, ...) mapped to canonical names.
//! - **Daily Quotas**: separate add and claim limits, reset at local midnight in a fixed timezone.
//! - **Transports**: Discord via serenity, or a stdin console for running without a token.
//! - **Audit Logging**: every board mutation is logged on a dedicated `audit` target.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use guildquest::bot::{CommandParser, Dispatcher};
//! use guildquest::config::Config;
//! use guildquest::quest::QuestController;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_or_default("config.toml").await?;
//!     let board = QuestController::new(config.registry()?, config.quests.policy()).into_shared();
//!     let dispatcher = Dispatcher::new(CommandParser::new(config.bot.command_prefix.clone()), board);
//!     if let Some(reply) = dispatcher.handle("!gqa cal Boss hunt").await {
//!         println!("{}", reply.to_plain_text());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`quest`] - registry, store, lifecycle controller and the daily reset scheduler
//! - [`bot`] - command parsing, dispatch, reply rendering and transports
//! - [`config`] - configuration loading and validation
//! - [`logutil`] - log escaping and the audit target
//! - [`metrics`] - in-process command counters

pub mod bot;
pub mod config;
pub mod logutil;
pub mod metrics;
pub mod quest;
