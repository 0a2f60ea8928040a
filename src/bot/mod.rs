//! # Bot command surface
//!
//! Everything between a chat line and the quest core:
//!
//! - [`commands`] - prefix command parsing into [`commands::BotCommand`]
//! - [`dispatch`] - runs parsed commands against the shared quest board
//! - [`reply`] - response payloads (text or embed view) and their renderers
//! - [`discord`] - serenity event handler and client startup
//! - [`console`] - stdin/stdout transport for running without a token
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────────┐
//! │  Discord /   │───→│  Dispatcher  │───→│ QuestController  │
//! │  Console     │←───│  + Reply     │    │ (SharedBoard)    │
//! └──────────────┘    └──────────────┘    └──────────────────┘
//!                                                  ↑
//!                                         ┌──────────────────┐
//!                                         │  ResetScheduler  │
//!                                         └──────────────────┘
//! ```

pub mod commands;
pub mod console;
pub mod discord;
pub mod dispatch;
pub mod reply;

pub use commands::{BotCommand, CommandParser};
pub use dispatch::Dispatcher;
pub use reply::Reply;
