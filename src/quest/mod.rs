//! # Quest tracking core
//!
//! One guild quest per game server, tracked through a small lifecycle with daily quotas.
//!
//! - [`registry`] - fixed code → canonical server name lookup
//! - [`store`] - live quest records and the daily counters
//! - [`controller`] - add, update/claim, list and daily reset, with all validation
//! - [`view`] - the read model returned by listings
//! - [`reset`] - the clock-driven daily reset scheduler
//! - [`errors`] - user-facing rejections
//!
//! ```rust
//! use guildquest::quest::{QuestController, QuestPolicy, ServerRegistry};
//! use guildquest::quest::registry::default_entries;
//!
//! let registry = ServerRegistry::new(default_entries()).unwrap();
//! let mut board = QuestController::new(registry, QuestPolicy::default());
//! board.add("cal", "Boss hunt").unwrap();
//! board.update("cal", "done").unwrap();
//! assert_eq!(board.list(None).unwrap().rows.len(), 1);
//! ```

pub mod controller;
pub mod errors;
pub mod registry;
pub mod reset;
pub mod store;
pub mod types;
pub mod view;

pub use controller::{QuestController, QuestPolicy, ResetOutcome, SharedBoard, UpdateOutcome};
pub use errors::{QuestError, RegistryError};
pub use registry::{ServerEntry, ServerRegistry};
pub use reset::{DailyResetTracker, ResetScheduler};
pub use types::{QuestRecord, QuestStatus, StatusToken};
pub use view::{ColorHint, ListScope, QuestRow, QuestView};
