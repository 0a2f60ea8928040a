//! Quest record and status types shared by the store, controller and renderers.

use std::fmt;

/// Resting states of a quest slot. Claiming is not a state: it consumes the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestStatus {
    Ongoing,
    Done,
}

impl QuestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestStatus::Ongoing => "ongoing",
            QuestStatus::Done => "done",
        }
    }

    /// Position in the full listing: ongoing quests first, then done.
    pub fn sort_rank(&self) -> u8 {
        match self {
            QuestStatus::Ongoing => 0,
            QuestStatus::Done => 1,
        }
    }
}

impl fmt::Display for QuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tokens accepted by the update command, in display order.
pub const VALID_STATUS_TOKENS: [&str; 3] = ["ongoing", "done", "claimed"];

/// Target of an update request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusToken {
    Set(QuestStatus),
    Claimed,
}

impl StatusToken {
    /// Parse a user-supplied status (case-insensitive, surrounding whitespace ignored).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "ongoing" => Some(StatusToken::Set(QuestStatus::Ongoing)),
            "done" => Some(StatusToken::Set(QuestStatus::Done)),
            "claimed" => Some(StatusToken::Claimed),
            _ => None,
        }
    }
}

/// The tracked quest for one server. `server` is the canonical name and the record's identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestRecord {
    pub server: String,
    pub description: String,
    pub status: QuestStatus,
}

impl QuestRecord {
    pub fn new(server: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            description: description.into(),
            status: QuestStatus::Ongoing,
        }
    }
}
