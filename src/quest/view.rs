//! Read-only view of the quest board, produced by `list` and consumed by renderers.

use super::types::{QuestRecord, QuestStatus};

/// Color/priority hint attached to rows and to the view as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorHint {
    /// An ongoing quest.
    Active,
    /// A finished quest waiting to be claimed.
    Neutral,
    /// Nothing to show.
    Default,
}

impl From<QuestStatus> for ColorHint {
    fn from(status: QuestStatus) -> Self {
        match status {
            QuestStatus::Ongoing => ColorHint::Active,
            QuestStatus::Done => ColorHint::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestRow {
    pub server: String,
    pub description: String,
    pub status: QuestStatus,
}

impl QuestRow {
    pub fn hint(&self) -> ColorHint {
        self.status.into()
    }
}

impl From<&QuestRecord> for QuestRow {
    fn from(record: &QuestRecord) -> Self {
        Self {
            server: record.server.clone(),
            description: record.description.clone(),
            status: record.status,
        }
    }
}

/// What a listing was asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListScope {
    /// A single server, by canonical name.
    Server(String),
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestView {
    pub scope: ListScope,
    /// Rows in display order. Empty means the empty-state row should be shown.
    pub rows: Vec<QuestRow>,
    pub added_today: u32,
    pub add_limit: u32,
    pub claimed_today: u32,
    pub claim_limit: u32,
}

impl QuestView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Hint for the view as a whole: the first (highest priority) row wins.
    pub fn hint(&self) -> ColorHint {
        self.rows.first().map(QuestRow::hint).unwrap_or(ColorHint::Default)
    }
}

/// Stable sort by status rank; equal statuses keep their insertion order.
pub(crate) fn sort_rows(rows: &mut [QuestRow]) {
    rows.sort_by_key(|row| row.status.sort_rank());
}
