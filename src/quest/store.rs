//! In-memory quest store: live records plus the two daily counters.
//!
//! Invariants held here:
//! - at most one record per canonical server name
//! - a present record is always `Ongoing` or `Done`
//! - `added_today` grows only through [`QuestStore::insert_new`] and drops only on reset
//! - `claimed_today` grows only through [`QuestStore::claim`]
//!
//! Records are kept in insertion order so listings can tie-break stably. The store is tiny
//! (one slot per configured server) so a `Vec` scan is all the indexing it needs.

use super::types::{QuestRecord, QuestStatus};

#[derive(Debug, Default)]
pub struct QuestStore {
    records: Vec<QuestRecord>,
    added_today: u32,
    claimed_today: u32,
}

impl QuestStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, server: &str) -> Option<&QuestRecord> {
        self.records.iter().find(|r| r.server == server)
    }

    pub fn contains(&self, server: &str) -> bool {
        self.get(server).is_some()
    }

    /// Live records in insertion order.
    pub fn records(&self) -> &[QuestRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn added_today(&self) -> u32 {
        self.added_today
    }

    pub fn claimed_today(&self) -> u32 {
        self.claimed_today
    }

    /// Insert a record and count it against today's adds, both or neither.
    /// Returns `false` without touching anything if the server already has a record.
    pub(crate) fn insert_new(&mut self, record: QuestRecord) -> bool {
        if self.contains(&record.server) {
            return false;
        }
        self.records.push(record);
        self.added_today = self.added_today.saturating_add(1);
        true
    }

    /// Set the status in place, returning the previous one.
    pub(crate) fn set_status(&mut self, server: &str, status: QuestStatus) -> Option<QuestStatus> {
        let record = self.records.iter_mut().find(|r| r.server == server)?;
        Some(std::mem::replace(&mut record.status, status))
    }

    /// Remove the record and count the claim.
    pub(crate) fn claim(&mut self, server: &str) -> Option<QuestRecord> {
        let pos = self.records.iter().position(|r| r.server == server)?;
        let record = self.records.remove(pos);
        self.claimed_today = self.claimed_today.saturating_add(1);
        Some(record)
    }

    /// Zero the add counter, returning the value it held.
    pub(crate) fn reset_added(&mut self) -> u32 {
        std::mem::take(&mut self.added_today)
    }

    /// Zero the claim counter, returning the value it held.
    pub(crate) fn reset_claimed(&mut self) -> u32 {
        std::mem::take(&mut self.claimed_today)
    }
}
