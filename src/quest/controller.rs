//! Quest lifecycle controller: add, update/claim, list and the daily reset.
//!
//! Each server slot is a small state machine:
//!
//! ```text
//!   (empty) --add--> ONGOING <--update--> DONE
//!      ^                |                   |
//!      +-----claim------+-------claim-------+
//! ```
//!
//! The controller owns the registry, the store and the limits. It does no I/O; callers share
//! it as a [`SharedBoard`] and hold the lock for exactly one operation at a time, which is
//! what keeps counter updates and record changes atomic with respect to each other.

use log::debug;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::errors::QuestError;
use super::registry::ServerRegistry;
use super::store::QuestStore;
use super::types::{QuestRecord, QuestStatus, StatusToken};
use super::view::{sort_rows, ListScope, QuestRow, QuestView};
use crate::logutil::{audit_log, escape_log};

/// Handle shared by the command dispatcher and the reset scheduler.
///
/// `tokio::sync::Mutex` queues waiters in FIFO order, so operations apply in arrival order.
pub type SharedBoard = Arc<Mutex<QuestController>>;

/// Daily quotas and reset behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestPolicy {
    pub add_limit: u32,
    pub claim_limit: u32,
    /// Whether the daily reset also clears the claim counter.
    pub reset_claims_daily: bool,
}

impl Default for QuestPolicy {
    fn default() -> Self {
        Self {
            add_limit: 10,
            claim_limit: 10,
            reset_claims_daily: false,
        }
    }
}

/// Result of a successful update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    StatusChanged {
        record: QuestRecord,
        previous: QuestStatus,
    },
    /// The record was consumed.
    Claimed {
        record: QuestRecord,
        claimed_today: u32,
    },
}

/// Counter values cleared by a daily reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetOutcome {
    pub added_cleared: u32,
    /// `None` when the claim counter is not reset daily.
    pub claimed_cleared: Option<u32>,
}

#[derive(Debug)]
pub struct QuestController {
    registry: ServerRegistry,
    store: QuestStore,
    policy: QuestPolicy,
}

impl QuestController {
    pub fn new(registry: ServerRegistry, policy: QuestPolicy) -> Self {
        Self {
            registry,
            store: QuestStore::new(),
            policy,
        }
    }

    pub fn into_shared(self) -> SharedBoard {
        Arc::new(Mutex::new(self))
    }

    pub fn registry(&self) -> &ServerRegistry {
        &self.registry
    }

    pub fn store(&self) -> &QuestStore {
        &self.store
    }

    pub fn policy(&self) -> &QuestPolicy {
        &self.policy
    }

    fn resolve(&self, code: &str) -> Result<String, QuestError> {
        self.registry
            .resolve(code)
            .map(str::to_string)
            .ok_or_else(|| QuestError::UnknownServer {
                code: code.trim().to_lowercase(),
                valid: self.registry.entries().to_vec(),
            })
    }

    /// Create an ongoing quest for the server behind `code`.
    ///
    /// Checks run in order: server code, quest name, daily add limit, existing quest.
    pub fn add(&mut self, code: &str, description: &str) -> Result<QuestRecord, QuestError> {
        let server = self.resolve(code)?;
        let description = description.trim();
        if description.is_empty() {
            return Err(QuestError::MissingDescription);
        }
        if self.store.added_today() >= self.policy.add_limit {
            return Err(QuestError::DailyAddLimitReached {
                limit: self.policy.add_limit,
            });
        }

        let record = QuestRecord::new(server, description);
        if !self.store.insert_new(record.clone()) {
            return Err(QuestError::QuestAlreadyExists {
                server: record.server,
            });
        }
        audit_log!(
            "quest added: server={} quest=\"{}\" added_today={}/{}",
            record.server,
            escape_log(&record.description),
            self.store.added_today(),
            self.policy.add_limit
        );
        Ok(record)
    }

    /// Move a quest between ongoing and done, or claim (consume) it.
    ///
    /// Any non-claim status may follow any other; setting the current status again succeeds
    /// without change.
    pub fn update(&mut self, code: &str, status: &str) -> Result<UpdateOutcome, QuestError> {
        let server = self.resolve(code)?;
        let token = StatusToken::parse(status).ok_or_else(|| QuestError::InvalidStatus {
            status: status.trim().to_lowercase(),
        })?;
        if !self.store.contains(&server) {
            return Err(QuestError::NoQuestForServer { server });
        }

        match token {
            StatusToken::Claimed => {
                if self.store.claimed_today() >= self.policy.claim_limit {
                    return Err(QuestError::DailyClaimLimitReached {
                        limit: self.policy.claim_limit,
                    });
                }
                let record = self
                    .store
                    .claim(&server)
                    .ok_or(QuestError::NoQuestForServer { server })?;
                let claimed_today = self.store.claimed_today();
                audit_log!(
                    "quest claimed: server={} quest=\"{}\" claimed_today={}/{}",
                    record.server,
                    escape_log(&record.description),
                    claimed_today,
                    self.policy.claim_limit
                );
                Ok(UpdateOutcome::Claimed {
                    record,
                    claimed_today,
                })
            }
            StatusToken::Set(next) => {
                let previous = self
                    .store
                    .set_status(&server, next)
                    .ok_or_else(|| QuestError::NoQuestForServer {
                        server: server.clone(),
                    })?;
                if previous == next {
                    debug!("quest on {} already {}", server, next);
                } else {
                    audit_log!("quest status: server={} {} -> {}", server, previous, next);
                }
                let record = self
                    .store
                    .get(&server)
                    .cloned()
                    .ok_or(QuestError::NoQuestForServer { server })?;
                Ok(UpdateOutcome::StatusChanged { record, previous })
            }
        }
    }

    /// Snapshot of one server's slot or of the whole board.
    ///
    /// Only an unknown `code` fails; empty results come back as an empty view.
    pub fn list(&self, code: Option<&str>) -> Result<QuestView, QuestError> {
        let (scope, rows) = match code {
            Some(code) => {
                let server = self.resolve(code)?;
                let rows = self.store.get(&server).map(QuestRow::from).into_iter().collect();
                (ListScope::Server(server), rows)
            }
            None => {
                let mut rows: Vec<QuestRow> =
                    self.store.records().iter().map(QuestRow::from).collect();
                sort_rows(&mut rows);
                (ListScope::All, rows)
            }
        };
        Ok(QuestView {
            scope,
            rows,
            added_today: self.store.added_today(),
            add_limit: self.policy.add_limit,
            claimed_today: self.store.claimed_today(),
            claim_limit: self.policy.claim_limit,
        })
    }

    /// Start-of-day reset. Records are never touched.
    pub fn daily_reset(&mut self) -> ResetOutcome {
        let added_cleared = self.store.reset_added();
        let claimed_cleared = self
            .policy
            .reset_claims_daily
            .then(|| self.store.reset_claimed());
        audit_log!(
            "daily reset: added_cleared={} claimed_cleared={}",
            added_cleared,
            claimed_cleared.map_or_else(|| "kept".to_string(), |n| n.to_string())
        );
        ResetOutcome {
            added_cleared,
            claimed_cleared,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::registry::default_entries;

    fn controller() -> QuestController {
        QuestController::new(
            ServerRegistry::new(default_entries()).unwrap(),
            QuestPolicy::default(),
        )
    }

    #[test]
    fn add_resolves_code_case_insensitively() {
        let mut c = controller();
        let record = c.add("CAL", "Boss hunt").unwrap();
        assert_eq!(record.server, "Calpheon");
        assert_eq!(record.status, QuestStatus::Ongoing);
        assert_eq!(c.store().added_today(), 1);
    }

    #[test]
    fn add_unknown_code_carries_full_listing() {
        let mut c = controller();
        match c.add("zz", "Boss hunt").unwrap_err() {
            QuestError::UnknownServer { code, valid } => {
                assert_eq!(code, "zz");
                assert_eq!(valid.len(), 17);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(c.store().added_today(), 0);
    }

    #[test]
    fn add_requires_a_name() {
        let mut c = controller();
        assert_eq!(c.add("cal", "   "), Err(QuestError::MissingDescription));
        assert!(c.store().is_empty());
    }

    #[test]
    fn add_does_not_overwrite() {
        let mut c = controller();
        c.add("cal", "Boss hunt").unwrap();
        assert_eq!(
            c.add("cal", "Something else"),
            Err(QuestError::QuestAlreadyExists {
                server: "Calpheon".into()
            })
        );
        assert_eq!(c.store().get("Calpheon").unwrap().description, "Boss hunt");
        assert_eq!(c.store().added_today(), 1);
    }

    #[test]
    fn limit_check_precedes_duplicate_check() {
        let mut c = QuestController::new(
            ServerRegistry::new(default_entries()).unwrap(),
            QuestPolicy {
                add_limit: 1,
                ..QuestPolicy::default()
            },
        );
        c.add("cal", "Boss hunt").unwrap();
        assert_eq!(
            c.add("cal", "again"),
            Err(QuestError::DailyAddLimitReached { limit: 1 })
        );
    }

    #[test]
    fn update_validates_in_order() {
        let mut c = controller();
        assert!(matches!(
            c.update("zz", "bogus"),
            Err(QuestError::UnknownServer { .. })
        ));
        assert_eq!(
            c.update("cal", "Bogus"),
            Err(QuestError::InvalidStatus {
                status: "bogus".into()
            })
        );
        assert_eq!(
            c.update("cal", "done"),
            Err(QuestError::NoQuestForServer {
                server: "Calpheon".into()
            })
        );
    }

    #[test]
    fn update_allows_any_non_claim_transition() {
        let mut c = controller();
        c.add("med", "Gather herbs").unwrap();
        let outcome = c.update("med", "DONE").unwrap();
        assert_eq!(
            outcome,
            UpdateOutcome::StatusChanged {
                record: QuestRecord {
                    server: "Mediah".into(),
                    description: "Gather herbs".into(),
                    status: QuestStatus::Done,
                },
                previous: QuestStatus::Ongoing,
            }
        );
        c.update("med", "ongoing").unwrap();
        c.update("med", "ongoing").unwrap();
        assert_eq!(
            c.store().get("Mediah").unwrap().status,
            QuestStatus::Ongoing
        );
    }

    #[test]
    fn claim_limit_blocks_and_keeps_record() {
        let mut c = QuestController::new(
            ServerRegistry::new(default_entries()).unwrap(),
            QuestPolicy {
                claim_limit: 1,
                ..QuestPolicy::default()
            },
        );
        c.add("a1", "one").unwrap();
        c.add("a2", "two").unwrap();
        c.update("a1", "claimed").unwrap();
        assert_eq!(
            c.update("a2", "claimed"),
            Err(QuestError::DailyClaimLimitReached { limit: 1 })
        );
        assert!(c.store().contains("Altinova-2"));
        assert_eq!(c.store().claimed_today(), 1);
    }

    #[test]
    fn list_single_server_unknown_code_fails() {
        let c = controller();
        assert!(matches!(
            c.list(Some("nope")),
            Err(QuestError::UnknownServer { .. })
        ));
    }

    #[test]
    fn daily_reset_keeps_claims_by_default() {
        let mut c = controller();
        c.add("cal", "Boss hunt").unwrap();
        c.update("cal", "claimed").unwrap();
        c.add("bal", "Fish").unwrap();
        let outcome = c.daily_reset();
        assert_eq!(
            outcome,
            ResetOutcome {
                added_cleared: 2,
                claimed_cleared: None
            }
        );
        assert_eq!(c.store().added_today(), 0);
        assert_eq!(c.store().claimed_today(), 1);
        assert!(c.store().contains("Balenos"));
    }

    #[test]
    fn daily_reset_can_clear_claims() {
        let mut c = QuestController::new(
            ServerRegistry::new(default_entries()).unwrap(),
            QuestPolicy {
                reset_claims_daily: true,
                ..QuestPolicy::default()
            },
        );
        c.add("cal", "Boss hunt").unwrap();
        c.update("cal", "claimed").unwrap();
        assert_eq!(c.daily_reset().claimed_cleared, Some(1));
        assert_eq!(c.store().claimed_today(), 0);
    }
}
