//! Process-wide command counters.
//! Summarised in the log at shutdown; nothing here is persisted.
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};

static REJECTED: AtomicU64 = AtomicU64::new(0);
static DAILY_RESETS: AtomicU64 = AtomicU64::new(0);

static COMMAND_COUNTERS: OnceLock<Mutex<HashMap<&'static str, u64>>> = OnceLock::new();

fn command_counter_lock() -> &'static Mutex<HashMap<&'static str, u64>> {
    COMMAND_COUNTERS.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Count one handled command by name (`gqa`, `gql`, `gqu`, `help`, `invalid`).
pub fn record_command(name: &'static str) {
    let mut guard = command_counter_lock()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let counter = guard.entry(name).or_default();
    *counter = counter.saturating_add(1);
}

/// Count an operation the quest controller refused.
pub fn inc_rejected() {
    REJECTED.fetch_add(1, Ordering::Relaxed);
}

pub fn inc_daily_resets() {
    DAILY_RESETS.fetch_add(1, Ordering::Relaxed);
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub commands: HashMap<&'static str, u64>,
    pub rejected: u64,
    pub daily_resets: u64,
}

impl Snapshot {
    pub fn command(&self, name: &str) -> u64 {
        self.commands.get(name).copied().unwrap_or(0)
    }

    /// One-line summary, commands sorted by name.
    pub fn summary(&self) -> String {
        let mut names: Vec<_> = self.commands.iter().collect();
        names.sort();
        let commands = names
            .iter()
            .map(|(name, count)| format!("{name}={count}"))
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "commands[{}] rejected={} daily_resets={}",
            commands, self.rejected, self.daily_resets
        )
    }
}

pub fn snapshot() -> Snapshot {
    let commands = command_counter_lock()
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone();
    Snapshot {
        commands,
        rejected: REJECTED.load(Ordering::Relaxed),
        daily_resets: DAILY_RESETS.load(Ordering::Relaxed),
    }
}
