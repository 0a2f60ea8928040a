//! Daily counter reset scheduler.
//!
//! A clock check runs on a fixed interval (one minute by default) instead of relying on an
//! external cron. Each tick converts "now" into the configured timezone and compares the
//! local calendar date with the date of the last reset. The reset fires when the date has
//! advanced, so:
//! - several ticks landing in the same minute fire at most once
//! - a stalled or suspended process that misses midnight still resets on its next tick
//! - a wall clock stepping backwards never fires a second reset for the same day
//!
//! The tracker is seeded with today's date at startup because the counters start at zero.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use super::controller::{ResetOutcome, SharedBoard};
use crate::metrics;

/// Remembers the local date of the last reset.
#[derive(Debug, Clone)]
pub struct DailyResetTracker {
    tz: Tz,
    last_reset_date: NaiveDate,
}

impl DailyResetTracker {
    pub fn new(tz: Tz, now: DateTime<Utc>) -> Self {
        Self {
            tz,
            last_reset_date: now.with_timezone(&tz).date_naive(),
        }
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    pub fn last_reset_date(&self) -> NaiveDate {
        self.last_reset_date
    }

    /// Returns the new local date when a reset is due, recording it as done.
    pub fn check(&mut self, now: DateTime<Utc>) -> Option<NaiveDate> {
        let today = now.with_timezone(&self.tz).date_naive();
        if today <= self.last_reset_date {
            return None;
        }
        self.last_reset_date = today;
        Some(today)
    }
}

/// Run one scheduler tick against the board.
pub async fn run_tick(
    tracker: &mut DailyResetTracker,
    board: &SharedBoard,
    now: DateTime<Utc>,
) -> Option<ResetOutcome> {
    let date = tracker.check(now)?;
    let outcome = board.lock().await.daily_reset();
    metrics::inc_daily_resets();
    info!(
        "Daily quest limit has been reset for {} ({}): {} adds cleared",
        date,
        tracker.timezone(),
        outcome.added_cleared
    );
    Some(outcome)
}

/// Owns the periodic task. Starting is idempotent.
pub struct ResetScheduler {
    tz: Tz,
    interval: Duration,
    running: AtomicBool,
}

impl ResetScheduler {
    pub fn new(tz: Tz, interval: Duration) -> Self {
        Self {
            tz,
            interval,
            running: AtomicBool::new(false),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Spawn the check loop on the current tokio runtime.
    ///
    /// Returns `false` and does nothing when the loop is already running.
    pub fn start(&self, board: SharedBoard) -> bool {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!("Reset scheduler already running; start ignored");
            return false;
        }

        let mut tracker = DailyResetTracker::new(self.tz, Utc::now());
        let period = self.interval;
        info!(
            "Reset scheduler started: timezone={} check_interval={}s today={}",
            self.tz,
            period.as_secs(),
            tracker.last_reset_date()
        );
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                run_tick(&mut tracker, &board, Utc::now()).await;
            }
        });
        true
    }
}
