//! Persistent answer statistics over the key-value store.

use std::sync::Arc;

use tracing::warn;

use medq_core::model::{StatsSnapshot, Tally};
use medq_core::time::day_key;
use medq_core::Clock;
use storage::repository::KeyValueStore;

use crate::error::StatsError;

/// Persisted blob key. The layout (`days` / `categories` top-level maps) is
/// versioned through this name; bump the suffix on a breaking change.
pub const STATS_KEY: &str = "mmcq_stats_v1";

/// Today's counters for the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodayStats {
    pub attempted: u32,
    pub correct: u32,
    /// Rounded percentage; 0 when nothing was attempted yet.
    pub accuracy_percent: u32,
}

/// Loads, updates and resets the persisted statistics blob.
///
/// Every operation is a synchronous read-modify-write against the store;
/// with single-threaded callers no locking is needed, and concurrent
/// writers degrade to last-writer-wins.
#[derive(Clone)]
pub struct StatsService {
    clock: Clock,
    store: Arc<dyn KeyValueStore>,
}

impl StatsService {
    #[must_use]
    pub fn new(clock: Clock, store: Arc<dyn KeyValueStore>) -> Self {
        Self { clock, store }
    }

    /// Read the persisted snapshot.
    ///
    /// A missing blob is the empty snapshot. An unreadable store or an
    /// unparseable blob is logged and also falls back to the empty
    /// snapshot; corrupt persisted state must never take the caller down.
    #[must_use]
    pub fn load(&self) -> StatsSnapshot {
        let raw = match self.store.get(STATS_KEY) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(%err, "stats store unreadable, starting from empty");
                return StatsSnapshot::default();
            }
        };
        let Some(raw) = raw else {
            return StatsSnapshot::default();
        };
        match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(%err, "persisted stats corrupt, starting from empty");
                StatsSnapshot::default()
            }
        }
    }

    /// Count one answered question under today's day key and the given
    /// category, and persist the updated blob.
    ///
    /// # Errors
    ///
    /// Returns `StatsError` when the updated blob cannot be serialized or
    /// written back.
    pub fn record(
        &self,
        category: &str,
        was_correct: bool,
    ) -> Result<StatsSnapshot, StatsError> {
        let mut snapshot = self.load();
        snapshot.record(&self.today_key(), category, was_correct);
        let blob = serde_json::to_string(&snapshot)?;
        self.store.set(STATS_KEY, &blob)?;
        Ok(snapshot)
    }

    /// Delete all persisted statistics. Irreversible; any confirmation
    /// prompt is the caller's concern.
    ///
    /// # Errors
    ///
    /// Returns `StatsError` when the store cannot delete the blob.
    pub fn reset(&self) -> Result<(), StatsError> {
        self.store.remove(STATS_KEY)?;
        Ok(())
    }

    /// The current Stockholm calendar-day key.
    #[must_use]
    pub fn today_key(&self) -> String {
        day_key(self.clock.now())
    }

    /// Today's counters, zeroed when nothing was attempted yet.
    #[must_use]
    pub fn today(&self) -> TodayStats {
        let tally: Tally = self.load().day(&self.today_key());
        TodayStats {
            attempted: tally.attempted,
            correct: tally.correct,
            accuracy_percent: tally.accuracy_percent().unwrap_or(0),
        }
    }
}
