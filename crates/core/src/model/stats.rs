use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Attempt/correct counters for one day or one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub attempted: u32,
    pub correct: u32,
}

impl Tally {
    /// Count one answered question.
    pub fn record(&mut self, was_correct: bool) {
        self.attempted = self.attempted.saturating_add(1);
        if was_correct {
            self.correct = self.correct.saturating_add(1);
        }
    }

    /// Rounded percentage accuracy; `None` when nothing was attempted.
    #[must_use]
    pub fn accuracy_percent(&self) -> Option<u32> {
        if self.attempted == 0 {
            return None;
        }
        let pct = 100.0 * f64::from(self.correct) / f64::from(self.attempted);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rounded = pct.round() as u32;
        Some(rounded)
    }
}

/// The whole persisted statistics blob: counters per Stockholm calendar day
/// and per question category.
///
/// This struct is the on-disk format. Top-level keys are `days` and
/// `categories`; either may be missing in older or partial blobs and
/// defaults to empty, and unknown keys are ignored on load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    #[serde(default)]
    pub days: BTreeMap<String, Tally>,
    #[serde(default)]
    pub categories: BTreeMap<String, Tally>,
}

impl StatsSnapshot {
    /// Count one answered question under the given day key and category,
    /// creating zeroed entries as needed.
    pub fn record(&mut self, day_key: &str, category: &str, was_correct: bool) {
        self.days
            .entry(day_key.to_owned())
            .or_default()
            .record(was_correct);
        self.categories
            .entry(category.to_owned())
            .or_default()
            .record(was_correct);
    }

    /// The tally for the given day, zeroed when absent.
    #[must_use]
    pub fn day(&self, day_key: &str) -> Tally {
        self.days.get(day_key).copied().unwrap_or_default()
    }

    /// The tally for the given category, zeroed when absent.
    #[must_use]
    pub fn category(&self, category: &str) -> Tally {
        self.categories.get(category).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_bumps_both_buckets() {
        let mut stats = StatsSnapshot::default();
        stats.record("2024-01-11", "Anatomy", true);
        stats.record("2024-01-11", "Anatomy", false);

        assert_eq!(
            stats.category("Anatomy"),
            Tally {
                attempted: 2,
                correct: 1
            }
        );
        assert_eq!(
            stats.day("2024-01-11"),
            Tally {
                attempted: 2,
                correct: 1
            }
        );
    }

    #[test]
    fn missing_entries_read_as_zero() {
        let stats = StatsSnapshot::default();
        assert_eq!(stats.day("2024-01-01"), Tally::default());
        assert_eq!(stats.category("Nothing"), Tally::default());
    }

    #[test]
    fn accuracy_rounds_and_handles_zero() {
        assert_eq!(Tally::default().accuracy_percent(), None);
        let tally = Tally {
            attempted: 3,
            correct: 2,
        };
        assert_eq!(tally.accuracy_percent(), Some(67));
    }

    #[test]
    fn snapshot_tolerates_missing_top_level_keys() {
        let stats: StatsSnapshot = serde_json::from_str(r#"{"days":{}}"#).unwrap();
        assert!(stats.categories.is_empty());

        let stats: StatsSnapshot = serde_json::from_str("{}").unwrap();
        assert!(stats.days.is_empty());
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut stats = StatsSnapshot::default();
        stats.record("2024-01-11", "Anatomy", true);

        let blob = serde_json::to_string(&stats).unwrap();
        let back: StatsSnapshot = serde_json::from_str(&blob).unwrap();
        assert_eq!(back, stats);
    }
}
