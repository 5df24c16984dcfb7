//! Weak-category selection over historical statistics.

use crate::model::StatsSnapshot;

/// Default number of categories the auto-selector proposes.
pub const DEFAULT_WEAK_CATEGORY_COUNT: usize = 3;

/// One home-screen row for a category: lifetime counters plus rounded
/// accuracy (`None` until first attempted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOverview {
    pub category: String,
    pub attempted: u32,
    pub correct: u32,
    pub accuracy_percent: Option<u32>,
}

/// Compare two attempted categories by exact accuracy ratio, ascending.
///
/// Cross-multiplication keeps the comparison exact; floats would tie 1/3
/// and 333333/999999 differently depending on rounding.
fn accuracy_order(a: (u32, u32), b: (u32, u32)) -> std::cmp::Ordering {
    let left = u64::from(a.1) * u64::from(b.0);
    let right = u64::from(b.1) * u64::from(a.0);
    left.cmp(&right)
}

/// Propose up to `max_count` categories for the next session, weakest first.
///
/// Attempted categories are ranked ascending by accuracy (ties broken by
/// name), followed by never-attempted categories in name order. Demonstrated
/// weaknesses win over novelty, but untried categories are guaranteed a turn
/// once the attempted ones run out.
#[must_use]
pub fn auto_select_weak_categories(
    all_categories: &[String],
    stats: &StatsSnapshot,
    max_count: usize,
) -> Vec<String> {
    let mut attempted: Vec<(&String, u32, u32)> = Vec::new();
    let mut untried: Vec<&String> = Vec::new();

    for category in all_categories {
        let tally = stats.category(category);
        if tally.attempted > 0 {
            attempted.push((category, tally.correct, tally.attempted));
        } else {
            untried.push(category);
        }
    }

    attempted.sort_by(|a, b| {
        accuracy_order((a.2, a.1), (b.2, b.1)).then_with(|| a.0.cmp(b.0))
    });
    untried.sort();

    attempted
        .into_iter()
        .map(|(name, _, _)| name.clone())
        .chain(untried.into_iter().cloned())
        .take(max_count)
        .collect()
}

/// Per-category home-screen rows, ordered weakest first with never-attempted
/// categories last (by name).
#[must_use]
pub fn category_overview(
    all_categories: &[String],
    stats: &StatsSnapshot,
) -> Vec<CategoryOverview> {
    let mut rows: Vec<(CategoryOverview, Option<(u32, u32)>)> = all_categories
        .iter()
        .map(|category| {
            let tally = stats.category(category);
            let key = (tally.attempted > 0).then_some((tally.attempted, tally.correct));
            (
                CategoryOverview {
                    category: category.clone(),
                    attempted: tally.attempted,
                    correct: tally.correct,
                    accuracy_percent: tally.accuracy_percent(),
                },
                key,
            )
        })
        .collect();

    rows.sort_by(|(a, ka), (b, kb)| match (ka, kb) {
        (Some(ka), Some(kb)) => {
            accuracy_order(*ka, *kb).then_with(|| a.category.cmp(&b.category))
        }
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.category.cmp(&b.category),
    });

    rows.into_iter().map(|(row, _)| row).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cats(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_owned()).collect()
    }

    fn stats_with(entries: &[(&str, u32, u32)]) -> StatsSnapshot {
        let mut stats = StatsSnapshot::default();
        for &(name, attempted, correct) in entries {
            for i in 0..attempted {
                stats.record("2024-01-11", name, i < correct);
            }
        }
        stats
    }

    #[test]
    fn weakest_attempted_come_before_untried() {
        // A: 50%, B: 20%, C: untried.
        let stats = stats_with(&[("A", 2, 1), ("B", 5, 1)]);
        let picked = auto_select_weak_categories(&cats(&["A", "B", "C"]), &stats, 2);
        assert_eq!(picked, cats(&["B", "A"]));
    }

    #[test]
    fn untried_fill_remaining_slots_by_name() {
        let stats = stats_with(&[("Mid", 4, 2)]);
        let picked =
            auto_select_weak_categories(&cats(&["Zeta", "Mid", "Alpha"]), &stats, 3);
        assert_eq!(picked, cats(&["Mid", "Alpha", "Zeta"]));
    }

    #[test]
    fn equal_accuracy_ties_break_by_name() {
        let stats = stats_with(&[("Beta", 2, 1), ("Alpha", 4, 2)]);
        let picked = auto_select_weak_categories(&cats(&["Beta", "Alpha"]), &stats, 2);
        assert_eq!(picked, cats(&["Alpha", "Beta"]));
    }

    #[test]
    fn max_count_truncates() {
        let stats = StatsSnapshot::default();
        let picked = auto_select_weak_categories(&cats(&["A", "B", "C", "D"]), &stats, 3);
        assert_eq!(picked.len(), DEFAULT_WEAK_CATEGORY_COUNT);
        assert_eq!(picked, cats(&["A", "B", "C"]));
    }

    #[test]
    fn overview_orders_weakest_first_untried_last() {
        let stats = stats_with(&[("Strong", 4, 4), ("Weak", 4, 1)]);
        let rows = category_overview(&cats(&["Strong", "Untried", "Weak"]), &stats);

        let names: Vec<&str> = rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(names, ["Weak", "Strong", "Untried"]);
        assert_eq!(rows[0].accuracy_percent, Some(25));
        assert_eq!(rows[2].accuracy_percent, None);
        assert_eq!(rows[2].attempted, 0);
    }
}
