use std::collections::BTreeMap;

use crate::model::Tally;

/// One per-category row of a session summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBreakdown {
    pub category: String,
    pub attempted: u32,
    pub correct: u32,
    /// `round(100 * correct / attempted)`; every row has `attempted >= 1`.
    pub accuracy_percent: u32,
}

/// Aggregate result of one quiz session.
///
/// Computable at any point in the session; items not yet answered count as
/// attempted-but-not-correct in their category row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    total: u32,
    correct_count: u32,
    breakdown: Vec<CategoryBreakdown>,
}

impl SessionSummary {
    /// Build a summary from one `(category, counted_correct)` pair per
    /// session item. Rows come out sorted by category name ascending.
    #[must_use]
    pub fn from_item_results<I, S>(results: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: Into<String>,
    {
        let mut tally: BTreeMap<String, Tally> = BTreeMap::new();
        let mut total = 0_u32;
        let mut correct_count = 0_u32;

        for (category, was_correct) in results {
            total = total.saturating_add(1);
            if was_correct {
                correct_count = correct_count.saturating_add(1);
            }
            tally.entry(category.into()).or_default().record(was_correct);
        }

        let breakdown = tally
            .into_iter()
            .map(|(category, t)| CategoryBreakdown {
                category,
                attempted: t.attempted,
                correct: t.correct,
                // Tally guarantees attempted >= 1 for every entry built here.
                accuracy_percent: t.accuracy_percent().unwrap_or(0),
            })
            .collect();

        Self {
            total,
            correct_count,
            breakdown,
        }
    }

    /// Number of items in the session.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Number of items answered correctly.
    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    /// Per-category rows, sorted by category name ascending.
    #[must_use]
    pub fn breakdown(&self) -> &[CategoryBreakdown] {
        &self.breakdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_tallies_per_category_sorted_by_name() {
        let summary = SessionSummary::from_item_results(vec![
            ("Pharmacology", true),
            ("Anatomy", false),
            ("Pharmacology", false),
            ("Anatomy", true),
            ("Anatomy", true),
        ]);

        assert_eq!(summary.total(), 5);
        assert_eq!(summary.correct_count(), 3);

        let rows = summary.breakdown();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category, "Anatomy");
        assert_eq!(rows[0].attempted, 3);
        assert_eq!(rows[0].correct, 2);
        assert_eq!(rows[0].accuracy_percent, 67);
        assert_eq!(rows[1].category, "Pharmacology");
        assert_eq!(rows[1].accuracy_percent, 50);
    }

    #[test]
    fn attempted_counts_sum_to_total() {
        let summary = SessionSummary::from_item_results(vec![
            ("A", false),
            ("B", false),
            ("A", true),
        ]);
        let attempted: u32 = summary.breakdown().iter().map(|r| r.attempted).sum();
        assert_eq!(attempted, summary.total());
    }

    #[test]
    fn empty_results_give_empty_summary() {
        let summary = SessionSummary::from_item_results(Vec::<(String, bool)>::new());
        assert_eq!(summary.total(), 0);
        assert!(summary.breakdown().is_empty());
    }
}
