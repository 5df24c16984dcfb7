use std::collections::HashSet;
use std::fmt;

use rand::Rng;

use medq_core::model::{Question, SessionSummary, ShuffledOptions};

use super::draw;
use super::progress::SessionProgress;
use crate::error::SessionError;

//
// ─── SESSION ITEMS ─────────────────────────────────────────────────────────────
//

/// One question inside a running session, with its per-draw option order.
///
/// `answered`/`was_correct` are set exactly once, on the first submission;
/// later submissions for the same item change nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionItem {
    question: Question,
    shuffled: ShuffledOptions,
    answered: bool,
    was_correct: Option<bool>,
}

impl SessionItem {
    #[must_use]
    pub fn question(&self) -> &Question {
        &self.question
    }

    #[must_use]
    pub fn shuffled(&self) -> &ShuffledOptions {
        &self.shuffled
    }

    #[must_use]
    pub fn answered(&self) -> bool {
        self.answered
    }

    #[must_use]
    pub fn was_correct(&self) -> Option<bool> {
        self.was_correct
    }

    /// Display position of the correct answer, derived on demand.
    #[must_use]
    pub fn correct_display_index(&self) -> usize {
        self.shuffled
            .display_index(self.question.correct_option_index())
    }
}

/// Outcome of one answer submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerResult {
    /// Display index of the correct option, for highlighting.
    pub correct_index: usize,
    pub was_correct: bool,
    /// True when the item had already been answered and this call was a
    /// no-op replay of the first outcome.
    pub already_answered: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz run: a fixed draw of questions stepped through in order.
///
/// The caller owns the single live session; starting a new quiz simply
/// replaces the old value. All methods run to completion, there is no
/// internal global state.
pub struct QuizSession {
    items: Vec<SessionItem>,
    current: usize,
    correct_count: usize,
}

impl QuizSession {
    /// Start a session of up to `count` questions drawn from `pool`.
    ///
    /// When `filter_categories` is non-empty the pool is first restricted to
    /// questions whose category is in the set; `None` and an empty set both
    /// mean "no filter". A count larger than the filtered pool clamps.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyPool` when no questions survive the
    /// filter (or `count` is zero).
    pub fn start<R: Rng + ?Sized>(
        pool: &[Question],
        filter_categories: Option<&HashSet<String>>,
        count: usize,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let filtered: Vec<&Question> = match filter_categories {
            Some(filter) if !filter.is_empty() => pool
                .iter()
                .filter(|q| filter.contains(q.category()))
                .collect(),
            _ => pool.iter().collect(),
        };

        if filtered.is_empty() || count == 0 {
            return Err(SessionError::EmptyPool);
        }

        let picked = draw::sample_without_replacement(rng, &filtered, count);
        let mut items = Vec::with_capacity(picked.len());
        for question in picked {
            let shuffled = draw::shuffle_options(rng, question)?;
            items.push(SessionItem {
                question: question.clone(),
                shuffled,
                answered: false,
                was_correct: None,
            });
        }

        Ok(Self {
            items,
            current: 0,
            correct_count: 0,
        })
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.items.len()
    }

    /// Zero-based index of the question currently shown.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_item(&self) -> &SessionItem {
        &self.items[self.current]
    }

    #[must_use]
    pub fn items(&self) -> &[SessionItem] {
        &self.items
    }

    /// Running number of correctly answered items.
    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 == self.items.len()
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.items.iter().filter(|item| item.answered).count()
    }

    /// Returns a summary of the current session progress.
    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            total: self.total(),
            answered: self.answered_count(),
            correct: self.correct_count,
            is_last: self.is_last(),
        }
    }

    /// Submit an answer for the current question by display index.
    ///
    /// The first submission decides the item's outcome; any later call is a
    /// silent no-op that replays the recorded outcome (a double-firing UI is
    /// expected, not an error). An out-of-range index simply scores as
    /// incorrect.
    pub fn submit_answer(&mut self, chosen_display_index: usize) -> AnswerResult {
        let item = &mut self.items[self.current];
        let correct_index = item
            .shuffled
            .display_index(item.question.correct_option_index());

        if item.answered {
            return AnswerResult {
                correct_index,
                was_correct: item.was_correct.unwrap_or(false),
                already_answered: true,
            };
        }

        let was_correct = chosen_display_index == correct_index;
        item.answered = true;
        item.was_correct = Some(was_correct);
        if was_correct {
            self.correct_count += 1;
        }

        AnswerResult {
            correct_index,
            was_correct,
            already_answered: false,
        }
    }

    /// Move to the next question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Completed` when already on the last question;
    /// that is a caller-logic guard, not a user-facing condition.
    pub fn advance(&mut self) -> Result<(), SessionError> {
        if self.is_last() {
            return Err(SessionError::Completed);
        }
        self.current += 1;
        Ok(())
    }

    /// Per-category breakdown plus totals, computable at any time.
    ///
    /// Unanswered items count as attempted-but-not-correct in their
    /// category row.
    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from_item_results(self.items.iter().map(|item| {
            (
                item.question.category().to_owned(),
                item.was_correct.unwrap_or(false),
            )
        }))
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("items_len", &self.items.len())
            .field("current", &self.current)
            .field("correct_count", &self.correct_count)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
