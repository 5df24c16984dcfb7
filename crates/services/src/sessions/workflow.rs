use std::collections::HashSet;
use std::sync::Arc;

use tracing::warn;

use medq_core::model::QuestionBank;
use medq_core::practice::{
    self, CategoryOverview, DEFAULT_WEAK_CATEGORY_COUNT,
};
use medq_core::Clock;
use storage::repository::KeyValueStore;

use super::service::{AnswerResult, QuizSession};
use crate::error::SessionError;
use crate::stats::{StatsService, TodayStats};

/// Orchestrates quiz runs over one question bank and one stats store.
///
/// The service itself holds no session; the caller owns the single live
/// [`QuizSession`] and passes it back in for answers. Starting a new quiz
/// just replaces the caller's value.
#[derive(Clone)]
pub struct QuizService {
    bank: Arc<QuestionBank>,
    stats: StatsService,
}

impl QuizService {
    #[must_use]
    pub fn new(clock: Clock, bank: Arc<QuestionBank>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            bank,
            stats: StatsService::new(clock, store),
        }
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn stats(&self) -> &StatsService {
        &self.stats
    }

    /// Start a quiz over the whole bank.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyPool` when the bank is empty.
    pub fn start_quick(&self, count: usize) -> Result<QuizSession, SessionError> {
        QuizSession::start(self.bank.questions(), None, count, &mut rand::rng())
    }

    /// Start a quiz restricted to the given categories.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyPool` when no question matches.
    pub fn start_filtered(
        &self,
        categories: &HashSet<String>,
        count: usize,
    ) -> Result<QuizSession, SessionError> {
        QuizSession::start(
            self.bank.questions(),
            Some(categories),
            count,
            &mut rand::rng(),
        )
    }

    /// Start a focused quiz over the selected categories, falling back to
    /// the auto-selected weak categories when the selection is empty.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyPool` when no question matches.
    pub fn start_focused(
        &self,
        selected: &HashSet<String>,
        count: usize,
    ) -> Result<QuizSession, SessionError> {
        if selected.is_empty() {
            let weak: HashSet<String> = self
                .auto_select_weak(DEFAULT_WEAK_CATEGORY_COUNT)
                .into_iter()
                .collect();
            return self.start_filtered(&weak, count);
        }
        self.start_filtered(selected, count)
    }

    /// Submit an answer for the session's current question and record it in
    /// the persistent statistics.
    ///
    /// Only a first-time answer touches the stats; the idempotent replay of
    /// an already answered item records nothing. A stats persistence failure
    /// is logged and swallowed so a full disk never blocks the quiz itself.
    pub fn submit_answer(
        &self,
        session: &mut QuizSession,
        chosen_display_index: usize,
    ) -> AnswerResult {
        let category = session.current_item().question().category().to_owned();
        let result = session.submit_answer(chosen_display_index);
        if !result.already_answered {
            if let Err(err) = self.stats.record(&category, result.was_correct) {
                warn!(%err, category, "failed to persist answer stats");
            }
        }
        result
    }

    /// Weakest categories to practice next, at most `max_count` of them.
    #[must_use]
    pub fn auto_select_weak(&self, max_count: usize) -> Vec<String> {
        practice::auto_select_weak_categories(
            self.bank.categories(),
            &self.stats.load(),
            max_count,
        )
    }

    /// Home-screen category rows, weakest first.
    #[must_use]
    pub fn category_overview(&self) -> Vec<CategoryOverview> {
        practice::category_overview(self.bank.categories(), &self.stats.load())
    }

    /// Today's counters for the home screen.
    #[must_use]
    pub fn today(&self) -> TodayStats {
        self.stats.today()
    }
}
