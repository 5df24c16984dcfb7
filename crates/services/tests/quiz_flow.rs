//! End-to-end quiz flow over the in-memory store.

use std::collections::HashSet;
use std::sync::Arc;

use medq_core::model::{QuestionBank, QuestionRecord};
use medq_core::time::fixed_clock;
use services::{Clock, QuizService};
use storage::{InMemoryStore, KeyValueStore};

fn record(category: &str, n: u32) -> QuestionRecord {
    QuestionRecord {
        category: category.into(),
        number: Some(n),
        question: format!("Question {n}?"),
        options: vec!["opt a".into(), "opt b".into(), "opt c".into(), "opt d".into()],
        correct_option_index: (n as usize) % 4,
        more_information: Some("Because.".into()),
        uses_image: Some(false),
    }
}

fn two_category_bank() -> Arc<QuestionBank> {
    let mut records = Vec::new();
    for n in 0..5 {
        records.push(record("Anatomy", n));
    }
    for n in 5..10 {
        records.push(record("Pharmacology", n));
    }
    Arc::new(QuestionBank::from_records(records).unwrap())
}

#[test]
fn five_question_run_produces_consistent_summary_and_stats() {
    let store = Arc::new(InMemoryStore::new());
    let service = QuizService::new(fixed_clock(), two_category_bank(), store.clone());

    let mut session = service.start_quick(5).unwrap();
    assert_eq!(session.total(), 5);

    let mut expected_correct = 0;
    for i in 0..5 {
        let correct = session.current_item().correct_display_index();
        let option_count = session.current_item().shuffled().len();
        let chosen = if i % 2 == 0 {
            expected_correct += 1;
            correct
        } else {
            (correct + 1) % option_count
        };
        let result = service.submit_answer(&mut session, chosen);
        assert_eq!(result.was_correct, chosen == correct);
        if !session.is_last() {
            session.advance().unwrap();
        }
    }

    let summary = session.summary();
    assert_eq!(summary.total(), 5);
    assert_eq!(summary.correct_count(), expected_correct);
    let attempted: u32 = summary.breakdown().iter().map(|row| row.attempted).sum();
    assert_eq!(attempted, 5);

    // stats saw one record per item, bucketed under the fixed clock's day
    let snapshot = service.stats().load();
    let day_total: u32 = snapshot.days.values().map(|t| t.attempted).sum();
    assert_eq!(day_total, 5);
    let category_total: u32 = snapshot.categories.values().map(|t| t.attempted).sum();
    assert_eq!(category_total, 5);

    // and the blob actually made it into the store
    assert!(store.get("mmcq_stats_v1").unwrap().is_some());
}

#[test]
fn weak_category_history_steers_the_next_focused_session() {
    let store = Arc::new(InMemoryStore::new());
    let service = QuizService::new(fixed_clock(), two_category_bank(), store);

    // Anatomy at 100%, Pharmacology at 0%
    service.stats().record("Anatomy", true).unwrap();
    service.stats().record("Pharmacology", false).unwrap();
    service.stats().record("Pharmacology", false).unwrap();

    assert_eq!(service.auto_select_weak(1), ["Pharmacology"]);

    let filter: HashSet<String> = ["Pharmacology".to_owned()].into();
    let session = service.start_focused(&filter, 10).unwrap();
    assert_eq!(session.total(), 5);
    assert!(
        session
            .items()
            .iter()
            .all(|item| item.question().category() == "Pharmacology")
    );
}

#[test]
fn stats_survive_a_new_service_over_the_same_store() {
    let store = Arc::new(InMemoryStore::new());
    let first = QuizService::new(fixed_clock(), two_category_bank(), store.clone());
    first.stats().record("Anatomy", true).unwrap();
    first.stats().record("Anatomy", false).unwrap();

    let second = QuizService::new(Clock::default_clock(), two_category_bank(), store);
    let tally = second.stats().load().category("Anatomy");
    assert_eq!(tally.attempted, 2);
    assert_eq!(tally.correct, 1);

    second.stats().reset().unwrap();
    assert_eq!(second.stats().load().category("Anatomy").attempted, 0);
}
