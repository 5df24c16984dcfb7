#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;
pub mod stats;

pub use medq_core::Clock;

pub use error::{SessionError, StatsError};
pub use sessions::{AnswerResult, QuizService, QuizSession, SessionItem, SessionProgress};
pub use stats::{StatsService, TodayStats};
