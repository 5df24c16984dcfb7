mod options;
mod question;
mod stats;
mod summary;

pub use options::{OptionsError, ShuffledOptions};
pub use question::{Question, QuestionBank, QuestionBankError, QuestionError, QuestionRecord};
pub use stats::{StatsSnapshot, Tally};
pub use summary::{CategoryBreakdown, SessionSummary};
