use serde::Deserialize;
use thiserror::Error;

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Raw question shape as it arrives from the bank file.
///
/// `uses_image` is optional on purpose: only records that explicitly carry
/// `uses_image: false` are eligible for text-only sessions, matching the
/// bank's authoring convention.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuestionRecord {
    pub category: String,
    #[serde(default)]
    pub number: Option<u32>,
    pub question: String,
    pub options: Vec<String>,
    pub correct_option_index: usize,
    #[serde(default)]
    pub more_information: Option<String>,
    #[serde(default)]
    pub uses_image: Option<bool>,
}

impl QuestionRecord {
    /// Validate the raw record into a `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the category or question text is blank,
    /// fewer than two options are present, or the correct index is out of
    /// range.
    pub fn validate(self) -> Result<Question, QuestionError> {
        if self.category.trim().is_empty() {
            return Err(QuestionError::BlankCategory);
        }
        if self.question.trim().is_empty() {
            return Err(QuestionError::BlankQuestion);
        }
        if self.options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                len: self.options.len(),
            });
        }
        if self.correct_option_index >= self.options.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: self.correct_option_index,
                len: self.options.len(),
            });
        }

        Ok(Question {
            category: self.category,
            number: self.number,
            question: self.question,
            options: self.options,
            correct_option_index: self.correct_option_index,
            more_information: self.more_information,
        })
    }
}

/// A validated multiple-choice question.
///
/// Fields are private so the `correct_option_index < options.len()` invariant
/// established by [`QuestionRecord::validate`] cannot be broken afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    category: String,
    number: Option<u32>,
    question: String,
    options: Vec<String>,
    correct_option_index: usize,
    more_information: Option<String>,
}

impl Question {
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn number(&self) -> Option<u32> {
        self.number
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_option_index(&self) -> usize {
        self.correct_option_index
    }

    #[must_use]
    pub fn more_information(&self) -> Option<&str> {
        self.more_information.as_deref()
    }
}

//
// ─── QUESTION BANK ─────────────────────────────────────────────────────────────
//

/// The validated, text-only question pool plus its derived category list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
    categories: Vec<String>,
}

impl QuestionBank {
    /// Build a bank from raw records.
    ///
    /// Records without an explicit `uses_image: false` are skipped (image
    /// questions cannot be rendered here). The remaining records are
    /// validated one by one; the category list is derived sorted and
    /// de-duplicated.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError::InvalidQuestion` naming the offending
    /// record's position in the input.
    pub fn from_records(
        records: impl IntoIterator<Item = QuestionRecord>,
    ) -> Result<Self, QuestionBankError> {
        let mut questions = Vec::new();
        for (position, record) in records.into_iter().enumerate() {
            if record.uses_image != Some(false) {
                continue;
            }
            let question = record
                .validate()
                .map_err(|source| QuestionBankError::InvalidQuestion { position, source })?;
            questions.push(question);
        }

        let mut categories: Vec<String> =
            questions.iter().map(|q| q.category.clone()).collect();
        categories.sort();
        categories.dedup();

        Ok(Self {
            questions,
            categories,
        })
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

//
// ─── VALIDATION ERRORS ─────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question category is blank")]
    BlankCategory,

    #[error("question text is blank")]
    BlankQuestion,

    #[error("question needs at least 2 options, got {len}")]
    TooFewOptions { len: usize },

    #[error("correct option index {index} is out of range for {len} options")]
    CorrectIndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionBankError {
    #[error("invalid question at position {position}: {source}")]
    InvalidQuestion {
        position: usize,
        source: QuestionError,
    },
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
