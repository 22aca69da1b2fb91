use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::QuestionId;

/// Letter labels shown next to options, in order.
pub const OPTION_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {id} has no options")]
    NoOptions { id: QuestionId },

    #[error("question {id} has an invalid answer letter {raw:?}")]
    InvalidLetter { id: QuestionId, raw: String },

    #[error("question {id}: answer letter {letter} has no matching option ({options} options)")]
    LetterOutOfRange {
        id: QuestionId,
        letter: AnswerLetter,
        options: usize,
    },
}

/// The correct-answer indicator, a single lowercase letter `a`..`d`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnswerLetter(u8);

impl AnswerLetter {
    /// Parse a raw indicator. Only a single lowercase `a`..`d` is accepted.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.as_bytes() {
            [b @ b'a'..=b'd'] => Some(Self(*b)),
            _ => None,
        }
    }

    /// Ordinal option index (`a` -> 0, `b` -> 1, ...).
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0 - b'a')
    }

    #[must_use]
    pub fn as_char(self) -> char {
        char::from(self.0)
    }
}

impl fmt::Debug for AnswerLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnswerLetter({})", self.as_char())
    }
}

impl fmt::Display for AnswerLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Wire shape of a question as served by `GET /questions/{CATEGORY}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub correct_letter: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// A loaded multiple-choice question. Immutable once constructed.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "QuestionRecord")]
pub struct Question {
    id: QuestionId,
    prompt: String,
    image: Option<String>,
    options: Vec<String>,
    correct: AnswerLetter,
}

impl Question {
    /// Build a question, checking that the answer letter resolves to an option.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::NoOptions` if `options` is empty and
    /// `QuestionError::LetterOutOfRange` if the letter points past the options.
    pub fn new(
        id: QuestionId,
        prompt: impl Into<String>,
        image: Option<String>,
        options: Vec<String>,
        correct: AnswerLetter,
    ) -> Result<Self, QuestionError> {
        if options.is_empty() {
            return Err(QuestionError::NoOptions { id });
        }
        if correct.index() >= options.len() {
            return Err(QuestionError::LetterOutOfRange {
                id,
                letter: correct,
                options: options.len(),
            });
        }
        let image = image
            .map(|val| val.trim().to_string())
            .filter(|val| !val.is_empty());
        Ok(Self {
            id,
            prompt: prompt.into(),
            image,
            options,
            correct,
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn correct_letter(&self) -> AnswerLetter {
        self.correct
    }

    /// Text of the correct option. Always present: checked at construction.
    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct.index()]
    }
}

impl TryFrom<QuestionRecord> for Question {
    type Error = QuestionError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        let raw = record.correct_letter.unwrap_or_default();
        let Some(letter) = AnswerLetter::parse(&raw) else {
            return Err(QuestionError::InvalidLetter { id: record.id, raw });
        };
        Self::new(record.id, record.question, record.image, record.options, letter)
    }
}
