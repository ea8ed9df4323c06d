use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

//
// ─── CARD ID ───────────────────────────────────────────────────────────────────
//

/// Unique identifier for a card.
///
/// Ids come verbatim from the static card data and are stable across
/// sessions; the mastery set stores them unchanged.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Creates a new `CardId`
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the underlying string value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CardId({:?})", self.0)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

//
// ─── CARD TYPES ────────────────────────────────────────────────────────────────
//

/// Raw card shape as it appears in the static data file.
///
/// Mirrors the domain `Card` so the data loader can deserialize without
/// leaking serde concerns into the domain type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub category: String,
}

impl CardRecord {
    /// Validate the record into a domain `Card`.
    ///
    /// # Errors
    ///
    /// Returns `CardError` if the id or any text field is empty after
    /// trimming.
    pub fn validate(self) -> Result<Card, CardError> {
        Card::new(self.id, self.question, self.answer, self.category)
    }
}

/// A single flashcard: a question/answer pair tagged with a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    id: CardId,
    question: String,
    answer: String,
    category: String,
}

impl Card {
    /// Build a card, rejecting blank fields.
    ///
    /// # Errors
    ///
    /// Returns `CardError` if the id or any text field is empty after
    /// trimming.
    pub fn new(
        id: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<Self, CardError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(CardError::EmptyId);
        }
        let id = CardId::new(id);

        let question = question.into();
        if question.trim().is_empty() {
            return Err(CardError::EmptyQuestion(id));
        }
        let answer = answer.into();
        if answer.trim().is_empty() {
            return Err(CardError::EmptyAnswer(id));
        }
        let category = category.into();
        if category.trim().is_empty() {
            return Err(CardError::EmptyCategory(id));
        }

        Ok(Self {
            id,
            question,
            answer,
            category,
        })
    }

    #[must_use]
    pub fn id(&self) -> &CardId {
        &self.id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }
}

//
// ─── CARD VALIDATION ERRORS ────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardError {
    #[error("card id cannot be empty")]
    EmptyId,

    #[error("card {0} has an empty question")]
    EmptyQuestion(CardId),

    #[error("card {0} has an empty answer")]
    EmptyAnswer(CardId),

    #[error("card {0} has an empty category")]
    EmptyCategory(CardId),
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
