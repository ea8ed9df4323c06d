use flashmaster_core::model::CategoryFilter;
use services::{MasteryToggle, StudySession};

use crate::views::ViewError;

/// Sentinel value of the category selector meaning "all categories".
pub const ALL_CATEGORIES: &str = "all";

/// User intents the study view dispatches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StudyIntent {
    SelectCategory(String),
    SetQuery(String),
    ToggleShowMastered,
    ClearFilters,
    Flip,
    Next,
    Previous,
    ToggleMastered,
    Shuffle,
    ResetProgress,
}

/// Snapshot of the card under the cursor, cloned for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardFace {
    pub question: String,
    pub answer: String,
    pub category: String,
    pub mastered: bool,
}

/// View model over the study session: read accessors shaped for rendering,
/// mutations delegated to the session.
pub struct StudyVm {
    session: StudySession,
}

impl StudyVm {
    #[must_use]
    pub fn new(session: StudySession) -> Self {
        Self { session }
    }

    /// True when the catalog itself has cards, before any filtering.
    #[must_use]
    pub fn has_cards(&self) -> bool {
        self.session.cards_total() > 0
    }

    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        self.session.categories().to_vec()
    }

    /// The selected category, or `None` when browsing all of them.
    #[must_use]
    pub fn selected_category(&self) -> Option<String> {
        self.session
            .filter()
            .category
            .selected()
            .map(str::to_owned)
    }

    #[must_use]
    pub fn query(&self) -> String {
        self.session.filter().query.clone()
    }

    #[must_use]
    pub fn show_mastered(&self) -> bool {
        self.session.filter().show_mastered
    }

    #[must_use]
    pub fn mastered_count(&self) -> usize {
        self.session.mastered_count()
    }

    #[must_use]
    pub fn deck_len(&self) -> usize {
        self.session.deck_len()
    }

    /// One-based position label value; 0 when the deck is empty.
    #[must_use]
    pub fn position(&self) -> usize {
        if self.session.deck_len() == 0 {
            0
        } else {
            self.session.index() + 1
        }
    }

    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.session.is_flipped()
    }

    #[must_use]
    pub fn current(&self) -> Option<CardFace> {
        self.session.current_card().map(|card| CardFace {
            question: card.question().to_owned(),
            answer: card.answer().to_owned(),
            category: card.category().to_owned(),
            mastered: self.session.is_mastered(card.id()),
        })
    }

    /// Apply a selector value, mapping the `"all"` sentinel to the
    /// all-categories filter.
    pub fn select_category(&mut self, raw: &str) {
        let category = if raw == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(raw.to_owned())
        };
        self.session.set_category(category);
    }

    pub fn set_query(&mut self, query: String) {
        self.session.set_query(query);
    }

    pub fn toggle_show_mastered(&mut self) {
        let show = !self.session.filter().show_mastered;
        self.session.set_show_mastered(show);
    }

    pub fn clear_filters(&mut self) {
        self.session.clear_filters();
    }

    pub fn flip(&mut self) {
        self.session.flip();
    }

    pub fn unflip(&mut self) {
        self.session.unflip();
    }

    pub fn next(&mut self) {
        self.session.next();
    }

    pub fn previous(&mut self) {
        self.session.previous();
    }

    pub fn shuffle(&mut self) {
        self.session.shuffle();
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unknown` for persistence failures.
    pub async fn toggle_mastered(&mut self) -> Result<Option<MasteryToggle>, ViewError> {
        self.session
            .toggle_mastered()
            .await
            .map_err(|_| ViewError::Unknown)
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unknown` for persistence failures.
    pub async fn reset_progress(&mut self) -> Result<(), ViewError> {
        self.session
            .reset_progress()
            .await
            .map_err(|_| ViewError::Unknown)
    }
}
