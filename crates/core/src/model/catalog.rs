use std::collections::{BTreeSet, HashSet};
use thiserror::Error;

use crate::model::card::{Card, CardError, CardId, CardRecord};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    /// Two cards share an id; mastery tracking would become ambiguous.
    #[error("duplicate card id {0}")]
    DuplicateId(CardId),

    #[error(transparent)]
    Card(#[from] CardError),
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// The immutable, ordered collection of cards loaded once at startup.
///
/// An empty catalog is valid; the UI renders an explicit "no data" state
/// for it instead of treating it as a failure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    cards: Vec<Card>,
}

impl Catalog {
    /// Build a catalog, enforcing id uniqueness across the collection.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two cards share an id.
    pub fn new(cards: Vec<Card>) -> Result<Self, CatalogError> {
        let mut seen: HashSet<&CardId> = HashSet::with_capacity(cards.len());
        for card in &cards {
            if !seen.insert(card.id()) {
                return Err(CatalogError::DuplicateId(card.id().clone()));
            }
        }
        Ok(Self { cards })
    }

    /// Validate raw data records and build a catalog from them.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if any record fails field validation or if two
    /// records share an id.
    pub fn from_records(records: Vec<CardRecord>) -> Result<Self, CatalogError> {
        let cards = records
            .into_iter()
            .map(CardRecord::validate)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(cards)
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    #[must_use]
    pub fn into_cards(self) -> Vec<Card> {
        self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Distinct category values present in the catalog, sorted
    /// lexicographically ascending. Independent of insertion order.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        self.cards
            .iter()
            .map(|card| card.category().to_owned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
