use std::collections::HashSet;

use crate::model::card::CardId;

/// Set of card ids the user has marked as learned.
///
/// Membership is what matters; order never does. The sorted view exists only
/// so persisted writes are byte-stable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MasterySet {
    ids: HashSet<CardId>,
}

impl MasterySet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_ids(ids: impl IntoIterator<Item = CardId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.ids.contains(id)
    }

    /// Toggle membership of the given id.
    ///
    /// Returns true when the id is now in the set (the card was just
    /// mastered), false when it was just removed.
    pub fn toggle(&mut self, id: CardId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in lexicographic order, for stable serialization.
    #[must_use]
    pub fn sorted_ids(&self) -> Vec<CardId> {
        let mut ids: Vec<CardId> = self.ids.iter().cloned().collect();
        ids.sort();
        ids
    }
}
