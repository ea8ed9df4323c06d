use rand::Rng;
use rand::seq::SliceRandom;
use rand::thread_rng;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use flashmaster_core::active_deck;
use flashmaster_core::model::{Card, CardId, Catalog, CategoryFilter, FilterState, MasterySet};
use storage::repository::MasteryRepository;

use crate::error::StudyError;

//
// ─── MASTERY TOGGLE OUTCOME ────────────────────────────────────────────────────
//

/// Outcome of toggling mastery on the current card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasteryToggle {
    pub card_id: CardId,
    pub now_mastered: bool,
    /// Hint that the UI may advance to the next card shortly afterwards;
    /// set when a card was newly mastered while no search is active. The
    /// set mutation itself is already complete when this is returned.
    pub auto_advance: bool,
}

//
// ─── STUDY SESSION ─────────────────────────────────────────────────────────────
//

/// In-memory study session over the full catalog.
///
/// Owns the mutable session state: card order, filter state, the mastery
/// set, and the cursor into the active deck. The active deck itself is never
/// stored; it is recomputed on demand from those inputs. Mastery mutations
/// persist through the repository before returning.
///
/// Cursor rule: the index and flip flag reset to `0`/`false` whenever the
/// active deck's length changes or the category filter changes.
pub struct StudySession {
    cards: Vec<Card>,
    categories: Vec<String>,
    filter: FilterState,
    mastered: MasterySet,
    index: usize,
    flipped: bool,
    store: Arc<dyn MasteryRepository>,
}

impl StudySession {
    /// Create a session preserving the catalog's order, restoring the
    /// mastery set from storage.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Storage` if the mastery set cannot be read.
    pub async fn load(
        catalog: Catalog,
        store: Arc<dyn MasteryRepository>,
    ) -> Result<Self, StudyError> {
        let mastered = store.load_mastered().await?;
        debug!(
            cards = catalog.len(),
            mastered = mastered.len(),
            "study session loaded"
        );

        Ok(Self {
            categories: catalog.categories(),
            cards: catalog.into_cards(),
            filter: FilterState::default(),
            mastered,
            index: 0,
            flipped: false,
            store,
        })
    }

    /// Create a session with the card order randomized once, as at app
    /// startup.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Storage` if the mastery set cannot be read.
    pub async fn start(
        catalog: Catalog,
        store: Arc<dyn MasteryRepository>,
    ) -> Result<Self, StudyError> {
        let mut session = Self::load(catalog, store).await?;
        session.shuffle();
        Ok(session)
    }

    //
    // ─── READS ─────────────────────────────────────────────────────────────
    //

    /// Total number of cards in the catalog, before any filtering.
    #[must_use]
    pub fn cards_total(&self) -> usize {
        self.cards.len()
    }

    /// Category vocabulary of the catalog, sorted ascending.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    #[must_use]
    pub fn mastered_count(&self) -> usize {
        self.mastered.len()
    }

    #[must_use]
    pub fn is_mastered(&self, id: &CardId) -> bool {
        self.mastered.contains(id)
    }

    /// The filtered, ordered view the user currently navigates.
    #[must_use]
    pub fn active_deck(&self) -> Vec<&Card> {
        active_deck(&self.cards, &self.filter, &self.mastered)
    }

    #[must_use]
    pub fn deck_len(&self) -> usize {
        self.active_deck().len()
    }

    /// Zero-based cursor position in the active deck.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    /// The card under the cursor, or `None` when the active deck is empty.
    #[must_use]
    pub fn current_card(&self) -> Option<&Card> {
        self.active_deck().get(self.index).copied()
    }

    //
    // ─── FILTERS ───────────────────────────────────────────────────────────
    //

    /// Select a category. Always resets the cursor, even if the resulting
    /// deck has the same length.
    pub fn set_category(&mut self, category: CategoryFilter) {
        self.filter.category = category;
        self.reset_cursor();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let previous_len = self.deck_len();
        self.filter.query = query.into();
        self.sync_cursor(previous_len);
    }

    pub fn set_show_mastered(&mut self, show_mastered: bool) {
        let previous_len = self.deck_len();
        self.filter.show_mastered = show_mastered;
        self.sync_cursor(previous_len);
    }

    /// Clear every filter at once: empty query, all categories, mastered
    /// cards visible. Offered by the empty-deck UI state.
    pub fn clear_filters(&mut self) {
        let previous_len = self.deck_len();
        self.filter.query.clear();
        self.filter.show_mastered = true;
        self.filter.category = CategoryFilter::All;
        self.sync_cursor(previous_len);
    }

    //
    // ─── NAVIGATION ────────────────────────────────────────────────────────
    //

    /// Toggle the flip state of the current card. No-op on an empty deck.
    pub fn flip(&mut self) {
        if self.deck_len() > 0 {
            self.flipped = !self.flipped;
        }
    }

    /// Show the question side again without moving the cursor.
    pub fn unflip(&mut self) {
        self.flipped = false;
    }

    /// Advance to the next card, wrapping past the end. The flip state
    /// resets before the index moves. No-op on an empty deck.
    pub fn next(&mut self) {
        let len = self.deck_len();
        if len == 0 {
            return;
        }
        self.flipped = false;
        self.index = (self.index + 1) % len;
    }

    /// Step back to the previous card, wrapping before the start.
    /// No-op on an empty deck.
    pub fn previous(&mut self) {
        let len = self.deck_len();
        if len == 0 {
            return;
        }
        self.flipped = false;
        self.index = (self.index + len - 1) % len;
    }

    //
    // ─── SHUFFLE ───────────────────────────────────────────────────────────
    //

    /// Reorder the collection into a new random permutation and reset the
    /// cursor. Filters are untouched.
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut thread_rng());
    }

    /// Shuffle with a caller-supplied source of randomness, so tests can
    /// assert the exact resulting order.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
        self.reset_cursor();
    }

    //
    // ─── MASTERY ───────────────────────────────────────────────────────────
    //

    /// Toggle mastery of the card under the cursor and persist the full set.
    ///
    /// Returns `None` when there is no current card. The cursor obeys the
    /// length-change rule: mastering the current card under "hide mastered"
    /// shrinks the deck and resets the cursor.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Storage` if the mutated set cannot be persisted.
    pub async fn toggle_mastered(&mut self) -> Result<Option<MasteryToggle>, StudyError> {
        let Some(card) = self.current_card() else {
            return Ok(None);
        };
        let card_id = card.id().clone();

        let previous_len = self.deck_len();
        let now_mastered = self.mastered.toggle(card_id.clone());
        self.persist_mastered().await?;
        self.sync_cursor(previous_len);

        Ok(Some(MasteryToggle {
            auto_advance: now_mastered && self.filter.query_is_raw_empty(),
            card_id,
            now_mastered,
        }))
    }

    /// Empty the mastery set and remove its persisted entry.
    ///
    /// Caller is responsible for having confirmed this with the user.
    /// Filters and card order stay as they are; the cursor resets only if
    /// the deck length changes as a result.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Storage` if the persisted entry cannot be
    /// removed.
    pub async fn reset_progress(&mut self) -> Result<(), StudyError> {
        let previous_len = self.deck_len();
        self.mastered.clear();
        self.store.clear_mastered().await?;
        self.sync_cursor(previous_len);
        Ok(())
    }

    async fn persist_mastered(&self) -> Result<(), StudyError> {
        if self.mastered.is_empty() {
            self.store.clear_mastered().await?;
        } else {
            self.store.save_mastered(&self.mastered).await?;
        }
        Ok(())
    }

    fn reset_cursor(&mut self) {
        self.index = 0;
        self.flipped = false;
    }

    fn sync_cursor(&mut self, previous_len: usize) {
        if self.deck_len() != previous_len {
            self.reset_cursor();
        }
    }
}

impl fmt::Debug for StudySession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StudySession")
            .field("cards_len", &self.cards.len())
            .field("filter", &self.filter)
            .field("mastered_len", &self.mastered.len())
            .field("index", &self.index)
            .field("flipped", &self.flipped)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use storage::repository::InMemoryRepository;

    fn catalog(ids: &[&str]) -> Catalog {
        let cards = ids
            .iter()
            .map(|id| Card::new(*id, format!("Q {id}"), format!("A {id}"), "General").unwrap())
            .collect();
        Catalog::new(cards).unwrap()
    }

    async fn session(ids: &[&str]) -> StudySession {
        StudySession::load(catalog(ids), Arc::new(InMemoryRepository::new()))
            .await
            .unwrap()
    }

    fn deck_ids(session: &StudySession) -> Vec<String> {
        session
            .active_deck()
            .iter()
            .map(|card| card.id().to_string())
            .collect()
    }

    #[tokio::test]
    async fn next_wraps_past_the_end() {
        let mut session = session(&["1", "2", "3"]).await;
        session.next();
        session.next();
        assert_eq!(session.index(), 2);

        session.next();
        assert_eq!(session.index(), 0);
    }

    #[tokio::test]
    async fn previous_wraps_before_the_start() {
        let mut session = session(&["1", "2", "3"]).await;
        session.previous();
        assert_eq!(session.index(), 2);
    }

    #[tokio::test]
    async fn navigation_is_a_noop_on_empty_deck() {
        let mut session = session(&[]).await;
        session.next();
        session.previous();
        assert_eq!(session.index(), 0);
        assert!(session.current_card().is_none());
    }

    #[tokio::test]
    async fn navigation_resets_flip_before_moving() {
        let mut session = session(&["1", "2"]).await;
        session.flip();
        assert!(session.is_flipped());

        session.next();
        assert!(!session.is_flipped());
        assert_eq!(session.index(), 1);
    }

    #[tokio::test]
    async fn flip_is_a_noop_on_empty_deck() {
        let mut session = session(&[]).await;
        session.flip();
        assert!(!session.is_flipped());
    }

    #[tokio::test]
    async fn category_change_always_resets_cursor() {
        let mut session = session(&["1", "2", "3"]).await;
        session.next();
        session.flip();

        session.set_category(CategoryFilter::Category("General".into()));
        assert_eq!(session.index(), 0);
        assert!(!session.is_flipped());
    }

    #[tokio::test]
    async fn query_change_that_shrinks_deck_resets_cursor() {
        let mut session = session(&["1", "2", "3"]).await;
        session.next();
        session.next();

        session.set_query("Q 1");
        assert_eq!(session.index(), 0);
        assert_eq!(session.deck_len(), 1);
    }

    #[tokio::test]
    async fn shuffle_with_seeded_rng_is_deterministic() {
        let mut first = session(&["1", "2", "3", "4", "5"]).await;
        let mut second = session(&["1", "2", "3", "4", "5"]).await;

        first.shuffle_with(&mut StdRng::seed_from_u64(7));
        second.shuffle_with(&mut StdRng::seed_from_u64(7));

        assert_eq!(deck_ids(&first), deck_ids(&second));
    }

    #[tokio::test]
    async fn shuffle_resets_cursor_and_keeps_filters() {
        let mut session = session(&["1", "2", "3"]).await;
        session.set_query("Q");
        session.next();
        session.flip();

        session.shuffle_with(&mut StdRng::seed_from_u64(1));
        assert_eq!(session.index(), 0);
        assert!(!session.is_flipped());
        assert_eq!(session.filter().query, "Q");
    }

    #[tokio::test]
    async fn toggle_mastered_on_empty_deck_returns_none() {
        let mut session = session(&[]).await;
        let toggle = session.toggle_mastered().await.unwrap();
        assert!(toggle.is_none());
    }

    #[tokio::test]
    async fn mastering_hides_card_and_resets_cursor() {
        let mut session = session(&["1", "2", "3"]).await;
        session.next();

        let toggle = session.toggle_mastered().await.unwrap().unwrap();
        assert_eq!(toggle.card_id, CardId::new("2"));
        assert!(toggle.now_mastered);
        assert!(toggle.auto_advance);

        // "2" disappears under hide-mastered, deck shrinks, cursor resets.
        assert_eq!(deck_ids(&session), vec!["1", "3"]);
        assert_eq!(session.index(), 0);
    }

    #[tokio::test]
    async fn mastering_while_searching_skips_auto_advance() {
        let mut session = session(&["1", "2"]).await;
        session.set_query("Q 1");

        let toggle = session.toggle_mastered().await.unwrap().unwrap();
        assert!(toggle.now_mastered);
        assert!(!toggle.auto_advance);

        // Mastered cards remain findable while a search is active.
        assert_eq!(deck_ids(&session), vec!["1"]);
    }

    #[tokio::test]
    async fn unmastering_never_hints_auto_advance() {
        let mut session = session(&["1"]).await;
        session.set_show_mastered(true);
        session.toggle_mastered().await.unwrap();

        let toggle = session.toggle_mastered().await.unwrap().unwrap();
        assert!(!toggle.now_mastered);
        assert!(!toggle.auto_advance);
    }

    #[tokio::test]
    async fn toggle_persists_after_every_mutation() {
        let store = Arc::new(InMemoryRepository::new());
        let mut session = StudySession::load(catalog(&["1", "2"]), store.clone())
            .await
            .unwrap();

        session.toggle_mastered().await.unwrap();

        let reloaded = StudySession::load(catalog(&["1", "2"]), store)
            .await
            .unwrap();
        assert!(reloaded.is_mastered(&CardId::new("1")));
        assert_eq!(reloaded.mastered_count(), 1);
    }

    #[tokio::test]
    async fn unmastering_last_card_clears_the_stored_entry() {
        use storage::repository::MasteryRepository;

        let store = Arc::new(InMemoryRepository::new());
        let mut session = StudySession::load(catalog(&["1"]), store.clone())
            .await
            .unwrap();
        session.set_show_mastered(true);

        session.toggle_mastered().await.unwrap();
        session.toggle_mastered().await.unwrap();

        assert!(store.load_mastered().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reset_progress_unhides_mastered_cards() {
        let mut session = session(&["1", "2"]).await;
        session.toggle_mastered().await.unwrap();
        assert_eq!(session.deck_len(), 1);

        session.reset_progress().await.unwrap();
        assert_eq!(session.mastered_count(), 0);
        assert_eq!(deck_ids(&session), vec!["1", "2"]);
        assert_eq!(session.index(), 0);
    }

    #[tokio::test]
    async fn clear_filters_restores_the_full_deck() {
        let mut session = session(&["1", "2"]).await;
        session.set_category(CategoryFilter::Category("Other".into()));
        session.set_query("nothing matches this");
        assert_eq!(session.deck_len(), 0);

        session.clear_filters();
        assert_eq!(session.deck_len(), 2);
        assert!(session.filter().show_mastered);
    }
}
