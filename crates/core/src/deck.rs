//! Active-deck derivation: the filtered, ordered view the user navigates.

use crate::model::{Card, FilterState, MasterySet};

/// Compute the active deck from the card list in its current order.
///
/// Stages apply in sequence, each filtering the previous output:
/// 1. category (exact, case-sensitive match, unless `All`),
/// 2. search (trimmed, lower-cased substring of question or answer),
/// 3. mastery hiding, only when `show_mastered` is off AND the raw query is
///    exactly empty — mastered cards stay findable while searching.
///
/// Pure and deterministic: identical inputs yield the identical sequence.
#[must_use]
pub fn active_deck<'a>(
    cards: &'a [Card],
    filter: &FilterState,
    mastered: &MasterySet,
) -> Vec<&'a Card> {
    let query = filter.query.trim().to_lowercase();
    let hide_mastered = !filter.show_mastered && filter.query_is_raw_empty();

    cards
        .iter()
        .filter(|card| filter.category.matches(card.category()))
        .filter(|card| {
            query.is_empty()
                || card.question().to_lowercase().contains(&query)
                || card.answer().to_lowercase().contains(&query)
        })
        .filter(|card| !hide_mastered || !mastered.contains(card.id()))
        .collect()
}
