use std::sync::Arc;

use flashmaster_core::model::{Card, CardId, Catalog, CategoryFilter};
use services::StudySession;
use storage::repository::{InMemoryRepository, MASTERED_IDS_KEY};

fn two_category_catalog() -> Catalog {
    let cards = vec![
        Card::new("1", "Q1", "A1", "X").unwrap(),
        Card::new("2", "Q2", "A2", "Y").unwrap(),
    ];
    Catalog::new(cards).unwrap()
}

#[tokio::test]
async fn mastered_card_is_hidden_after_refilter() {
    let store = Arc::new(InMemoryRepository::new());
    let mut session = StudySession::load(two_category_catalog(), store)
        .await
        .unwrap();

    session.set_category(CategoryFilter::Category("X".into()));
    let deck: Vec<&str> = session
        .active_deck()
        .iter()
        .map(|card| card.id().as_str())
        .collect();
    assert_eq!(deck, vec!["1"]);

    let toggle = session.toggle_mastered().await.unwrap().unwrap();
    assert_eq!(toggle.card_id, CardId::new("1"));
    assert!(toggle.now_mastered);

    session.set_category(CategoryFilter::All);
    let deck: Vec<&str> = session
        .active_deck()
        .iter()
        .map(|card| card.id().as_str())
        .collect();
    assert_eq!(deck, vec!["2"]);
}

#[tokio::test]
async fn mastery_survives_a_session_restart() {
    let store = Arc::new(InMemoryRepository::new());

    {
        let mut session = StudySession::load(two_category_catalog(), store.clone())
            .await
            .unwrap();
        session.toggle_mastered().await.unwrap();
    }

    let restarted = StudySession::load(two_category_catalog(), store)
        .await
        .unwrap();
    assert!(restarted.is_mastered(&CardId::new("1")));
    assert_eq!(restarted.deck_len(), 1);
}

#[tokio::test]
async fn corrupt_stored_state_starts_an_empty_session() {
    let store = Arc::new(InMemoryRepository::new());
    store.insert_raw(MASTERED_IDS_KEY, "not valid json").unwrap();

    let session = StudySession::load(two_category_catalog(), store)
        .await
        .unwrap();
    assert_eq!(session.mastered_count(), 0);
    assert_eq!(session.deck_len(), 2);
}

#[tokio::test]
async fn full_browse_and_master_cycle() {
    let store = Arc::new(InMemoryRepository::new());
    let mut session = StudySession::load(two_category_catalog(), store.clone())
        .await
        .unwrap();

    // Master every card in turn; the deck drains under hide-mastered.
    while session.current_card().is_some() {
        session.toggle_mastered().await.unwrap();
    }
    assert_eq!(session.mastered_count(), 2);
    assert_eq!(session.deck_len(), 0);

    // Reset restores the full deck and removes the stored entry.
    session.reset_progress().await.unwrap();
    assert_eq!(session.deck_len(), 2);

    let restarted = StudySession::load(two_category_catalog(), store)
        .await
        .unwrap();
    assert_eq!(restarted.mastered_count(), 0);
}
