use flashmaster_core::model::{Card, CardId, MasterySet};
use storage::repository::{MasteryRepository, Storage};

use super::test_harness::{setup_study_harness, setup_study_harness_with_storage};

fn card(id: &str, question: &str, answer: &str, category: &str) -> Card {
    Card::new(id, question, answer, category).unwrap()
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_renders_card_and_controls() {
    let mut harness = setup_study_harness(vec![
        card("1", "What does TCP stand for?", "Transmission Control Protocol", "Networking"),
        card("2", "What is a B-tree?", "A self-balancing tree structure", "Databases"),
    ])
    .await;

    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Card 1 / 2"), "missing position in {html}");
    assert!(
        html.contains("What does TCP stand for?"),
        "missing question in {html}"
    );
    assert!(html.contains("Mark Learned"), "missing master button in {html}");
    assert!(html.contains("All Chapters"), "missing category sentinel in {html}");
    assert!(html.contains("Databases"), "missing category option in {html}");
    assert!(html.contains("Shuffle"), "missing shuffle control in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_renders_empty_catalog_state() {
    let mut harness = setup_study_harness(Vec::new()).await;

    harness.rebuild();
    let html = harness.render();

    assert!(
        html.contains("No Flashcards Found"),
        "missing empty-catalog state in {html}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_renders_empty_deck_when_everything_is_mastered() {
    let storage = Storage::in_memory();
    storage
        .mastery
        .save_mastered(&MasterySet::from_ids(vec![CardId::new("1")]))
        .await
        .expect("seed mastery");

    let mut harness = setup_study_harness_with_storage(
        vec![card("1", "Q1", "A1", "X")],
        storage,
    )
    .await;

    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("No cards available"), "missing empty deck in {html}");
    assert!(html.contains("Clear all filters"), "missing clear action in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn study_view_smoke_shows_learned_count() {
    let storage = Storage::in_memory();
    storage
        .mastery
        .save_mastered(&MasterySet::from_ids(vec![CardId::new("2")]))
        .await
        .expect("seed mastery");

    let mut harness = setup_study_harness_with_storage(
        vec![card("1", "Q1", "A1", "X"), card("2", "Q2", "A2", "X")],
        storage,
    )
    .await;

    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("1 Learned"), "missing learned count in {html}");
    assert!(html.contains("Card 1 / 1"), "missing position in {html}");
}
