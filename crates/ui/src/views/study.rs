use std::time::Duration;

use dioxus::prelude::*;
use keyboard_types::{Code, Key};

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{ALL_CATEGORIES, CardFace, StudyIntent, StudyVm};

/// Visual settle time between unflipping and moving the cursor.
const UNFLIP_SETTLE: Duration = Duration::from_millis(200);

/// Delay before the best-effort auto-advance after mastering a card.
const MASTER_ADVANCE_DELAY: Duration = Duration::from_millis(300);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StudyMode {
    Browse,
    Exam,
}

impl StudyMode {
    fn toggled(self) -> Self {
        match self {
            StudyMode::Browse => StudyMode::Exam,
            StudyMode::Exam => StudyMode::Browse,
        }
    }

    fn label(self) -> &'static str {
        match self {
            StudyMode::Browse => "Browse Mode",
            StudyMode::Exam => "Exam Mode",
        }
    }
}

#[component]
pub fn StudyView() -> Element {
    let ctx = use_context::<AppContext>();
    let vm = use_signal(|| ctx.take_session().map(StudyVm::new));
    let error = use_signal(|| None::<ViewError>);
    let mut mode = use_signal(|| StudyMode::Browse);
    let mut show_reset_modal = use_signal(|| false);

    let dispatch_intent = use_callback(move |intent: StudyIntent| {
        let mut vm = vm;
        let mut error = error;

        match intent {
            StudyIntent::SelectCategory(raw) => {
                if let Some(inner) = vm.write().as_mut() {
                    inner.select_category(&raw);
                }
            }
            StudyIntent::SetQuery(query) => {
                if let Some(inner) = vm.write().as_mut() {
                    inner.set_query(query);
                }
            }
            StudyIntent::ToggleShowMastered => {
                if let Some(inner) = vm.write().as_mut() {
                    inner.toggle_show_mastered();
                }
            }
            StudyIntent::ClearFilters => {
                if let Some(inner) = vm.write().as_mut() {
                    inner.clear_filters();
                }
            }
            StudyIntent::Flip => {
                if let Some(inner) = vm.write().as_mut() {
                    inner.flip();
                }
            }
            StudyIntent::Next | StudyIntent::Previous => {
                // Unflip right away; move the cursor after the card has
                // visually settled face-down. Extra queued moves are
                // harmless: the index math wraps.
                let forward = intent == StudyIntent::Next;
                if let Some(inner) = vm.write().as_mut() {
                    inner.unflip();
                }
                spawn(async move {
                    tokio::time::sleep(UNFLIP_SETTLE).await;
                    if let Some(inner) = vm.write().as_mut() {
                        if forward {
                            inner.next();
                        } else {
                            inner.previous();
                        }
                    }
                });
            }
            StudyIntent::ToggleMastered => {
                spawn(async move {
                    let taken = vm.write().take();
                    let Some(mut inner) = taken else {
                        error.set(Some(ViewError::Unknown));
                        return;
                    };

                    let result = inner.toggle_mastered().await;

                    // Always put the session back so the UI remains usable
                    // even after errors.
                    *vm.write() = Some(inner);

                    match result {
                        Ok(toggle) => {
                            error.set(None);
                            if toggle.is_some_and(|t| t.auto_advance) {
                                tokio::time::sleep(MASTER_ADVANCE_DELAY).await;
                                if let Some(inner) = vm.write().as_mut() {
                                    inner.next();
                                }
                            }
                        }
                        Err(err) => {
                            error.set(Some(err));
                        }
                    }
                });
            }
            StudyIntent::Shuffle => {
                if let Some(inner) = vm.write().as_mut() {
                    inner.shuffle();
                }
            }
            StudyIntent::ResetProgress => {
                spawn(async move {
                    let taken = vm.write().take();
                    let Some(mut inner) = taken else {
                        error.set(Some(ViewError::Unknown));
                        return;
                    };

                    let result = inner.reset_progress().await;
                    *vm.write() = Some(inner);

                    match result {
                        Ok(()) => error.set(None),
                        Err(err) => error.set(Some(err)),
                    }
                });
            }
        }
    });

    let on_key = use_callback(move |evt: KeyboardEvent| {
        let has_card = vm.read().as_ref().is_some_and(|inner| inner.deck_len() > 0);
        if !has_card {
            return;
        }

        if evt.data.code() == Code::Space {
            evt.prevent_default();
            dispatch_intent.call(StudyIntent::Flip);
            return;
        }

        match evt.data.key() {
            Key::ArrowRight => {
                evt.prevent_default();
                dispatch_intent.call(StudyIntent::Next);
            }
            Key::ArrowLeft => {
                evt.prevent_default();
                dispatch_intent.call(StudyIntent::Previous);
            }
            _ => {}
        }
    });

    let vm_guard = vm.read();
    let Some(inner) = vm_guard.as_ref() else {
        return rsx! {
            div { class: "page study-page",
                p { "Study session unavailable." }
            }
        };
    };

    if !inner.has_cards() {
        return rsx! {
            div { class: "page study-page",
                EmptyCatalog {}
            }
        };
    }

    let categories = inner.categories();
    let selected_category = inner.selected_category();
    let selected_value = selected_category
        .clone()
        .unwrap_or_else(|| ALL_CATEGORIES.to_owned());
    let query = inner.query();
    let show_mastered = inner.show_mastered();
    let mastered_count = inner.mastered_count();
    let deck_len = inner.deck_len();
    let position_label = format!("Card {} / {deck_len}", inner.position());
    let current = inner.current();
    let flipped = inner.is_flipped();
    let current_mode = mode();
    let view_error = *error.read();

    rsx! {
        div { class: "page study-page", id: "study-root", tabindex: "0", onkeydown: on_key,
            header { class: "study-header",
                div { class: "study-header__brand",
                    span { class: "study-header__badge", "FM" }
                    h1 { class: "study-header__title", "FlashMaster" }
                }
                div { class: "study-header__controls",
                    select {
                        class: "study-category",
                        id: "study-category",
                        value: "{selected_value}",
                        onchange: move |evt| {
                            dispatch_intent.call(StudyIntent::SelectCategory(evt.value()));
                        },
                        option { value: "{ALL_CATEGORIES}", "All Chapters" }
                        for category in categories {
                            option { key: "{category}", value: "{category}", "{category}" }
                        }
                    }
                    button {
                        class: if current_mode == StudyMode::Exam {
                            "study-mode study-mode--exam"
                        } else {
                            "study-mode"
                        },
                        id: "study-mode",
                        r#type: "button",
                        onclick: move |_| mode.set(current_mode.toggled()),
                        "{current_mode.label()}"
                    }
                }
            }

            div { class: "study-toolbar",
                input {
                    class: "study-search",
                    id: "study-search",
                    r#type: "text",
                    placeholder: "Search in selected chapter...",
                    value: "{query}",
                    oninput: move |evt| {
                        dispatch_intent.call(StudyIntent::SetQuery(evt.value()));
                    },
                }
                div { class: "study-status",
                    div { class: "study-status__counts",
                        span { class: "study-status__position", "{position_label}" }
                        if mastered_count > 0 {
                            span { class: "study-status__learned", "{mastered_count} Learned" }
                        }
                    }
                    div { class: "study-status__actions",
                        button {
                            class: if show_mastered {
                                "study-status__toggle study-status__toggle--active"
                            } else {
                                "study-status__toggle"
                            },
                            id: "study-show-mastered",
                            r#type: "button",
                            onclick: move |_| dispatch_intent.call(StudyIntent::ToggleShowMastered),
                            if show_mastered { "Hide Learned" } else { "Show All" }
                        }
                        button {
                            class: "study-status__button",
                            id: "study-shuffle",
                            r#type: "button",
                            title: "Shuffle Deck",
                            onclick: move |_| dispatch_intent.call(StudyIntent::Shuffle),
                            "Shuffle"
                        }
                        button {
                            class: "study-status__button study-status__button--danger",
                            id: "study-reset",
                            r#type: "button",
                            title: "Reset Progress",
                            onclick: move |_| show_reset_modal.set(true),
                            "Reset"
                        }
                    }
                }
            }

            div { class: "study-stage",
                if let Some(err) = view_error {
                    p { class: "study-error", "{err.message()}" }
                }
                if let Some(card) = current {
                    FlipCard {
                        card: card.clone(),
                        flipped,
                        exam: current_mode == StudyMode::Exam,
                        on_flip: move |()| dispatch_intent.call(StudyIntent::Flip),
                    }
                    div { class: "study-actions",
                        button {
                            class: "study-nav",
                            id: "study-prev",
                            r#type: "button",
                            aria_label: "Previous card",
                            onclick: move |_| dispatch_intent.call(StudyIntent::Previous),
                            "Prev"
                        }
                        button {
                            class: if card.mastered {
                                "study-master study-master--on"
                            } else {
                                "study-master"
                            },
                            id: "study-master",
                            r#type: "button",
                            onclick: move |_| dispatch_intent.call(StudyIntent::ToggleMastered),
                            if card.mastered { "Mastered" } else { "Mark Learned" }
                        }
                        button {
                            class: "study-nav study-nav--primary",
                            id: "study-next",
                            r#type: "button",
                            aria_label: "Next card",
                            onclick: move |_| dispatch_intent.call(StudyIntent::Next),
                            "Next"
                        }
                    }
                } else {
                    EmptyDeck {
                        selected_category: selected_category.clone(),
                        on_clear: move |()| dispatch_intent.call(StudyIntent::ClearFilters),
                    }
                }
            }

            if show_reset_modal() {
                div {
                    class: "study-modal-overlay",
                    onclick: move |_| show_reset_modal.set(false),
                    div {
                        class: "study-modal",
                        role: "dialog",
                        aria_modal: "true",
                        onclick: move |evt| evt.stop_propagation(),
                        h3 { class: "study-modal__title", "Reset all learning progress?" }
                        p { class: "study-modal__body",
                            "This clears every learned mark and removes the saved progress."
                        }
                        div { class: "study-modal__actions",
                            button {
                                class: "btn study-modal__cancel",
                                id: "study-reset-cancel",
                                r#type: "button",
                                onclick: move |_| show_reset_modal.set(false),
                                "Cancel"
                            }
                            button {
                                class: "btn study-modal__confirm",
                                id: "study-reset-confirm",
                                r#type: "button",
                                onclick: move |_| {
                                    show_reset_modal.set(false);
                                    dispatch_intent.call(StudyIntent::ResetProgress);
                                },
                                "Reset"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn FlipCard(card: CardFace, flipped: bool, exam: bool, on_flip: EventHandler<()>) -> Element {
    let mut class = String::from("flip-card");
    if flipped {
        class.push_str(" flip-card--flipped");
    }
    if exam {
        class.push_str(" flip-card--exam");
    }

    rsx! {
        div {
            class: "{class}",
            id: "study-card",
            onclick: move |_| on_flip.call(()),
            div { class: "flip-card__inner",
                div { class: "flip-card__face flip-card__face--front",
                    span { class: "flip-card__category", "{card.category}" }
                    p { class: "flip-card__text", "{card.question}" }
                    span { class: "flip-card__hint", "Click to reveal the answer" }
                }
                div { class: "flip-card__face flip-card__face--back",
                    span { class: "flip-card__category", "{card.category}" }
                    p { class: "flip-card__text", "{card.answer}" }
                    span { class: "flip-card__hint", "Click to see the question" }
                }
            }
        }
    }
}

#[component]
fn EmptyCatalog() -> Element {
    rsx! {
        div { class: "study-empty",
            h2 { class: "study-empty__title", "No Flashcards Found" }
            p { class: "study-empty__body", "The flashcard data set is currently empty." }
            p { class: "study-empty__hint", "Provide a card data file to begin studying." }
        }
    }
}

#[component]
fn EmptyDeck(selected_category: Option<String>, on_clear: EventHandler<()>) -> Element {
    let message = selected_category.map_or_else(
        || "No cards match your search terms or filters.".to_owned(),
        |category| format!("No cards found in \"{category}\" matching your filters."),
    );

    rsx! {
        div { class: "study-empty",
            h3 { class: "study-empty__title", "No cards available" }
            p { class: "study-empty__body", "{message}" }
            button {
                class: "study-empty__clear",
                id: "study-clear-filters",
                r#type: "button",
                onclick: move |_| on_clear.call(()),
                "Clear all filters"
            }
        }
    }
}
