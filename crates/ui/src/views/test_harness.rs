use std::sync::{Arc, Mutex};

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;

use flashmaster_core::model::{Card, Catalog};
use services::StudySession;
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::views::StudyView;

struct TestApp {
    session: Mutex<Option<StudySession>>,
}

impl UiApp for TestApp {
    fn take_session(&self) -> Option<StudySession> {
        self.session.lock().ok().and_then(|mut guard| guard.take())
    }
}

#[derive(Props, Clone)]
struct HarnessProps {
    app: Arc<TestApp>,
}

impl PartialEq for HarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for HarnessProps {}

#[component]
fn HarnessRoot(props: HarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { StudyView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_study_harness(cards: Vec<Card>) -> ViewHarness {
    setup_study_harness_with_storage(cards, Storage::in_memory()).await
}

pub async fn setup_study_harness_with_storage(cards: Vec<Card>, storage: Storage) -> ViewHarness {
    let catalog = Catalog::new(cards).expect("valid catalog");
    let session = StudySession::load(catalog, Arc::clone(&storage.mastery))
        .await
        .expect("study session");

    let app = Arc::new(TestApp {
        session: Mutex::new(Some(session)),
    });
    let dom = VirtualDom::new_with_props(HarnessRoot, HarnessProps { app });

    ViewHarness { dom, storage }
}
