use std::sync::Arc;

use services::StudySession;

/// Surface the composition root exposes to the UI.
pub trait UiApp: Send + Sync {
    /// Hand the pre-built study session over to the UI.
    ///
    /// One-shot: the study view takes ownership of the session for the life
    /// of the window; later calls yield `None`.
    fn take_session(&self) -> Option<StudySession>;
}

#[derive(Clone)]
pub struct AppContext {
    app: Arc<dyn UiApp>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            app: Arc::clone(app),
        }
    }

    #[must_use]
    pub fn take_session(&self) -> Option<StudySession> {
        self.app.take_session()
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
