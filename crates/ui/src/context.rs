use std::sync::{Arc, Mutex, PoisonError};

use sadhana_core::model::AppSettings;
use services::navigation::NavigationReceiver;
use services::sessions::SessionRuntime;

/// What the composition root must provide to the UI.
pub trait UiApp: Send + Sync {
    fn settings(&self) -> AppSettings;
    fn session_runtime(&self) -> Arc<SessionRuntime>;
    /// The receiving end of the navigation channel. Consumed once by the
    /// router shell.
    fn take_navigation(&self) -> Option<NavigationReceiver>;
}

#[derive(Clone)]
pub struct AppContext {
    settings: AppSettings,
    session_runtime: Arc<SessionRuntime>,
    navigation: Arc<Mutex<Option<NavigationReceiver>>>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            settings: app.settings(),
            session_runtime: app.session_runtime(),
            navigation: Arc::new(Mutex::new(app.take_navigation())),
        }
    }

    #[must_use]
    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    #[must_use]
    pub fn session_runtime(&self) -> Arc<SessionRuntime> {
        Arc::clone(&self.session_runtime)
    }

    /// Hand out the navigation receiver; only the first caller gets it.
    #[must_use]
    pub fn take_navigation(&self) -> Option<NavigationReceiver> {
        self.navigation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

// This context is provided by the application composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
