use crate::display::clipboard::{copy_result, schedule_revert};
use crate::display::{ClipboardOwner, CopyIndicator, ViewState};
use crate::llm::TextGenerator;
use crate::preferences::{OptionCatalog, PreferenceSet, PreferenceStore, PreferenceUpdate, SongSection};
use crate::session::{GenerationSession, SessionError};
use std::sync::Arc;
use tauri::{command, AppHandle, Emitter, Manager, State};
use tracing::{debug, warn};

pub const PREFERENCES_CHANGED: &str = "preferences-changed";
pub const VIEW_CHANGED: &str = "view-changed";

// Everything the window needs for one session. Nothing here outlives the app.
pub struct AppState {
    pub preferences: PreferenceStore,
    pub session: GenerationSession,
    pub indicator: Arc<CopyIndicator>,
    pub clipboard: ClipboardOwner,
    pub generator: Arc<dyn TextGenerator>,
}

impl AppState {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            preferences: PreferenceStore::new(),
            session: GenerationSession::new(),
            indicator: Arc::new(CopyIndicator::new()),
            clipboard: ClipboardOwner::system(),
            generator,
        }
    }

    pub fn view(&self) -> ViewState {
        ViewState::from_state(&self.session.state(), self.indicator.is_copied())
    }

    /// Runs one generation against the current preferences.
    ///
    /// Validation and remote failures end up in the returned view; only a
    /// re-entrant trigger is reported as an error.
    pub async fn generate(&self) -> Result<ViewState, SessionError> {
        let prefs = self.preferences.snapshot();
        match self.session.run(&prefs, self.generator.as_ref()).await {
            Ok(_) => Ok(self.view()),
            Err(SessionError::Busy) => Err(SessionError::Busy),
            Err(e) => {
                debug!(error = %e, "Generation ended with an error view");
                Ok(self.view())
            }
        }
    }
}

/* ---------- 1.  PREFERENCES ---------- */

#[command]
pub fn get_preferences(state: State<'_, AppState>) -> PreferenceSet {
    state.preferences.snapshot()
}

#[command]
pub fn update_preference(update: PreferenceUpdate, state: State<'_, AppState>) -> PreferenceSet {
    state.preferences.apply(update)
}

#[command]
pub fn apply_structure(section: SongSection, state: State<'_, AppState>) -> PreferenceSet {
    state.preferences.apply_structure(section)
}

#[command]
pub fn get_catalog() -> OptionCatalog {
    OptionCatalog::build()
}

/* ---------- 2.  GENERATION ---------- */

#[command]
pub async fn generate_lyrics(state: State<'_, AppState>) -> Result<ViewState, String> {
    state.generate().await.map_err(|e| e.to_string())
}

#[command]
pub fn get_view(state: State<'_, AppState>) -> ViewState {
    state.view()
}

/* ---------- 3.  CLIPBOARD ---------- */

#[command]
pub async fn copy_lyrics(app: AppHandle, state: State<'_, AppState>) -> Result<bool, String> {
    let current = state.session.state();
    if current.lyrics().is_none() {
        return Ok(false);
    }

    let mut clipboard = state.clipboard.writer();
    let Some(token) =
        copy_result(&mut clipboard, &current, &state.indicator).map_err(|e| e.to_string())?
    else {
        return Ok(false);
    };
    emit_view(&app, state.view());

    let indicator = state.indicator.clone();
    let handle = app.clone();
    schedule_revert(indicator.clone(), token, move || {
        let session_state = handle.state::<AppState>().session.state();
        emit_view(&handle, ViewState::from_state(&session_state, indicator.is_copied()));
    });

    Ok(true)
}

pub(crate) fn emit_view(app: &AppHandle, view: ViewState) {
    if let Err(e) = app.emit(VIEW_CHANGED, view) {
        warn!(error = %e, "Failed to emit view update");
    }
}
