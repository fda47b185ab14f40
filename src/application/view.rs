use crate::application::collection::{no_results_message, normalize_query, PhotoCollection};
use crate::domain::{DomainError, Photo, PhotoId, PhotoSource};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

pub const LOAD_ERROR_MESSAGE: &str = "Failed to fetch photos from local server.";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug)]
struct ViewState {
    phase: Phase,
    collection: PhotoCollection,
    displayed: Vec<PhotoId>,
    query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(usize),
    Failed(String),
    /// Another load was still in flight; that one wins.
    AlreadyLoading,
}

/// What a caller needs to render the album page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub loading: bool,
    pub error: Option<String>,
    pub query: String,
    pub total: usize,
    pub photos: Vec<Photo>,
    pub message: Option<String>,
}

/// One activation of the album page: the loaded collection plus the ids
/// currently on display.
///
/// The lock is never held across the fetch. A load installs the collection
/// and resets the displayed ids in a single critical section, so readers see
/// either the old collection or the new one.
#[derive(Debug)]
pub struct PhotoCollectionView {
    state: Mutex<ViewState>,
}

impl Default for PhotoCollectionView {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoCollectionView {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ViewState {
                phase: Phase::Idle,
                collection: PhotoCollection::empty(),
                displayed: Vec::new(),
                query: String::new(),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, ViewState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// True once a load has been started.
    pub fn is_activated(&self) -> bool {
        self.state().phase != Phase::Idle
    }

    pub fn is_loading(&self) -> bool {
        self.state().phase == Phase::Loading
    }

    pub async fn load(&self, source: &dyn PhotoSource) -> LoadOutcome {
        let previous = {
            let mut state = self.state();
            if state.phase == Phase::Loading {
                debug!("Ignoring load request, a load is already in flight");
                return LoadOutcome::AlreadyLoading;
            }
            std::mem::replace(&mut state.phase, Phase::Loading)
        };
        let pending = PendingLoad {
            view: self,
            previous: Some(previous),
        };

        let result = match source.fetch_photos().await {
            Ok(records) => PhotoCollection::from_records(records),
            Err(e) => Err(e),
        };

        pending.complete();
        let mut state = self.state();
        state.query.clear();
        match result {
            Ok(collection) => {
                let count = collection.len();
                state.displayed = collection.ids();
                state.collection = collection;
                state.phase = Phase::Ready;
                info!("Loaded {} photos", count);
                LoadOutcome::Loaded(count)
            }
            Err(e) => {
                warn!("Photo listing load failed: {}", e);
                state.collection = PhotoCollection::empty();
                state.displayed.clear();
                state.phase = Phase::Failed(LOAD_ERROR_MESSAGE.to_string());
                LoadOutcome::Failed(LOAD_ERROR_MESSAGE.to_string())
            }
        }
    }

    /// Recomputes the displayed photos from the full collection.
    pub fn search(&self, query: &str) -> Result<ViewSnapshot, DomainError> {
        let mut state = self.state();
        if state.phase == Phase::Loading {
            return Err(DomainError::Busy);
        }
        let query = normalize_query(query);
        state.displayed = state.collection.filter(&query);
        state.query = query;
        debug!("Search {:?} matched {} photos", state.query, state.displayed.len());
        Ok(Self::render(&state))
    }

    pub fn toggle_like(&self, id: PhotoId) -> Result<bool, DomainError> {
        let mut state = self.state();
        if state.phase == Phase::Loading {
            return Err(DomainError::Busy);
        }
        state.collection.toggle_like(id)
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        Self::render(&self.state())
    }

    fn render(state: &ViewState) -> ViewSnapshot {
        let loading = state.phase == Phase::Loading;
        let error = match &state.phase {
            Phase::Failed(message) => Some(message.clone()),
            _ => None,
        };
        let photos = state.collection.resolve(&state.displayed);
        let message = if photos.is_empty() && state.phase == Phase::Ready {
            Some(no_results_message(&state.query))
        } else {
            None
        };

        ViewSnapshot {
            loading,
            error,
            query: state.query.clone(),
            total: state.collection.len(),
            photos,
            message,
        }
    }
}

/// Restores the phase a load started from if the load future is dropped
/// before the fetch returns.
struct PendingLoad<'a> {
    view: &'a PhotoCollectionView,
    previous: Option<Phase>,
}

impl PendingLoad<'_> {
    fn complete(mut self) {
        self.previous = None;
    }
}

impl Drop for PendingLoad<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            let mut state = self.view.state();
            if state.phase == Phase::Loading {
                warn!("Photo listing load was cancelled");
                state.phase = previous;
            }
        }
    }
}
