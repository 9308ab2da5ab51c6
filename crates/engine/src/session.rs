//! Loading lifecycle around a [`SelectionEngine`].
//!
//! Loader completions may arrive on any thread. They are marshalled through a
//! channel and only applied when the owner calls [`FilterSession::pump`], so
//! every catalog mutation happens on the thread that owns the session.

use std::sync::mpsc::{self, Receiver, TryRecvError};

use log::{debug, info, warn};

use crate::engine::{DrillDownMode, PickerRequest, SelectionEngine};
use crate::error::LoadError;
use crate::loader::{CancelToken, FilterLoader, FilterSetKind, LoadResult, ParameterSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Ready,
}

/// What applying a loader completion did to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadEvent {
    /// First successful load: the catalog was built and defaults were opened.
    Loaded,
    /// A later load replaced the catalog.
    Reloaded,
    /// The load failed and the catalog is now empty.
    Cleared,
    /// The load was cancelled; nothing changed.
    Ignored,
}

pub struct FilterSession<L, P> {
    loader: L,
    parameters: P,
    kind: FilterSetKind,
    engine: SelectionEngine,
    state: SessionState,
    inbox: Option<Receiver<LoadResult>>,
    cancel: CancelToken,
    loaded_once: bool,
    last_error: Option<String>,
    pending_picker: Option<PickerRequest>,
}

impl<L: FilterLoader, P: ParameterSource> FilterSession<L, P> {
    pub fn new(loader: L, parameters: P, kind: FilterSetKind, mode: DrillDownMode) -> Self {
        Self {
            loader,
            parameters,
            kind,
            engine: SelectionEngine::new(mode),
            state: SessionState::Loading,
            inbox: None,
            cancel: CancelToken::new(),
            loaded_once: false,
            last_error: None,
            pending_picker: None,
        }
    }

    /// Ask the loader for a fresh catalog. A pending request is cancelled first.
    pub fn request_load(&mut self) {
        self.cancel.cancel();
        self.cancel = CancelToken::new();

        let (tx, rx) = mpsc::channel();
        self.inbox = Some(rx);
        if !self.loaded_once {
            self.state = SessionState::Loading;
        }

        debug!("requesting filter set {}", self.kind);
        self.loader.load(
            &self.kind,
            self.cancel.clone(),
            Box::new(move |result| {
                let _ = tx.send(result);
            }),
        );
    }

    /// Apply a completed load, if one has arrived.
    pub fn pump(&mut self) -> Option<LoadEvent> {
        let received = match self.inbox.as_ref()?.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(LoadError::Unavailable(
                "loader dropped the request without answering".to_string(),
            )),
        };
        self.inbox = None;
        Some(self.apply(received))
    }

    /// Block until the pending load completes and apply it.
    pub fn wait(&mut self) -> Option<LoadEvent> {
        let received = match self.inbox.take()?.recv() {
            Ok(result) => result,
            Err(_) => Err(LoadError::Unavailable(
                "loader dropped the request without answering".to_string(),
            )),
        };
        Some(self.apply(received))
    }

    fn apply(&mut self, result: LoadResult) -> LoadEvent {
        match result {
            Ok(response) => {
                let parameters = self.parameters.local_parameters();
                self.pending_picker = self
                    .engine
                    .initialize(&response.filters, &parameters, response.image_mapping)
                    .into_picker_request();
                self.state = SessionState::Ready;
                self.last_error = None;
                info!(
                    "loaded {} filter categories for {}",
                    self.engine.catalog().len(),
                    self.kind
                );
                if std::mem::replace(&mut self.loaded_once, true) {
                    LoadEvent::Reloaded
                } else {
                    LoadEvent::Loaded
                }
            }
            Err(error) if error.is_cancelled() => {
                debug!("filter request for {} was cancelled", self.kind);
                LoadEvent::Ignored
            }
            Err(error) => {
                warn!("failed to load filter set {}: {error}", self.kind);
                self.last_error = Some(error.to_string());
                self.pending_picker = None;
                self.engine.clear();
                self.state = SessionState::Ready;
                self.loaded_once = true;
                LoadEvent::Cleared
            }
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state == SessionState::Loading
    }

    /// Whether a request is still in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.inbox.is_some()
    }

    #[must_use]
    pub fn kind(&self) -> &FilterSetKind {
        &self.kind
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Picker a freshly loaded default selection asked for. Taken at most once.
    pub fn take_picker_request(&mut self) -> Option<PickerRequest> {
        self.pending_picker.take()
    }

    #[must_use]
    pub fn engine(&self) -> &SelectionEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut SelectionEngine {
        &mut self.engine
    }
}

impl<L, P> Drop for FilterSession<L, P> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
