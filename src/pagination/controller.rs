//! Pagination controller
//!
//! Mediates between a [`PageSource`] and a consumer: tracks the cursor,
//! accumulates items, and enforces at-most-one-in-flight through the phase
//! guard rather than by blocking callers.

use super::types::{Cursor, LoadOutcome, Phase, SkipReason, Status};
use crate::error::FetchError;
use crate::source::PageSource;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Mutable state shared by every handle of one controller
#[derive(Debug)]
struct ControllerState<T> {
    items: Vec<T>,
    cursor: Cursor,
    phase: Phase,
    /// Set once a first page has been applied, even an empty one
    initial_loaded: bool,
}

impl<T> Default for ControllerState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            cursor: Cursor::Exhausted,
            phase: Phase::Idle,
            initial_loaded: false,
        }
    }
}

/// Cursor pagination state machine.
///
/// Cloning yields another handle onto the same state, so a view can hand one
/// to a scroll handler while keeping another for rendering. All methods take
/// `&self`; two calls issued back to back share the phase guard and only the
/// first one fetches.
pub struct PaginationController<T> {
    source: Arc<dyn PageSource<T>>,
    state: Arc<Mutex<ControllerState<T>>>,
    alive: Arc<AtomicBool>,
}

impl<T> Clone for PaginationController<T> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            state: Arc::clone(&self.state),
            alive: Arc::clone(&self.alive),
        }
    }
}

impl<T> std::fmt::Debug for PaginationController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("PaginationController")
            .field("items", &state.items.len())
            .field("cursor", &state.cursor)
            .field("phase", &state.phase)
            .field("alive", &self.is_alive())
            .finish_non_exhaustive()
    }
}

impl<T> PaginationController<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create an empty controller over the given source
    pub fn new(source: impl PageSource<T> + 'static) -> Self {
        Self::from_shared(Arc::new(source))
    }

    /// Create an empty controller over an already shared source
    pub fn from_shared(source: Arc<dyn PageSource<T>>) -> Self {
        Self {
            source,
            state: Arc::new(Mutex::new(ControllerState::default())),
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Fetch the first page.
    ///
    /// Only valid while idle and before any first page has been applied.
    /// Any other call returns [`LoadOutcome::Skipped`] without touching the
    /// source.
    pub async fn load_initial(&self) -> Result<LoadOutcome<T>, FetchError> {
        {
            let mut state = self.lock();
            if !self.is_alive() {
                debug!("load_initial skipped, controller torn down");
                return Ok(LoadOutcome::Skipped(SkipReason::TornDown));
            }
            if state.phase.is_loading() {
                debug!(phase = %state.phase, "load_initial skipped, fetch in flight");
                return Ok(LoadOutcome::Skipped(SkipReason::InFlight(state.phase)));
            }
            if state.initial_loaded {
                debug!("load_initial skipped, first page already applied");
                return Ok(LoadOutcome::Skipped(SkipReason::AlreadyLoaded));
            }
            state.phase = Phase::LoadingInitial;
        }
        debug!("phase idle -> loading_initial");

        let mut flight = InFlight::new(self);
        let result = self.source.fetch_first_page().await;
        flight.disarm();

        if !self.is_alive() {
            warn!("first page resolved after teardown, discarding");
            return Ok(LoadOutcome::Discarded);
        }

        let mut state = self.lock();
        state.phase = Phase::Idle;
        match result {
            Ok(page) => {
                state.items = page.items.clone();
                state.cursor = page.next_cursor.clone();
                state.initial_loaded = true;
                info!(
                    items = state.items.len(),
                    has_more = state.cursor.has_more(),
                    "first page loaded"
                );
                Ok(LoadOutcome::Loaded(page))
            }
            Err(e) => {
                warn!(error = %e, "first page fetch failed");
                Err(e)
            }
        }
    }

    /// Fetch the page after the current cursor and append it.
    ///
    /// A no-op after teardown, when the cursor is exhausted, or while any
    /// fetch is in flight.
    pub async fn load_more(&self) -> Result<LoadOutcome<T>, FetchError> {
        let cursor = {
            let mut state = self.lock();
            if !self.is_alive() {
                debug!("load_more skipped, controller torn down");
                return Ok(LoadOutcome::Skipped(SkipReason::TornDown));
            }
            if state.phase.is_loading() {
                debug!(phase = %state.phase, "load_more skipped, fetch in flight");
                return Ok(LoadOutcome::Skipped(SkipReason::InFlight(state.phase)));
            }
            let Some(token) = state.cursor.token().map(str::to_owned) else {
                debug!("load_more skipped, cursor exhausted");
                return Ok(LoadOutcome::Skipped(SkipReason::Exhausted));
            };
            state.phase = Phase::LoadingMore;
            token
        };
        debug!(cursor = %cursor, "phase idle -> loading_more");

        let mut flight = InFlight::new(self);
        let result = self.source.fetch_next_page(&cursor).await;
        flight.disarm();

        if !self.is_alive() {
            warn!(cursor = %cursor, "next page resolved after teardown, discarding");
            return Ok(LoadOutcome::Discarded);
        }

        let mut state = self.lock();
        state.phase = Phase::Idle;
        match result {
            Ok(page) => {
                state.items.extend(page.items.iter().cloned());
                state.cursor = page.next_cursor.clone();
                info!(
                    appended = page.items.len(),
                    total = state.items.len(),
                    has_more = state.cursor.has_more(),
                    "next page loaded"
                );
                Ok(LoadOutcome::Loaded(page))
            }
            Err(e) => {
                warn!(cursor = %cursor, error = %e, "next page fetch failed");
                Err(e)
            }
        }
    }

    /// Snapshot of items, `has_more` and phase
    pub fn status(&self) -> Status<T> {
        let state = self.lock();
        Status {
            items: state.items.clone(),
            has_more: state.cursor.has_more(),
            phase: state.phase,
        }
    }
}

impl<T> PaginationController<T> {
    /// Current phase
    pub fn phase(&self) -> Phase {
        self.lock().phase
    }

    /// Whether another page can be requested
    pub fn has_more(&self) -> bool {
        self.lock().cursor.has_more()
    }

    /// Number of items loaded so far
    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    /// Check if no items have been loaded
    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    /// Mark the controller as discarded.
    ///
    /// Fetches still in flight will resolve into [`LoadOutcome::Discarded`]
    /// and leave the state alone. Later load calls are skipped without
    /// fetching.
    pub fn teardown(&self) {
        if self.alive.swap(false, Ordering::SeqCst) {
            debug!("controller torn down");
        }
    }

    /// Whether [`teardown`](Self::teardown) has not been called yet
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns the phase to idle when a load future is dropped before its fetch
/// resolves. Disarmed as soon as the fetch completes.
struct InFlight<'a, T> {
    controller: &'a PaginationController<T>,
    armed: bool,
}

impl<'a, T> InFlight<'a, T> {
    fn new(controller: &'a PaginationController<T>) -> Self {
        Self {
            controller,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl<T> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if self.armed && self.controller.is_alive() {
            let mut state = self.controller.lock();
            debug!(phase = %state.phase, "load dropped mid-fetch, back to idle");
            state.phase = Phase::Idle;
        }
    }
}
