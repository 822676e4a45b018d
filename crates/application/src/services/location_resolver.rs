//! Location resolver
//!
//! Debounced place-name lookup. Every keystroke yields a provisional
//! selection immediately; the geocoder is only asked once input has been
//! quiet for the debounce period.
//!
//! The pending timer is a task handle owned by the resolver and aborted on
//! each new input. A timer that fires hands the lookup to its own detached
//! task, so lookups already in flight are never cancelled: a slow stale
//! response may overwrite a newer one.

use std::{fmt, sync::Arc, time::Duration};

use domain::{LocationSelection, LocationSuggestion};
use parking_lot::Mutex;
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, instrument, warn};

use crate::{
    error::ApplicationError,
    ports::{GeocodingPort, MAX_SUGGESTIONS},
};

/// Shown while a lookup is pending
pub const LOADING_MESSAGE: &str = "Finding matches...";

/// Shown when a lookup failed or found nothing
pub const NO_MATCH_MESSAGE: &str = "No matches found, Please try again.";

/// Resolver tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Quiet period before a lookup is issued
    pub debounce: Duration,
    /// Maximum suggestions requested
    pub limit: u8,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(1000),
            limit: MAX_SUGGESTIONS,
        }
    }
}

/// What the search box currently shows
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ResolverState {
    /// Nothing typed, or input cleared
    #[default]
    Idle,
    /// Waiting for the debounce period or the geocoder
    Loading,
    /// Candidates to pick from; the list is open
    Suggestions(Vec<LocationSuggestion>),
    /// Lookup failed or returned nothing
    NoMatch,
}

impl ResolverState {
    /// Status line for the search box, if any
    #[must_use]
    pub const fn message(&self) -> Option<&'static str> {
        match self {
            Self::Loading => Some(LOADING_MESSAGE),
            Self::NoMatch => Some(NO_MATCH_MESSAGE),
            Self::Idle | Self::Suggestions(_) => None,
        }
    }

    /// Current candidates
    #[must_use]
    pub fn suggestions(&self) -> &[LocationSuggestion] {
        match self {
            Self::Suggestions(list) => list,
            _ => &[],
        }
    }
}

/// Debounced geocoding front end
pub struct LocationResolver {
    geocoder: Arc<dyn GeocodingPort>,
    config: ResolverConfig,
    pending: Mutex<Option<JoinHandle<()>>>,
    state: Arc<watch::Sender<ResolverState>>,
}

impl fmt::Debug for LocationResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocationResolver")
            .field("config", &self.config)
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl LocationResolver {
    /// Create a resolver with default debounce and limit
    #[must_use]
    pub fn new(geocoder: Arc<dyn GeocodingPort>) -> Self {
        Self::with_config(geocoder, ResolverConfig::default())
    }

    /// Create a resolver with custom tuning
    #[must_use]
    pub fn with_config(geocoder: Arc<dyn GeocodingPort>, config: ResolverConfig) -> Self {
        let (state, _) = watch::channel(ResolverState::Idle);
        Self {
            geocoder,
            config,
            pending: Mutex::new(None),
            state: Arc::new(state),
        }
    }

    /// Watch state changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ResolverState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state
    #[must_use]
    pub fn state(&self) -> ResolverState {
        self.state.borrow().clone()
    }

    /// Handle a change of the search text
    ///
    /// Returns the provisional selection for `text` and schedules a lookup
    /// after the debounce period, replacing any lookup still waiting.
    /// Must be called from within a tokio runtime.
    pub fn on_input(&self, text: &str) -> LocationSelection {
        let mut pending = self.pending.lock();
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        if text.is_empty() {
            self.state.send_replace(ResolverState::Idle);
            return LocationSelection::typed(text);
        }

        self.state.send_replace(ResolverState::Loading);

        let geocoder = Arc::clone(&self.geocoder);
        let state = Arc::clone(&self.state);
        let query = text.to_string();
        let ResolverConfig { debounce, limit } = self.config;

        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            tokio::spawn(lookup(geocoder, query, limit, state));
        }));

        LocationSelection::typed(text)
    }

    /// Look `text` up right away, bypassing the debounce timer
    #[instrument(skip(self))]
    pub async fn resolve_now(&self, text: &str) -> ResolverState {
        if let Some(handle) = self.pending.lock().take() {
            handle.abort();
        }
        if text.is_empty() {
            self.state.send_replace(ResolverState::Idle);
            return ResolverState::Idle;
        }
        self.state.send_replace(ResolverState::Loading);
        lookup(
            Arc::clone(&self.geocoder),
            text.to_string(),
            self.config.limit,
            Arc::clone(&self.state),
        )
        .await;
        self.state()
    }

    /// Settle `text` without waiting out the debounce period
    ///
    /// A lookup still waiting on its timer is issued right away. One whose
    /// timer already fired is awaited instead of being sent again.
    pub async fn flush(&self, text: &str) -> ResolverState {
        let waiting = self
            .pending
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished());
        if waiting {
            return self.resolve_now(text).await;
        }

        let mut updates = self.subscribe();
        match updates
            .wait_for(|state| !matches!(state, ResolverState::Loading))
            .await
        {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }

    /// Accept the suggestion at `index`
    #[must_use]
    pub fn select(&self, index: usize) -> Option<LocationSelection> {
        self.state
            .borrow()
            .suggestions()
            .get(index)
            .map(LocationSelection::from_suggestion)
    }
}

impl Drop for LocationResolver {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.get_mut().take() {
            handle.abort();
        }
    }
}

async fn lookup(
    geocoder: Arc<dyn GeocodingPort>,
    query: String,
    limit: u8,
    state: Arc<watch::Sender<ResolverState>>,
) {
    debug!(%query, "Looking up location");
    let next = match geocoder.search(&query, limit).await {
        Ok(mut suggestions) if !suggestions.is_empty() => {
            suggestions.truncate(usize::from(limit));
            debug!(count = suggestions.len(), "Location suggestions received");
            ResolverState::Suggestions(suggestions)
        },
        Ok(_) => {
            let err = ApplicationError::NoMatch(query);
            warn!(error = %err, "No matches found");
            ResolverState::NoMatch
        },
        Err(e) => {
            warn!(error = %e, %query, "No matches found");
            ResolverState::NoMatch
        },
    };
    state.send_replace(next);
}
