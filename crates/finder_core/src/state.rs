use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::view_model::{AppViewModel, MovieCardView};
use crate::{Debouncer, Movie, SEARCH_DEBOUNCE};

pub type RequestId = u64;

/// Which catalog endpoint a request targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchKind {
    Discover { page: u32 },
    Search { term: String },
}

/// Browse vs search, derived from the debounced search term.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Browsing,
    Searching { term: String },
}

impl Mode {
    fn for_term(term: &str) -> Self {
        if term.is_empty() {
            Mode::Browsing
        } else {
            Mode::Searching {
                term: term.to_string(),
            }
        }
    }
}

/// How responses that settle out of request order are merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseOrdering {
    /// Merge every response as it settles, whatever was issued since.
    #[default]
    AsArrived,
    /// Drop a search response once a newer search was issued, and a discover
    /// response once any search newer than it was issued.
    DiscardSuperseded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorSettings {
    pub debounce: Duration,
    pub ordering: ResponseOrdering,
}

impl Default for CoordinatorSettings {
    fn default() -> Self {
        Self {
            debounce: SEARCH_DEBOUNCE,
            ordering: ResponseOrdering::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    settings: CoordinatorSettings,
    search_term: String,
    debouncer: Debouncer<String>,
    mode: Mode,
    page: u32,
    movies: Vec<Movie>,
    in_flight: BTreeMap<RequestId, FetchKind>,
    next_request_id: RequestId,
    latest_search: Option<RequestId>,
    started: bool,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(CoordinatorSettings::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: CoordinatorSettings) -> Self {
        Self {
            settings,
            search_term: String::new(),
            debouncer: Debouncer::new(settings.debounce),
            mode: Mode::Browsing,
            page: 1,
            movies: Vec::new(),
            in_flight: BTreeMap::new(),
            next_request_id: 1,
            latest_search: None,
            started: false,
            dirty: false,
        }
    }

    pub fn settings(&self) -> CoordinatorSettings {
        self.settings
    }

    pub fn view(&self) -> AppViewModel {
        let is_loading = self.is_loading();
        AppViewModel {
            search_term: self.search_term.clone(),
            mode: self.mode.clone(),
            page: self.page,
            is_loading,
            load_more_enabled: !is_loading,
            movies: self.movies.iter().map(MovieCardView::from_movie).collect(),
            dirty: self.dirty,
        }
    }

    /// Returns whether a new snapshot is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn debounced_search_term(&self) -> &str {
        match &self.mode {
            Mode::Browsing => "",
            Mode::Searching { term } => term.as_str(),
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn is_loading(&self) -> bool {
        !self.in_flight.is_empty()
    }

    pub fn in_flight(&self) -> impl Iterator<Item = (RequestId, &FetchKind)> {
        self.in_flight.iter().map(|(id, kind)| (*id, kind))
    }

    /// Next moment the search debouncer could settle, if a change is pending.
    pub fn debounce_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    pub(crate) fn is_started(&self) -> bool {
        self.started
    }

    pub(crate) fn mark_started(&mut self) {
        self.started = true;
    }

    pub(crate) fn set_search_term(&mut self, text: String, now: Instant) {
        if text == self.search_term {
            return;
        }
        self.debouncer.input(text.clone(), now);
        self.search_term = text;
        self.dirty = true;
    }

    /// Lets the debouncer settle. Returns the new debounced term only when it
    /// differs from the current one.
    pub(crate) fn settle_search_term(&mut self, now: Instant) -> Option<String> {
        let settled = self.debouncer.poll(now)?;
        if settled == self.debounced_search_term() {
            return None;
        }
        self.mode = Mode::for_term(&settled);
        self.dirty = true;
        Some(settled)
    }

    pub(crate) fn advance_page(&mut self) -> u32 {
        self.page += 1;
        self.dirty = true;
        self.page
    }

    pub(crate) fn begin_fetch(&mut self, kind: FetchKind) -> RequestId {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        if matches!(kind, FetchKind::Search { .. }) {
            self.latest_search = Some(request_id);
        }
        self.in_flight.insert(request_id, kind);
        self.dirty = true;
        request_id
    }

    /// Marks a request as settled. Unknown or already settled ids yield `None`.
    pub(crate) fn settle_fetch(&mut self, request_id: RequestId) -> Option<FetchKind> {
        let kind = self.in_flight.remove(&request_id)?;
        self.dirty = true;
        Some(kind)
    }

    pub(crate) fn is_superseded(&self, request_id: RequestId) -> bool {
        match self.settings.ordering {
            ResponseOrdering::AsArrived => false,
            ResponseOrdering::DiscardSuperseded => self
                .latest_search
                .is_some_and(|latest| latest > request_id),
        }
    }

    pub(crate) fn append_discover_page(&mut self, results: Vec<Movie>) {
        self.movies.extend(results);
        self.dirty = true;
    }

    pub(crate) fn apply_search_result(&mut self, results: Vec<Movie>) {
        self.movies = results;
        self.dirty = true;
    }
}
