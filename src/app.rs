//! App state and core application logic
//!
//! Manages the screen state machine, the per-view result sets and the
//! navigation context threaded into the detail screen. Network work is
//! never done here: the app queues [`Fetch`] requests and applies the
//! [`Fetched`] responses the dispatcher sends back.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info, warn};

use crate::config::DEFAULT_DEBOUNCE_MS;
use crate::models::{Decade, Movie, SortSpec, DECADES};
use crate::sort::sort_movies;

/// Shown by the result views for any failed fetch
pub const FETCH_MOVIES_ERROR: &str = "Failed to fetch movies. Please try again.";
/// Shown by the detail view for any failed lookup
pub const MOVIE_NOT_FOUND: &str = "Movie not found.";

// =============================================================================
// Screens and Routes
// =============================================================================

/// Screen currently shown by the navigation shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Search,
    Gallery,
    Detail,
}

/// Navigable path: `/`, `/gallery` or `/movie/{id}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Search,
    Gallery,
    Movie(u64),
}

impl Route {
    /// Parse a path. Anything unrecognised falls back to the search route.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Route::Search;
        }
        if trimmed == "/gallery" {
            return Route::Gallery;
        }
        if let Some(id) = trimmed.strip_prefix("/movie/") {
            if let Ok(id) = id.parse::<u64>() {
                return Route::Movie(id);
            }
        }
        Route::Search
    }
}

impl FromStr for Route {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Route::parse(s))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Search => write!(f, "/"),
            Route::Gallery => write!(f, "/gallery"),
            Route::Movie(id) => write!(f, "/movie/{}", id),
        }
    }
}

// =============================================================================
// Input Mode
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (search box focused)
    Editing,
}

// =============================================================================
// Loading State
// =============================================================================

/// Status of a view's most recent request
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadingState {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Request in flight
    Loading,
    /// Results rendered
    Loaded,
    /// Error with user-facing message
    Error(String),
}

impl LoadingState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            LoadingState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

// =============================================================================
// Requests and Responses
// =============================================================================

/// Monotonically increasing request id. Only the latest one per view is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub u64);

/// Which view a request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Search,
    Gallery,
    Detail,
}

/// Request queued by the app for the dispatcher
#[derive(Debug, Clone, PartialEq)]
pub enum Fetch {
    Search {
        token: RequestToken,
        query: String,
        sort: SortSpec,
    },
    Discover {
        token: RequestToken,
        sort: SortSpec,
        release_gte: Option<String>,
        release_lte: Option<String>,
    },
    Movie {
        token: RequestToken,
        id: u64,
    },
}

impl Fetch {
    pub fn token(&self) -> RequestToken {
        match self {
            Fetch::Search { token, .. }
            | Fetch::Discover { token, .. }
            | Fetch::Movie { token, .. } => *token,
        }
    }

    pub fn slot(&self) -> Slot {
        match self {
            Fetch::Search { .. } => Slot::Search,
            Fetch::Discover { .. } => Slot::Gallery,
            Fetch::Movie { .. } => Slot::Detail,
        }
    }
}

/// Response sent back by the dispatcher
#[derive(Debug)]
pub enum Fetched {
    Search {
        token: RequestToken,
        result: anyhow::Result<Vec<Movie>>,
    },
    Discover {
        token: RequestToken,
        result: anyhow::Result<Vec<Movie>>,
    },
    Movie {
        token: RequestToken,
        result: anyhow::Result<Movie>,
    },
}

// =============================================================================
// Grid Selection
// =============================================================================

/// Selection state for a card grid laid out row-major
#[derive(Debug, Clone)]
pub struct GridState {
    /// Currently selected index
    pub selected: usize,
    /// Cards per row
    pub columns: usize,
    /// Total number of cards
    pub len: usize,
}

impl Default for GridState {
    fn default() -> Self {
        Self {
            selected: 0,
            columns: 1,
            len: 0,
        }
    }
}

impl GridState {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            ..Self::default()
        }
    }

    pub fn left(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn right(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    /// Move up one row
    pub fn up(&mut self) {
        if self.selected >= self.columns {
            self.selected -= self.columns;
        }
    }

    /// Move down one row, clamping to the last card
    pub fn down(&mut self) {
        if self.len == 0 {
            return;
        }
        let target = self.selected + self.columns;
        if target < self.len {
            self.selected = target;
        } else if self.row_of(self.len - 1) > self.row_of(self.selected) {
            self.selected = self.len - 1;
        }
    }

    pub fn first(&mut self) {
        self.selected = 0;
    }

    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    /// Update length (e.g., when new results come in)
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    pub fn set_columns(&mut self, columns: usize) {
        self.columns = columns.max(1);
    }

    pub fn reset(&mut self) {
        self.selected = 0;
    }

    fn row_of(&self, index: usize) -> usize {
        index / self.columns
    }
}

// =============================================================================
// View-Specific State
// =============================================================================

/// Search view state
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    /// Search query
    pub query: String,
    /// Cursor position in query, in characters
    pub cursor: usize,
    /// Current result set
    pub results: Vec<Movie>,
    /// Card grid selection
    pub grid: GridState,
    /// Loading state
    pub loading: LoadingState,
    /// Client-side ordering of `results`
    pub sort: SortSpec,
    /// When the debounced search should fire
    pub debounce_at: Option<Instant>,
    /// Token of the most recently issued search
    pub pending: Option<RequestToken>,
}

impl SearchState {
    fn byte_offset(&self, cursor: usize) -> usize {
        self.query
            .char_indices()
            .nth(cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    fn char_len(&self) -> usize {
        self.query.chars().count()
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.query.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor, returns true if the query changed
    pub fn backspace(&mut self) -> bool {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset(self.cursor);
            self.query.remove(at);
            true
        } else {
            false
        }
    }

    /// Delete character at cursor, returns true if the query changed
    pub fn delete(&mut self) -> bool {
        if self.cursor < self.char_len() {
            let at = self.byte_offset(self.cursor);
            self.query.remove(at);
            true
        } else {
            false
        }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Query split around the cursor, for rendering
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.query.split_at(self.byte_offset(self.cursor))
    }

    /// Replace results, ordered by the current sort spec
    pub fn set_results(&mut self, mut results: Vec<Movie>) {
        sort_movies(&mut results, self.sort);
        self.grid.reset();
        self.grid.set_len(results.len());
        self.results = results;
        self.loading = LoadingState::Loaded;
    }

    /// Change the sort spec and re-order the current results without refetching
    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
        sort_movies(&mut self.results, sort);
    }

    pub fn selected_movie(&self) -> Option<&Movie> {
        self.results.get(self.grid.selected)
    }
}

/// Gallery view state
#[derive(Debug, Clone, Default)]
pub struct GalleryState {
    /// Active decade (index into `DECADES`), `None` for All
    pub decade: Option<usize>,
    /// Current result set
    pub results: Vec<Movie>,
    /// Card grid selection
    pub grid: GridState,
    /// Loading state
    pub loading: LoadingState,
    /// Server-side ordering passed with each discovery request
    pub sort: SortSpec,
    /// Token of the most recently issued discovery
    pub pending: Option<RequestToken>,
}

impl GalleryState {
    pub fn active_decade(&self) -> Option<&'static Decade> {
        self.decade.and_then(|i| DECADES.get(i))
    }

    pub fn set_results(&mut self, results: Vec<Movie>) {
        self.grid.reset();
        self.grid.set_len(results.len());
        self.results = results;
        self.loading = LoadingState::Loaded;
    }

    pub fn selected_movie(&self) -> Option<&Movie> {
        self.results.get(self.grid.selected)
    }
}

/// Read-only result set snapshot plus a cursor into it, handed to the detail view
#[derive(Debug, Clone)]
pub struct NavigationContext {
    movies: Arc<[Movie]>,
    index: usize,
    return_to: Route,
}

impl NavigationContext {
    /// Returns `None` if `index` is out of range
    pub fn new(movies: Arc<[Movie]>, index: usize, return_to: Route) -> Option<Self> {
        if index < movies.len() {
            Some(Self {
                movies,
                index,
                return_to,
            })
        } else {
            None
        }
    }

    pub fn current(&self) -> &Movie {
        &self.movies[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn return_to(&self) -> Route {
        self.return_to
    }

    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.movies.len()
    }

    /// Same snapshot and return route, cursor moved by one
    pub fn previous(&self) -> Option<Self> {
        if self.has_previous() {
            Self::new(Arc::clone(&self.movies), self.index - 1, self.return_to)
        } else {
            None
        }
    }

    pub fn next(&self) -> Option<Self> {
        if self.has_next() {
            Self::new(Arc::clone(&self.movies), self.index + 1, self.return_to)
        } else {
            None
        }
    }

    /// Whether two contexts share the same snapshot
    pub fn same_snapshot(&self, other: &NavigationContext) -> bool {
        Arc::ptr_eq(&self.movies, &other.movies)
    }
}

/// Detail view state
#[derive(Debug, Clone)]
pub struct DetailState {
    /// Requested movie id
    pub id: u64,
    /// Movie being shown, once resolved
    pub movie: Option<Movie>,
    /// Carried list and cursor, if entered from a result view
    pub context: Option<NavigationContext>,
    pub loading: LoadingState,
    pub pending: Option<RequestToken>,
}

impl DetailState {
    pub fn has_previous(&self) -> bool {
        self.context.as_ref().is_some_and(|c| c.has_previous())
    }

    pub fn has_next(&self) -> bool {
        self.context.as_ref().is_some_and(|c| c.has_next())
    }

    pub fn return_to(&self) -> Route {
        self.context
            .as_ref()
            .map(|c| c.return_to())
            .unwrap_or(Route::Search)
    }
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Current screen
    pub screen: Screen,
    /// Whether the app is running
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Delay between the last keystroke and the search it triggers
    pub debounce: Duration,

    // View-specific states
    pub search: SearchState,
    pub gallery: GalleryState,
    pub detail: Option<DetailState>,

    next_token: u64,
    outbox: Vec<Fetch>,
}

impl Default for App {
    fn default() -> Self {
        Self {
            screen: Screen::Search,
            running: true,
            input_mode: InputMode::Normal,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),

            search: SearchState::default(),
            gallery: GalleryState::default(),
            detail: None,

            next_token: 0,
            outbox: Vec::new(),
        }
    }
}

impl App {
    /// Create a new App instance
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debounce(debounce: Duration) -> Self {
        Self {
            debounce,
            ..Self::default()
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Drain requests queued since the last call
    pub fn take_fetches(&mut self) -> Vec<Fetch> {
        std::mem::take(&mut self.outbox)
    }

    fn issue(&mut self, make: impl FnOnce(RequestToken) -> Fetch) -> RequestToken {
        self.next_token += 1;
        let token = RequestToken(self.next_token);
        let fetch = make(token);
        debug!(?fetch, "queued request");
        self.outbox.push(fetch);
        token
    }

    // -------------------------------------------------------------------------
    // Navigation Shell
    // -------------------------------------------------------------------------

    /// Route for the current screen
    pub fn current_route(&self) -> Route {
        match self.screen {
            Screen::Search => Route::Search,
            Screen::Gallery => Route::Gallery,
            Screen::Detail => self
                .detail
                .as_ref()
                .map(|d| Route::Movie(d.id))
                .unwrap_or(Route::Search),
        }
    }

    /// Navigate to a route. Detail routes opened this way carry no context.
    pub fn open_route(&mut self, route: Route) {
        match route {
            Route::Search => self.show_search(),
            Route::Gallery => self.show_gallery(),
            Route::Movie(id) => self.open_detail(id, None),
        }
    }

    pub fn show_search(&mut self) {
        self.detail = None;
        self.screen = Screen::Search;
    }

    /// Show the gallery, fetching the unfiltered list the first time
    pub fn show_gallery(&mut self) {
        self.detail = None;
        self.input_mode = InputMode::Normal;
        self.screen = Screen::Gallery;
        if self.gallery.loading == LoadingState::Idle {
            self.fetch_gallery();
        }
    }

    /// Switch between the two result views
    pub fn toggle_screen(&mut self) {
        match self.screen {
            Screen::Search => self.show_gallery(),
            Screen::Gallery => self.show_search(),
            Screen::Detail => {}
        }
    }

    /// Focus search input
    pub fn focus_search(&mut self) {
        if self.screen != Screen::Detail {
            self.show_search();
            self.input_mode = InputMode::Editing;
        }
    }

    /// Go back: leave editing first, then close the detail view
    pub fn back(&mut self) -> bool {
        if self.input_mode == InputMode::Editing {
            self.input_mode = InputMode::Normal;
            return true;
        }
        if self.screen == Screen::Detail {
            self.close_detail();
            return true;
        }
        false
    }

    // -------------------------------------------------------------------------
    // Search View
    // -------------------------------------------------------------------------

    /// Restart the debounce timer after the query changed
    fn query_edited(&mut self, now: Instant) {
        self.search.debounce_at = Some(now + self.debounce);
    }

    /// Fire the debounced search once its deadline has passed
    pub fn tick(&mut self, now: Instant) {
        if let Some(at) = self.search.debounce_at {
            if now >= at {
                self.search.debounce_at = None;
                self.run_search();
            }
        }
    }

    /// Issue a search for the current query, superseding any in-flight one
    pub fn run_search(&mut self) {
        let query = self.search.query.trim().to_string();
        if query.is_empty() {
            self.search.pending = None;
            self.search.results.clear();
            self.search.grid.set_len(0);
            self.search.loading = LoadingState::Idle;
            return;
        }

        let sort = self.search.sort;
        let token = self.issue(|token| Fetch::Search { token, query, sort });
        self.search.pending = Some(token);
        self.search.loading = LoadingState::Loading;
    }

    // -------------------------------------------------------------------------
    // Gallery View
    // -------------------------------------------------------------------------

    /// Select a decade (`None` for All) and fetch immediately
    pub fn select_decade(&mut self, decade: Option<usize>) {
        self.gallery.decade = decade.filter(|&i| i < DECADES.len());
        self.fetch_gallery();
    }

    /// Issue a discovery request for the active decade and sort spec
    pub fn fetch_gallery(&mut self) {
        let sort = self.gallery.sort;
        let decade = self.gallery.active_decade();
        let release_gte = decade.map(|d| d.start_date());
        let release_lte = decade.map(|d| d.end_date());

        let token = self.issue(|token| Fetch::Discover {
            token,
            sort,
            release_gte,
            release_lte,
        });
        self.gallery.pending = Some(token);
        self.gallery.loading = LoadingState::Loading;
    }

    // -------------------------------------------------------------------------
    // Sorting (per result view)
    // -------------------------------------------------------------------------

    pub fn set_sort(&mut self, sort: SortSpec) {
        match self.screen {
            Screen::Search => self.search.set_sort(sort),
            Screen::Gallery => {
                if self.gallery.sort != sort {
                    self.gallery.sort = sort;
                    self.fetch_gallery();
                }
            }
            Screen::Detail => {}
        }
    }

    fn current_sort(&self) -> SortSpec {
        match self.screen {
            Screen::Gallery => self.gallery.sort,
            _ => self.search.sort,
        }
    }

    pub fn cycle_sort_field(&mut self) {
        let mut sort = self.current_sort();
        sort.field = sort.field.next();
        self.set_sort(sort);
    }

    pub fn toggle_sort_order(&mut self) {
        let mut sort = self.current_sort();
        sort.order = sort.order.toggle();
        self.set_sort(sort);
    }

    // -------------------------------------------------------------------------
    // Detail View
    // -------------------------------------------------------------------------

    /// Open the selected card of the current result view. Only a loaded
    /// view has visible cards to pick from.
    pub fn open_selected(&mut self) {
        let (results, selected, return_to) = match self.screen {
            Screen::Search if self.search.loading == LoadingState::Loaded => {
                (&self.search.results, self.search.grid.selected, Route::Search)
            }
            Screen::Gallery if self.gallery.loading == LoadingState::Loaded => {
                (&self.gallery.results, self.gallery.grid.selected, Route::Gallery)
            }
            _ => return,
        };

        let snapshot: Arc<[Movie]> = Arc::from(results.as_slice());
        if let Some(context) = NavigationContext::new(snapshot, selected, return_to) {
            let id = context.current().id;
            self.open_detail(id, Some(context));
        }
    }

    /// Enter the detail view for `id`. A carried context whose current movie
    /// matches is rendered directly; otherwise the movie is fetched by id.
    pub fn open_detail(&mut self, id: u64, context: Option<NavigationContext>) {
        self.input_mode = InputMode::Normal;
        self.screen = Screen::Detail;

        let resident = context
            .as_ref()
            .map(|c| c.current())
            .filter(|m| m.id == id)
            .cloned();

        let detail = match resident {
            Some(movie) => DetailState {
                id,
                movie: Some(movie),
                context,
                loading: LoadingState::Loaded,
                pending: None,
            },
            None => {
                info!(id, "movie not carried, fetching by id");
                let token = self.issue(|token| Fetch::Movie { token, id });
                DetailState {
                    id,
                    movie: None,
                    context,
                    loading: LoadingState::Loading,
                    pending: Some(token),
                }
            }
        };
        self.detail = Some(detail);
    }

    pub fn detail_previous(&mut self) {
        let context = self
            .detail
            .as_ref()
            .and_then(|d| d.context.as_ref())
            .and_then(|c| c.previous());
        if let Some(context) = context {
            let id = context.current().id;
            self.open_detail(id, Some(context));
        }
    }

    pub fn detail_next(&mut self) {
        let context = self
            .detail
            .as_ref()
            .and_then(|d| d.context.as_ref())
            .and_then(|c| c.next());
        if let Some(context) = context {
            let id = context.current().id;
            self.open_detail(id, Some(context));
        }
    }

    /// Return to the carried route (search if none); the context is dropped
    pub fn close_detail(&mut self) {
        let route = self
            .detail
            .as_ref()
            .map(|d| d.return_to())
            .unwrap_or(Route::Search);
        self.open_route(route);
    }

    // -------------------------------------------------------------------------
    // Responses
    // -------------------------------------------------------------------------

    /// Apply a response. Returns false if it was stale and discarded.
    pub fn apply(&mut self, fetched: Fetched) -> bool {
        match fetched {
            Fetched::Search { token, result } => {
                if self.search.pending != Some(token) {
                    debug!(?token, "discarding stale search response");
                    return false;
                }
                self.search.pending = None;
                match result {
                    Ok(movies) => {
                        info!(count = movies.len(), "search results");
                        self.search.set_results(movies);
                    }
                    Err(e) => {
                        warn!(error = %e, "search failed");
                        self.search.loading = LoadingState::Error(FETCH_MOVIES_ERROR.into());
                    }
                }
            }
            Fetched::Discover { token, result } => {
                if self.gallery.pending != Some(token) {
                    debug!(?token, "discarding stale discover response");
                    return false;
                }
                self.gallery.pending = None;
                match result {
                    Ok(movies) => {
                        info!(count = movies.len(), "gallery results");
                        self.gallery.set_results(movies);
                    }
                    Err(e) => {
                        warn!(error = %e, "discover failed");
                        self.gallery.loading = LoadingState::Error(FETCH_MOVIES_ERROR.into());
                    }
                }
            }
            Fetched::Movie { token, result } => {
                let Some(detail) = self.detail.as_mut().filter(|d| d.pending == Some(token)) else {
                    debug!(?token, "discarding stale movie response");
                    return false;
                };
                detail.pending = None;
                match result {
                    Ok(movie) => {
                        detail.movie = Some(movie);
                        detail.loading = LoadingState::Loaded;
                    }
                    Err(e) => {
                        warn!(id = detail.id, error = %e, "movie lookup failed");
                        detail.loading = LoadingState::Error(MOVIE_NOT_FOUND.into());
                    }
                }
            }
        }
        true
    }

    /// Update grid column counts from the rendered width
    pub fn set_grid_columns(&mut self, columns: usize) {
        self.search.grid.set_columns(columns);
        self.gallery.grid.set_columns(columns);
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.handle_key_at(key, Instant::now())
    }

    /// Handle keyboard event with an explicit clock (drives the debounce timer)
    pub fn handle_key_at(&mut self, key: KeyEvent, now: Instant) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key, now)
        } else {
            self.handle_normal_key(key)
        }
    }

    /// Handle keys in editing (text input) mode
    fn handle_editing_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Down => {
                self.input_mode = InputMode::Normal;
                true
            }
            KeyCode::Char(c) => {
                self.search.insert(c);
                self.query_edited(now);
                true
            }
            KeyCode::Backspace => {
                if self.search.backspace() {
                    self.query_edited(now);
                }
                true
            }
            KeyCode::Delete => {
                if self.search.delete() {
                    self.query_edited(now);
                }
                true
            }
            KeyCode::Left => {
                self.search.cursor_left();
                true
            }
            KeyCode::Right => {
                self.search.cursor_right();
                true
            }
            KeyCode::Home => {
                self.search.cursor_home();
                true
            }
            KeyCode::End => {
                self.search.cursor_end();
                true
            }
            _ => false,
        }
    }

    /// Handle keys in normal navigation mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        // Global shortcuts
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                return true;
            }
            KeyCode::Tab => {
                self.toggle_screen();
                return true;
            }
            KeyCode::Char('/') => {
                self.focus_search();
                return true;
            }
            KeyCode::Esc => {
                return self.back();
            }
            _ => {}
        }

        match self.screen {
            Screen::Search => self.handle_search_key(key),
            Screen::Gallery => self.handle_gallery_key(key),
            Screen::Detail => self.handle_detail_key(key),
        }
    }

    fn handle_grid_key(grid: &mut GridState, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => grid.up(),
            KeyCode::Down | KeyCode::Char('j') => grid.down(),
            KeyCode::Left | KeyCode::Char('h') => grid.left(),
            KeyCode::Right | KeyCode::Char('l') => grid.right(),
            KeyCode::Home => grid.first(),
            KeyCode::End => grid.last(),
            _ => return false,
        }
        true
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> bool {
        // The grid is hidden while loading or showing an error
        if self.search.loading == LoadingState::Loaded
            && Self::handle_grid_key(&mut self.search.grid, &key)
        {
            return true;
        }
        match key.code {
            KeyCode::Enter => {
                self.open_selected();
                true
            }
            KeyCode::Char('s') => {
                self.cycle_sort_field();
                true
            }
            KeyCode::Char('o') => {
                self.toggle_sort_order();
                true
            }
            _ => false,
        }
    }

    fn handle_gallery_key(&mut self, key: KeyEvent) -> bool {
        if self.gallery.loading == LoadingState::Loaded
            && Self::handle_grid_key(&mut self.gallery.grid, &key)
        {
            return true;
        }
        match key.code {
            KeyCode::Enter => {
                self.open_selected();
                true
            }
            KeyCode::Char('0') => {
                self.select_decade(None);
                true
            }
            KeyCode::Char(c @ '1'..='9') => {
                let idx = (c as usize) - ('1' as usize);
                if idx < DECADES.len() {
                    self.select_decade(Some(idx));
                }
                true
            }
            KeyCode::Char('s') => {
                self.cycle_sort_field();
                true
            }
            KeyCode::Char('o') => {
                self.toggle_sort_order();
                true
            }
            _ => false,
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Left | KeyCode::Char('p') => {
                self.detail_previous();
                true
            }
            KeyCode::Right | KeyCode::Char('n') => {
                self.detail_next();
                true
            }
            KeyCode::Backspace | KeyCode::Char('b') => {
                self.close_detail();
                true
            }
            _ => false,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
