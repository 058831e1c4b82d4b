//! Browser State
//!
//! Pure state for the five-level drill-down, separated from I/O. One
//! [`LevelState`] per level holds everything the UI needs (items, loading
//! flag, total count, page, search term, selection, last error) plus the
//! request generation used to discard stale responses.
//!
//! All mutation goes through [`BrowserState`] so the cascade invariant is
//! enforced structurally: whenever a selection or search changes at level
//! N, every level below N is cleared in one place, not by convention.

use crate::logic::pagination;
use crate::model::{EntityRecord, Level};

/// State of a single level of the hierarchy
#[derive(Debug, Default)]
pub struct LevelState {
    /// The currently visible page of entities
    pub items: Vec<EntityRecord>,
    /// True while a fetch for this level is outstanding
    pub loading: bool,
    /// Server-side count of all matching records
    pub total_count: u64,
    /// Current page, 1-based
    pub page: u32,
    /// Search text; only meaningful for levels with search support
    pub search_term: String,
    /// Id of the chosen record, if any
    pub selected_id: Option<String>,
    /// Last level-scoped fetch error, cleared on the next success
    pub error: Option<String>,
    /// Monotonically increasing request generation. A response is only
    /// committed while its tagged generation is still current.
    pub generation: u64,
}

impl LevelState {
    fn new() -> Self {
        Self {
            page: 1,
            ..Default::default()
        }
    }

    /// Number of pages for this level's current total
    pub fn total_pages(&self, page_size: u32) -> u32 {
        pagination::total_pages(self.total_count, page_size)
    }

    /// Invalidate any in-flight fetch and return the generation to tag the
    /// next one with
    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Return the level to its initial empty state, discarding any
    /// in-flight response
    fn clear(&mut self) {
        self.items.clear();
        self.loading = false;
        self.total_count = 0;
        self.page = 1;
        self.search_term.clear();
        self.selected_id = None;
        self.error = None;
        self.generation += 1;
    }
}

/// The five-level selection vector and per-level view state
#[derive(Debug)]
pub struct BrowserState {
    levels: [LevelState; Level::COUNT],
    /// Cards per page, shared by every level
    pub page_size: u32,
}

impl BrowserState {
    pub fn new(page_size: u32) -> Self {
        Self {
            levels: std::array::from_fn(|_| LevelState::new()),
            page_size,
        }
    }

    pub fn level(&self, level: Level) -> &LevelState {
        &self.levels[level.index()]
    }

    pub fn level_mut(&mut self, level: Level) -> &mut LevelState {
        &mut self.levels[level.index()]
    }

    /// Whether fetches for this level may be issued: the root always, every
    /// other level only while its parent has a selection
    pub fn dependency_satisfied(&self, level: Level) -> bool {
        match level.parent() {
            None => true,
            Some(parent) => self.level(parent).selected_id.is_some(),
        }
    }

    /// The selected parent id this level's fetches are scoped to
    pub fn parent_id(&self, level: Level) -> Option<&str> {
        level
            .parent()
            .and_then(|parent| self.level(parent).selected_id.as_deref())
    }

    /// Clear `level` and everything deeper.
    ///
    /// Each affected level ends at `{items: [], total_count: 0, page: 1,
    /// selected_id: None, search_term: ""}` with its generation bumped so a
    /// superseded in-flight response can never commit. Search terms are
    /// cleared together with the rest (an ancestor change invalidates the
    /// result set the term was typed against). Idempotent with respect to
    /// visible state.
    pub fn reset_from(&mut self, level: Level) {
        for index in level.index()..Level::COUNT {
            self.levels[index].clear();
        }
    }
}
