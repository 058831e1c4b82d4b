//! Browser Engine
//!
//! Composes the state store, the fetch service, and the commit logic into
//! the drill-down engine. All user intents (select, page, search) come in
//! through methods here; all fetch outcomes come back through
//! [`Browser::handle_outcome`]. State is only ever mutated on this side of
//! the channel, so the caller's event loop is the single point of
//! serialization.

use tokio::sync::mpsc;

use crate::api::{DirectoryClient, FetchError};
use crate::fetch::{self, FetchOutcome, FetchRequest};
use crate::logic::pagination;
use crate::model::Level;
use crate::state::{BrowserState, LevelState};

/// Message shown for any level whose session credential was rejected
pub const SESSION_EXPIRED_MESSAGE: &str = "session expired, log in again";

/// The drill-down engine.
///
/// Owns the five-level state and the sending half of the fetch service.
/// Lifecycle: call [`Browser::start`] once the session is authorized, then
/// pump every [`FetchOutcome`] from the service receiver into
/// [`Browser::handle_outcome`].
pub struct Browser {
    state: BrowserState,
    request_tx: mpsc::UnboundedSender<FetchRequest>,
    session_expired: bool,
}

impl Browser {
    /// Build a browser wired to an already-spawned fetch service
    pub fn new(page_size: u32, request_tx: mpsc::UnboundedSender<FetchRequest>) -> Self {
        Self {
            state: BrowserState::new(page_size),
            request_tx,
            session_expired: false,
        }
    }

    /// Spawn a fetch service for `client` and wire a browser to it.
    ///
    /// Returns the browser and the outcome receiver the caller must drain.
    pub fn connect(
        client: DirectoryClient,
        page_size: u32,
    ) -> (Browser, mpsc::UnboundedReceiver<FetchOutcome>) {
        let (request_tx, outcome_rx) = fetch::spawn_fetch_service(client);
        (Browser::new(page_size, request_tx), outcome_rx)
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    /// Shorthand for `state().level(level)`
    pub fn level(&self, level: Level) -> &LevelState {
        self.state.level(level)
    }

    /// True once any fetch came back 401/403. Level-agnostic: the caller
    /// should drop to the login flow rather than retry per level.
    pub fn session_expired(&self) -> bool {
        self.session_expired
    }

    /// Load the root level. Call once the session bootstrap reports
    /// ready + authorized.
    pub fn start(&mut self) {
        self.issue_fetch(Level::Company);
    }

    /// Select (or toggle off) the record with `id` at `level`.
    ///
    /// Selecting the already-selected id clears the selection. Either way
    /// every deeper level is reset; a fresh child fetch is only issued when
    /// the selection ends up non-empty. Ignored while the level's own
    /// dependency is unsatisfied.
    pub fn select(&mut self, level: Level, id: &str) {
        if !self.state.dependency_satisfied(level) {
            return;
        }

        let toggled_off = self.state.level(level).selected_id.as_deref() == Some(id);
        self.state.level_mut(level).selected_id = if toggled_off {
            None
        } else {
            Some(id.to_string())
        };

        tracing::debug!(
            level = level.display_name(),
            id,
            toggled_off,
            "selection changed"
        );

        if let Some(child) = level.child() {
            self.state.reset_from(child);
            if !toggled_off {
                self.issue_fetch(child);
            }
        }
    }

    /// Change the search term at `level`.
    ///
    /// Resets the level to page 1 and re-fetches it; everything deeper is
    /// reset exactly as for a selection change, since the term changes the
    /// result set downstream fetches depend on. Ignored for levels without
    /// search support or with an unsatisfied dependency.
    pub fn set_search(&mut self, level: Level, term: &str) {
        if !level.supports_search() || !self.state.dependency_satisfied(level) {
            return;
        }

        {
            let level_state = self.state.level_mut(level);
            level_state.search_term = term.to_string();
            level_state.page = 1;
        }

        if let Some(child) = level.child() {
            self.state.reset_from(child);
        }

        self.issue_fetch(level);
    }

    /// Move `level` to `page`, clamped to the valid range.
    ///
    /// Re-fetches only that level; pagination never cascades. A request for
    /// the page already shown is a no-op.
    pub fn set_page(&mut self, level: Level, page: u32) {
        if !self.state.dependency_satisfied(level) {
            return;
        }

        let page_size = self.state.page_size;
        let level_state = self.state.level(level);
        let clamped = pagination::clamp_page(page, level_state.total_count, page_size);
        if clamped == level_state.page {
            return;
        }

        self.state.level_mut(level).page = clamped;
        self.issue_fetch(level);
    }

    /// Re-issue the level's current parameter tuple.
    ///
    /// This is the operator's manual retry after a fetch failure; there are
    /// no automatic retries.
    pub fn refresh(&mut self, level: Level) {
        self.issue_fetch(level);
    }

    /// Commit one fetch outcome, unless a newer request or a cascade reset
    /// has superseded it.
    pub fn handle_outcome(&mut self, outcome: FetchOutcome) {
        let level = outcome.level;
        let page_size = self.state.page_size;

        if outcome.generation != self.state.level(level).generation {
            tracing::debug!(
                level = level.display_name(),
                stale = outcome.generation,
                current = self.state.level(level).generation,
                "discarding stale fetch outcome"
            );
            return;
        }

        match outcome.result {
            Ok(page) => {
                let level_state = self.state.level_mut(level);
                level_state.items = page.items;
                level_state.total_count = page.total_count;
                level_state.error = None;
                level_state.loading = false;

                // The result set may have shrunk under us; pull the page
                // back in range and fetch the adjusted page
                let total_pages = level_state.total_pages(page_size);
                if level_state.page > total_pages {
                    level_state.page = total_pages;
                    self.issue_fetch(level);
                }
            }
            Err(FetchError::Unauthorized) => {
                self.session_expired = true;
                let level_state = self.state.level_mut(level);
                level_state.loading = false;
                level_state.error = Some(SESSION_EXPIRED_MESSAGE.to_string());
            }
            Err(error) => {
                // Keep the last good items/total so the operator retains
                // the previous view; the error stays level-scoped
                tracing::warn!(level = level.display_name(), %error, "level fetch failed");
                let level_state = self.state.level_mut(level);
                level_state.loading = false;
                level_state.error =
                    Some(format!("could not load {} data", level.display_name()));
            }
        }
    }

    /// Issue a fetch for the level's current parameter tuple, tagging it
    /// with a fresh generation. Inert while the dependency is unsatisfied.
    fn issue_fetch(&mut self, level: Level) {
        if !self.state.dependency_satisfied(level) {
            return;
        }

        let parent_id = self.state.parent_id(level).map(str::to_string);
        let page_size = self.state.page_size;

        let level_state = self.state.level_mut(level);
        level_state.loading = true;
        let generation = level_state.next_generation();
        let search = if level.supports_search() && !level_state.search_term.is_empty() {
            Some(level_state.search_term.clone())
        } else {
            None
        };
        let page = level_state.page;

        tracing::debug!(
            level = level.display_name(),
            ?parent_id,
            page,
            generation,
            "issuing level fetch"
        );

        // Send failure means the service is gone (shutdown); the loading
        // flag will be cleared by the next reset
        let _ = self.request_tx.send(FetchRequest {
            level,
            parent_id,
            page,
            page_size,
            search,
            generation,
        });
    }
}
