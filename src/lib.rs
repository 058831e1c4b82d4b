//! Drill-down navigation engine for the org portal's REST API
//!
//! Five dependent levels (Company → Unit → Sector → User → Item). Selecting
//! an entity at one level triggers a paginated fetch at the next; changing a
//! selection resets everything deeper. Out-of-order responses are discarded
//! via per-level request generations, so the last-issued fetch always wins.
//!
//! This crate is the engine only: no rendering, no auth bootstrap, no writes.
//! The caller supplies a bearer credential, drives [`Browser`] from its own
//! event loop, and reads the resulting [`state::BrowserState`].
//!
//! Typical assembly:
//!
//! ```no_run
//! use orgdrill::{api::DirectoryClient, browser::Browser, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_default()?;
//!     let client = DirectoryClient::new(config.base_url, config.token);
//!     let (mut browser, mut outcomes) = Browser::connect(client, config.page_size);
//!
//!     browser.start();
//!     while let Some(outcome) = outcomes.recv().await {
//!         browser.handle_outcome(outcome);
//!         // ...render browser.state(), feed user intents back in...
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod browser;
pub mod config;
pub mod fetch;
pub mod logic;
pub mod model;
pub mod state;

pub use browser::Browser;
pub use model::{EntityRecord, Level};
