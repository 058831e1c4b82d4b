//! Level Fetch Service
//!
//! Background worker that executes level fetches against the portal API.
//! Requests go in over an unbounded channel, outcomes come back over
//! another; each request runs in its own task, so several levels can be in
//! flight at once and nothing blocks the caller's event loop.
//!
//! There is no network-level cancellation: a superseded request still runs
//! to completion, but its outcome carries the generation it was issued
//! under and [`crate::Browser::handle_outcome`] discards it when the
//! level has moved on. Responses are idempotent reads, so computing a
//! result that is never committed is harmless.

use tokio::sync::mpsc;

use crate::api::{DirectoryClient, EntityPage, FetchError};
use crate::model::Level;

/// Parameter tuple for one level fetch, tagged with the level's request
/// generation at issue time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub level: Level,
    /// Selected parent id; None only for the root level
    pub parent_id: Option<String>,
    pub page: u32,
    pub page_size: u32,
    /// Search term, only for levels that support search
    pub search: Option<String>,
    /// Staleness tag: must still equal the level's generation at commit time
    pub generation: u64,
}

/// Result of one level fetch, carrying the request's staleness tag
#[derive(Debug)]
pub struct FetchOutcome {
    pub level: Level,
    pub generation: u64,
    pub result: Result<EntityPage, FetchError>,
}

/// Spawn the fetch service worker.
///
/// Returns the request sender and the outcome receiver. The worker shuts
/// down when the last request sender is dropped.
pub fn spawn_fetch_service(
    client: DirectoryClient,
) -> (
    mpsc::UnboundedSender<FetchRequest>,
    mpsc::UnboundedReceiver<FetchOutcome>,
) {
    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<FetchRequest>();
    let (outcome_tx, outcome_rx) = mpsc::unbounded_channel::<FetchOutcome>();

    tokio::spawn(async move {
        while let Some(request) = request_rx.recv().await {
            let client = client.clone();
            let outcome_tx = outcome_tx.clone();

            tokio::spawn(async move {
                tracing::debug!(
                    level = request.level.display_name(),
                    page = request.page,
                    generation = request.generation,
                    "executing level fetch"
                );

                let result = client
                    .list_page(
                        request.level,
                        request.parent_id.as_deref(),
                        request.page,
                        request.page_size,
                        request.search.as_deref(),
                    )
                    .await;

                if let Err(error) = &result {
                    tracing::warn!(
                        level = request.level.display_name(),
                        page = request.page,
                        %error,
                        "level fetch failed"
                    );
                }

                // Receiver dropped means the browser is gone; nothing to do
                let _ = outcome_tx.send(FetchOutcome {
                    level: request.level,
                    generation: request.generation,
                    result,
                });
            });
        }
    });

    (request_tx, outcome_rx)
}
