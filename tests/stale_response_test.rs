//! Tests for stale fetch response suppression
//!
//! Scenario being guarded against: the operator selects company c1 (unit
//! request A goes out), then immediately selects c2 (unit request B goes
//! out). The network resolves B first and A last. Without the generation
//! guard, A's items for c1 would overwrite B's items for c2.
//!
//! Each request is tagged with its level's generation at issue time; every
//! newer request and every cascade reset bumps the generation, so a
//! superseded outcome can never commit, regardless of arrival order.

use orgdrill::api::{EntityPage, FetchError};
use orgdrill::fetch::{FetchOutcome, FetchRequest};
use orgdrill::{Browser, EntityRecord, Level};
use tokio::sync::mpsc;

const PAGE_SIZE: u32 = 6;

fn test_browser() -> (Browser, mpsc::UnboundedReceiver<FetchRequest>) {
    let (request_tx, request_rx) = mpsc::unbounded_channel();
    (Browser::new(PAGE_SIZE, request_tx), request_rx)
}

fn record(id: &str) -> EntityRecord {
    serde_json::from_str(&format!(r#"{{"id":"{id}","name":"{id}"}}"#)).expect("test record")
}

fn page_of(ids: &[&str], total_count: u64) -> EntityPage {
    EntityPage {
        items: ids.iter().map(|id| record(id)).collect(),
        total_count,
    }
}

fn ok_outcome(request: &FetchRequest, page: EntityPage) -> FetchOutcome {
    FetchOutcome {
        level: request.level,
        generation: request.generation,
        result: Ok(page),
    }
}

fn err_outcome(request: &FetchRequest, error: FetchError) -> FetchOutcome {
    FetchOutcome {
        level: request.level,
        generation: request.generation,
        result: Err(error),
    }
}

/// Boot the browser, load companies, select c1, and return the resulting
/// unit-level request (request A in the scenario above)
fn browser_with_unit_request_in_flight(
) -> (Browser, mpsc::UnboundedReceiver<FetchRequest>, FetchRequest) {
    let (mut browser, mut request_rx) = test_browser();
    browser.start();
    let companies = request_rx.try_recv().expect("company fetch");
    browser.handle_outcome(ok_outcome(&companies, page_of(&["c1", "c2"], 2)));

    browser.select(Level::Company, "c1");
    let unit_request = request_rx.try_recv().expect("unit fetch for c1");
    (browser, request_rx, unit_request)
}

#[test]
fn test_late_response_for_superseded_tuple_is_discarded() {
    let (mut browser, mut request_rx, request_a) = browser_with_unit_request_in_flight();

    // Selection changes to c2 before A resolves
    browser.select(Level::Company, "c2");
    let request_b = request_rx.try_recv().expect("unit fetch for c2");
    assert_ne!(request_a.generation, request_b.generation);

    // B resolves first and commits
    browser.handle_outcome(ok_outcome(&request_b, page_of(&["u-c2"], 1)));
    assert_eq!(browser.level(Level::Unit).items[0].id, "u-c2");

    // A resolves last; it must not overwrite B's result
    browser.handle_outcome(ok_outcome(&request_a, page_of(&["u-c1-stale"], 1)));
    let unit_state = browser.level(Level::Unit);
    assert_eq!(unit_state.items.len(), 1);
    assert_eq!(unit_state.items[0].id, "u-c2");
    assert_eq!(unit_state.total_count, 1);
}

#[test]
fn test_stale_response_arriving_before_newer_one_is_discarded() {
    let (mut browser, mut request_rx, request_a) = browser_with_unit_request_in_flight();

    browser.select(Level::Company, "c2");
    let request_b = request_rx.try_recv().expect("unit fetch for c2");

    // This time A arrives while B is still in flight
    browser.handle_outcome(ok_outcome(&request_a, page_of(&["u-c1-stale"], 1)));
    let unit_state = browser.level(Level::Unit);
    assert!(unit_state.items.is_empty(), "stale commit must not happen");
    assert!(unit_state.loading, "B is still outstanding");

    browser.handle_outcome(ok_outcome(&request_b, page_of(&["u-c2"], 1)));
    assert_eq!(browser.level(Level::Unit).items[0].id, "u-c2");
    assert!(!browser.level(Level::Unit).loading);
}

#[test]
fn test_response_after_cascade_reset_is_discarded() {
    let (mut browser, mut request_rx, request_a) = browser_with_unit_request_in_flight();

    // Toggle c1 off: unit level is reset and goes inert
    browser.select(Level::Company, "c1");
    assert!(request_rx.try_recv().is_err(), "no fetch after toggle-off");

    browser.handle_outcome(ok_outcome(&request_a, page_of(&["u-c1-stale"], 1)));
    let unit_state = browser.level(Level::Unit);
    assert!(unit_state.items.is_empty());
    assert_eq!(unit_state.total_count, 0);
    assert!(!unit_state.loading);
}

#[test]
fn test_stale_error_is_discarded_too() {
    let (mut browser, mut request_rx, request_a) = browser_with_unit_request_in_flight();

    browser.select(Level::Company, "c2");
    let request_b = request_rx.try_recv().expect("unit fetch for c2");
    browser.handle_outcome(ok_outcome(&request_b, page_of(&["u-c2"], 1)));

    // A fails after B already committed; the error must not surface
    browser.handle_outcome(err_outcome(&request_a, FetchError::Status(500)));
    assert!(browser.level(Level::Unit).error.is_none());
    assert_eq!(browser.level(Level::Unit).items[0].id, "u-c2");
}

#[test]
fn test_fetch_failure_preserves_last_good_view() {
    let (mut browser, mut request_rx, request_a) = browser_with_unit_request_in_flight();
    browser.handle_outcome(ok_outcome(&request_a, page_of(&["u1", "u2"], 2)));

    // Operator retries manually; the retry fails
    browser.refresh(Level::Unit);
    let retry = request_rx.try_recv().expect("manual refresh fetch");
    browser.handle_outcome(err_outcome(&retry, FetchError::Status(502)));

    let unit_state = browser.level(Level::Unit);
    assert_eq!(unit_state.error.as_deref(), Some("could not load unit data"));
    assert_eq!(unit_state.items.len(), 2, "last good items retained");
    assert_eq!(unit_state.total_count, 2);
    assert!(!unit_state.loading);
}

#[test]
fn test_error_does_not_cross_levels() {
    let (mut browser, mut request_rx, request_a) = browser_with_unit_request_in_flight();
    browser.handle_outcome(ok_outcome(&request_a, page_of(&["u1"], 1)));

    browser.select(Level::Unit, "u1");
    let sector_request = request_rx.try_recv().expect("sector fetch");
    browser.handle_outcome(err_outcome(&sector_request, FetchError::Status(500)));

    assert!(browser.level(Level::Sector).error.is_some());
    assert!(browser.level(Level::Company).error.is_none());
    assert!(browser.level(Level::Unit).error.is_none());

    // Shallower levels remain fully interactive
    browser.set_page(Level::Company, 1);
    browser.select(Level::Unit, "u1");
    assert!(browser.level(Level::Unit).selected_id.is_none());
}

#[test]
fn test_unauthorized_surfaces_session_expiry() {
    let (mut browser, _request_rx, request_a) = browser_with_unit_request_in_flight();
    assert!(!browser.session_expired());

    browser.handle_outcome(err_outcome(&request_a, FetchError::Unauthorized));

    assert!(browser.session_expired());
    assert_eq!(
        browser.level(Level::Unit).error.as_deref(),
        Some(orgdrill::browser::SESSION_EXPIRED_MESSAGE)
    );
    assert!(!browser.level(Level::Unit).loading);
}

#[test]
fn test_success_clears_previous_error() {
    let (mut browser, mut request_rx, request_a) = browser_with_unit_request_in_flight();
    browser.handle_outcome(err_outcome(&request_a, FetchError::Status(500)));
    assert!(browser.level(Level::Unit).error.is_some());

    browser.refresh(Level::Unit);
    let retry = request_rx.try_recv().expect("retry fetch");
    browser.handle_outcome(ok_outcome(&retry, page_of(&["u1"], 1)));
    assert!(browser.level(Level::Unit).error.is_none());
    assert_eq!(browser.level(Level::Unit).items.len(), 1);
}
