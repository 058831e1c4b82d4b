//! Total Count Resolution
//!
//! The list endpoints report the full result-set size out of band, in an
//! `X-Total-Count` response header. Proxies occasionally mangle the value
//! (duplicate the header, re-serialize the number in float form, pad it
//! with whitespace), so resolution is deliberately forgiving: an
//! unparseable or absent indicator falls back to the length of the
//! returned page rather than reporting zero.

use reqwest::header::HeaderMap;

/// Header carrying the server-side result-set size
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Derive the total result-set size from a list response.
///
/// Takes the first value of the (case-insensitive) total-count header if it
/// coerces to an integer, otherwise the number of items in the body.
pub fn resolve_total_count(headers: &HeaderMap, body_len: usize) -> u64 {
    headers
        .get_all(TOTAL_COUNT_HEADER)
        .iter()
        .next()
        .and_then(|value| value.to_str().ok())
        .and_then(parse_count)
        .unwrap_or(body_len as u64)
}

/// Coerce a header value to a non-negative integer.
///
/// Accepts plain integers and float-shaped strings with an integral value;
/// anything else (including negatives and non-finite forms) is treated as
/// absent, not zero.
fn parse_count(raw: &str) -> Option<u64> {
    let trimmed = raw.trim();
    if let Ok(count) = trimmed.parse::<u64>() {
        return Some(count);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 && value.fract() == 0.0 => {
            Some(value as u64)
        }
        _ => None,
    }
}
