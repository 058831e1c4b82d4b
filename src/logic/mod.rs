//! Pure engine logic
//!
//! Small, unit-testable functions with no I/O:
//! - count: total result-set size resolution from a list response
//! - pagination: total-page computation and page clamping

pub mod count;
pub mod pagination;
