//! Pagination Logic
//!
//! Keeps a level's 1-based page number consistent with its server-side
//! total count. The last page is `max(1, ceil(total_count / page_size))`;
//! an empty result set still has one (empty) page.

/// Total number of pages for a result set
///
/// # Examples
/// ```
/// use orgdrill::logic::pagination::total_pages;
///
/// assert_eq!(total_pages(0, 6), 1);
/// assert_eq!(total_pages(6, 6), 1);
/// assert_eq!(total_pages(7, 6), 2);
/// ```
pub fn total_pages(total_count: u64, page_size: u32) -> u32 {
    debug_assert!(page_size > 0, "page_size must be positive");
    let pages = total_count.div_ceil(page_size as u64);
    pages.clamp(1, u32::MAX as u64) as u32
}

/// Clamp an operator-requested page into `[1, total_pages]`
pub fn clamp_page(page: u32, total_count: u64, page_size: u32) -> u32 {
    page.clamp(1, total_pages(total_count, page_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result_set_has_one_page() {
        assert_eq!(total_pages(0, 6), 1);
    }

    #[test]
    fn test_exact_multiple() {
        assert_eq!(total_pages(12, 6), 2);
        assert_eq!(total_pages(18, 6), 3);
    }

    #[test]
    fn test_partial_last_page() {
        assert_eq!(total_pages(13, 6), 3);
        assert_eq!(total_pages(1, 6), 1);
    }

    #[test]
    fn test_clamp_upper_bound() {
        // 7 items at page size 6 -> 2 pages; page 5 clamps down
        assert_eq!(clamp_page(5, 7, 6), 2);
        assert_eq!(clamp_page(2, 7, 6), 2);
    }

    #[test]
    fn test_clamp_lower_bound() {
        assert_eq!(clamp_page(0, 7, 6), 1);
        assert_eq!(clamp_page(0, 0, 6), 1);
    }

    #[test]
    fn test_clamp_in_range_is_identity() {
        for page in 1..=4 {
            assert_eq!(clamp_page(page, 20, 6), page);
        }
    }
}
