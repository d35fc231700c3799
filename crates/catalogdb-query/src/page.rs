//! Slicing an ordered result set into pages for delivery to a screen.

use serde::Serialize;

use catalogdb_core::config::QuerySettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub per_page: usize,
}

impl PageRequest {
    /// 1-based `page` (0 is read as 1); `per_page` clamped to
    /// `1..=max_page_size`, falling back to the configured default.
    pub fn clamped(page: Option<usize>, per_page: Option<usize>, settings: &QuerySettings) -> Self {
        let max = settings.max_page_size.max(1);
        let per_page = per_page.unwrap_or(settings.default_page_size).clamp(1, max);
        Self { page: page.unwrap_or(1).max(1), per_page }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultPage<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

impl<T> ResultPage<T> {
    pub fn has_next(&self) -> bool { self.page < self.total_pages }
}

pub fn paginate<T: Clone>(results: &[T], request: PageRequest) -> ResultPage<T> {
    let per_page = request.per_page.max(1);
    let page = request.page.max(1);
    let total = results.len();
    let total_pages = total.div_ceil(per_page);
    let start = (page - 1).saturating_mul(per_page);
    let items = results.iter().skip(start).take(per_page).cloned().collect();
    ResultPage { items, page, per_page, total, total_pages }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_cover_results_in_order() {
        let data: Vec<u32> = (1..=5).collect();
        let p1 = paginate(&data, PageRequest { page: 1, per_page: 2 });
        assert_eq!(p1.items, vec![1, 2]);
        assert_eq!(p1.total_pages, 3);
        assert!(p1.has_next());
        let p3 = paginate(&data, PageRequest { page: 3, per_page: 2 });
        assert_eq!(p3.items, vec![5]);
        assert!(!p3.has_next());
        assert!(paginate(&data, PageRequest { page: 9, per_page: 2 }).items.is_empty());
    }

    #[test]
    fn empty_results_have_no_pages() {
        let page = paginate::<u32>(&[], PageRequest { page: 1, per_page: 10 });
        assert_eq!((page.total, page.total_pages), (0, 0));
    }

    #[test]
    fn request_is_clamped_to_settings() {
        let settings = QuerySettings::default();
        assert_eq!(PageRequest::clamped(Some(0), Some(10_000), &settings), PageRequest { page: 1, per_page: 100 });
        assert_eq!(PageRequest::clamped(None, None, &settings), PageRequest { page: 1, per_page: 20 });
        assert_eq!(PageRequest::clamped(Some(2), Some(0), &settings), PageRequest { page: 2, per_page: 1 });
    }
}
