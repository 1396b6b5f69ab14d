//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Page selector for list queries, 1-indexed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number, starting at 1.
    #[serde(default = "default_page")]
    pub page: u32,
    /// Items per page.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
        }
    }
}

impl PageRequest {
    /// Number of items to skip before this page starts. Page 0 is
    /// treated as page 1.
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize) * (self.per_page as usize)
    }

    /// Number of items on a full page.
    #[must_use]
    pub fn limit(&self) -> usize {
        self.per_page as usize
    }
}

/// One page of results plus the metadata to render a pager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items of the requested page.
    pub data: Vec<T>,
    /// Pager metadata.
    pub meta: PageMeta,
}

/// Pager metadata.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageMeta {
    /// Page number of this response.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Items across all pages.
    pub total: u64,
    /// Page count; an empty result still has one (empty) page.
    pub total_pages: u32,
}

impl<T> PageResponse<T> {
    /// Assembles a page of `data` out of `total` matching items.
    #[must_use]
    pub fn new(data: Vec<T>, page: u32, per_page: u32, total: u64) -> Self {
        let total_pages = if total == 0 {
            1
        } else {
            u32::try_from(total.div_ceil(u64::from(per_page.max(1)))).unwrap_or(u32::MAX)
        };

        Self {
            data,
            meta: PageMeta {
                page,
                per_page,
                total,
                total_pages,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_defaults() {
        let req = PageRequest::default();
        assert_eq!((req.page, req.per_page), (1, 20));
        assert_eq!((req.offset(), req.limit()), (0, 20));
    }

    #[rstest]
    #[case(1, 10, 0)]
    #[case(3, 10, 20)]
    #[case(0, 10, 0)] // page 0 clamps to the first page
    #[case(2, 1, 1)]
    fn test_offsets(#[case] page: u32, #[case] per_page: u32, #[case] expected: usize) {
        let req = PageRequest { page, per_page };
        assert_eq!(req.offset(), expected);
    }

    #[rstest]
    #[case(0, 20, 1)] // empty result is one empty page
    #[case(7, 3, 3)]
    #[case(20, 10, 2)] // exact multiple
    #[case(21, 10, 3)]
    fn test_total_pages(#[case] total: u64, #[case] per_page: u32, #[case] expected: u32) {
        let resp: PageResponse<u8> = PageResponse::new(Vec::new(), 1, per_page, total);
        assert_eq!(resp.meta.total_pages, expected);
        assert_eq!(resp.meta.total, total);
    }
}
