use std::ops::Range;

/// Number of questions on each page of a listing.
pub const PAGE_SIZE: u64 = 10;

/// A 1-based page of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_num: i64,
}

impl Pagination {
    /// Interpret the `page` query parameter, defaulting to the first page
    /// when it is absent or unparsable.
    pub fn from_query(page: Option<i64>) -> Self {
        Self {
            page_num: page.unwrap_or(1),
        }
    }

    pub fn page_num(&self) -> i64 {
        self.page_num
    }

    pub fn page_size(&self) -> u64 {
        PAGE_SIZE
    }

    /// Positions of the rows on this page within the full ordered result set,
    /// or `None` if the page number cannot hold any rows.
    pub fn range(&self) -> Option<Range<u64>> {
        let index = u64::try_from(self.page_num.checked_sub(1)?).ok()?;
        let start = index.checked_mul(PAGE_SIZE)?;
        Some(start..start.saturating_add(PAGE_SIZE))
    }

    /// Number of rows to skip before this page.
    pub fn skip(&self) -> Option<u64> {
        self.range().map(|range| range.start)
    }
}
