//! Page-number pagination over an already filtered and ordered list.

use serde::Serialize;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 100;

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    limit: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Parse a strictly positive integer, `None` for anything else.
fn positive(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
}

impl PageRequest {
    /// Build a request from raw query values.
    ///
    /// Missing, non-numeric, or non-positive values fall back to the defaults;
    /// `limit` is capped at [`MAX_LIMIT`].
    #[must_use]
    pub fn from_params(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: positive(page).unwrap_or(DEFAULT_PAGE),
            limit: positive(limit).map_or(DEFAULT_LIMIT, |l| l.min(MAX_LIMIT)),
        }
    }

    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Cut the requested page out of `items`.
    #[must_use]
    pub fn paginate<T>(&self, items: Vec<T>) -> Page<T> {
        let total = items.len();
        let start = (self.page - 1).saturating_mul(self.limit).min(total);
        let end = start.saturating_add(self.limit).min(total);

        let next_page = if end < total {
            (self.page + 1).to_string()
        } else {
            String::new()
        };
        let previous_page = if self.page > 1 {
            (self.page - 1).to_string()
        } else {
            String::new()
        };

        Page {
            items: items.into_iter().skip(start).take(end - start).collect(),
            next_page,
            previous_page,
        }
    }
}

/// One page of results. Absent neighbours are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_page: String,
    pub previous_page: String,
}
