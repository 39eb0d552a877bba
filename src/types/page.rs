//! Cursor-paginated results.

use serde::Deserialize;

/// A page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Pagination information.
    pub page_info: PageInfo,
}

impl<T> Page<T> {
    /// Returns `true` if this page is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items in this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if there are more pages available.
    pub fn has_next(&self) -> bool {
        self.page_info.has_next
    }

    /// Returns the cursor for the next page, if available.
    pub fn next_cursor(&self) -> Option<&str> {
        if self.page_info.has_next {
            self.page_info.next_cursor.as_deref()
        } else {
            None
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            page_info: PageInfo::default(),
        }
    }
}

/// Pagination information for a page of results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    /// Whether there are more pages available.
    pub has_next: bool,
    /// Cursor for fetching the next page.
    pub next_cursor: Option<String>,
}

/// Sort order for list operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Oldest first.
    #[default]
    Ascending,
    /// Newest first.
    Descending,
}

impl SortOrder {
    /// Returns the `sort` query value for `field`.
    pub(crate) fn apply(self, field: &str) -> String {
        match self {
            SortOrder::Ascending => field.to_string(),
            SortOrder::Descending => format!("-{}", field),
        }
    }
}

/// A list segment as sent on the wire.
#[derive(Debug, Deserialize)]
pub(crate) struct ListSegment<T> {
    #[serde(default)]
    meta: SegmentMeta,
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SegmentMeta {
    cursor: Option<String>,
    #[serde(default)]
    is_truncated: bool,
}

impl<T> From<ListSegment<T>> for Page<T> {
    fn from(segment: ListSegment<T>) -> Self {
        Self {
            items: segment.data,
            page_info: PageInfo {
                has_next: segment.meta.is_truncated,
                next_cursor: segment.meta.cursor,
            },
        }
    }
}
