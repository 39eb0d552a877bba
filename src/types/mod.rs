//! Types shared by the operation clients.

mod page;
pub mod timespan;

pub use page::{Page, PageInfo, SortOrder};
pub(crate) use page::ListSegment;
