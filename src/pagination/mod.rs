//! Pagination module
//!
//! Cursor pagination over the analytics API.
//!
//! # Overview
//!
//! Every analytics endpoint answers with one page of records plus a
//! `next_page` flag and an opaque `cursor`. [`CursorPaginator::fetch_all`]
//! keeps requesting pages, echoing the cursor back, until the server says
//! there is nothing left, and returns every record in page order.

mod cursor;
mod types;

pub use cursor::CursorPaginator;
pub use types::{NextPage, PageResponse, PaginationState};
