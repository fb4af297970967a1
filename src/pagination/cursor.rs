//! Cursor pagination
//!
//! The analytics API pages with a `cursor` query parameter:
//! - first request carries no cursor
//! - each response says `next_page: true|false` and, when true, a `cursor`
//! - the cursor is echoed back verbatim on the next request

use super::types::{NextPage, PageResponse, PaginationState};
use crate::config::DEFAULT_MAX_PAGES;
use crate::error::{Error, Result};
use crate::http::PageFetcher;
use crate::types::{Record, StringMap};
use tracing::{debug, info};
use url::Url;

/// Query parameter carrying the cursor
const CURSOR_PARAM: &str = "cursor";

/// Cursor-based paginator
#[derive(Debug, Clone)]
pub struct CursorPaginator {
    /// Maximum pages fetched before giving up
    pub max_pages: usize,
}

impl Default for CursorPaginator {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl CursorPaginator {
    /// Create a paginator using the `cursor` parameter
    pub fn new(max_pages: usize) -> Self {
        Self { max_pages }
    }

    /// URL for the next request given the current state
    pub fn page_url(&self, base_url: &Url, state: &PaginationState) -> Url {
        let mut url = base_url.clone();
        if let Some(cursor) = &state.cursor {
            url.query_pairs_mut().append_pair(CURSOR_PARAM, cursor);
        }
        url
    }

    /// Update state from a decoded page and decide whether to continue
    pub fn process_response(
        &self,
        page: &PageResponse,
        state: &mut PaginationState,
    ) -> Result<NextPage> {
        state.add_page(page.record_count());

        if !page.has_next_page() {
            state.clear_cursor();
            return Ok(NextPage::Done);
        }

        let cursor = match page.cursor.as_deref() {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => {
                return Err(Error::MissingCursor {
                    page: state.pages_fetched,
                })
            }
        };

        if state.pages_fetched >= self.max_pages {
            return Err(Error::PageLimitExceeded {
                limit: self.max_pages,
            });
        }

        state.set_cursor(cursor.clone());
        Ok(NextPage::Continue { cursor })
    }

    /// Fetch every page starting at `base_url` and concatenate the records
    ///
    /// Any failure discards the records accumulated so far.
    pub async fn fetch_all(
        &self,
        fetcher: &dyn PageFetcher,
        base_url: &Url,
        headers: &StringMap,
    ) -> Result<Vec<Record>> {
        let (records, _) = self.fetch_pages(fetcher, base_url, headers).await?;
        Ok(records)
    }

    /// Same as [`fetch_all`](Self::fetch_all), also returning the final state
    pub async fn fetch_pages(
        &self,
        fetcher: &dyn PageFetcher,
        base_url: &Url,
        headers: &StringMap,
    ) -> Result<(Vec<Record>, PaginationState)> {
        let mut state = PaginationState::new();
        let mut records = Vec::new();

        loop {
            let url = self.page_url(base_url, &state);
            debug!("Requesting page {}: {}", state.pages_fetched + 1, url);

            let body = fetcher.fetch_page(&url, headers).await?;
            let page = PageResponse::from_json(body)?;
            let next = self.process_response(&page, &mut state)?;

            let page_records = page.into_records();
            info!(
                "Fetched page {} of {}: {} records{}",
                state.pages_fetched,
                base_url.path(),
                page_records.len(),
                if next.is_continue() {
                    ", requesting next page"
                } else {
                    ""
                }
            );
            records.extend(page_records);

            if next.is_done() {
                break;
            }
        }

        info!(
            "No more pages for {}: {} records in {} pages",
            base_url.path(),
            state.total_fetched,
            state.pages_fetched
        );
        Ok((records, state))
    }
}
