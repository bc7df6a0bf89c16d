//! Cursor over the paginated application listing.

use super::ConsoleClient;
use crate::error::{Error, Result};
use crate::types::{AppPage, AppRef, SessionToken};
use futures::Stream;
use futures::stream;
use std::collections::VecDeque;

/// Explicit cursor over `GET /apps`
///
/// Pages are requested with an increasing 1-based page number until one
/// reports `has_more = false`. There is no upper bound on the page count.
/// After the last page, or after an error, the pager is exhausted.
pub struct AppPager<'a> {
    client: &'a ConsoleClient,
    token: &'a SessionToken,
    next_page: Option<u32>,
}

impl<'a> AppPager<'a> {
    pub(super) fn new(client: &'a ConsoleClient, token: &'a SessionToken) -> Self {
        Self {
            client,
            token,
            next_page: Some(1),
        }
    }

    /// Page number the next call to [`next_page`](Self::next_page) will request
    pub fn next_page_number(&self) -> Option<u32> {
        self.next_page
    }

    /// Fetch the next page, or `None` once the listing is exhausted
    pub async fn next_page(&mut self) -> Result<Option<AppPage>> {
        let Some(page) = self.next_page else {
            return Ok(None);
        };

        match self.client.app_page(self.token, page).await {
            Ok(fetched) => {
                self.next_page = fetched.has_more.then_some(page + 1);
                Ok(Some(fetched))
            }
            Err(e) => {
                self.next_page = None;
                Err(e)
            }
        }
    }

    /// Flatten the pages into a lazy stream of applications
    ///
    /// A page is requested only once every item of the previous page has been
    /// taken, so a consumer that stops early never triggers further requests.
    /// The stream ends after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<AppRef>> + 'a {
        stream::try_unfold(
            (self, VecDeque::new()),
            |(mut pager, mut pending)| async move {
                loop {
                    if let Some(app) = pending.pop_front() {
                        return Ok::<_, Error>(Some((app, (pager, pending))));
                    }
                    match pager.next_page().await? {
                        Some(page) => pending.extend(page.data),
                        None => return Ok::<_, Error>(None),
                    }
                }
            },
        )
    }
}
