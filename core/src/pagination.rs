//! Incrementally loaded list for the infinite-scroll posts panel.
//!
//! Pages are kept in fetch order and rendered concatenated. At most one page
//! request is in flight at a time: `fetch_next_page` returns `None` while one
//! is pending, which is what keeps a burst of scroll events from issuing
//! duplicate requests.
//!
//! The next-page parameter is the length of the last page received. It is
//! carried for bookkeeping only; the request itself has no cursor.

use tracing::{debug, info, warn};

use crate::cancel::CancellationToken;
use crate::error::FetchError;
use crate::panel::PanelState;
use crate::types::Record;

/// Which page a ticket asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    First,
    /// Carries the page parameter in effect when the request was issued.
    Next(usize),
}

#[derive(Debug, Clone)]
pub struct PageTicket {
    request: PageRequest,
    generation: u64,
    token: CancellationToken,
}

impl PageTicket {
    pub fn request(&self) -> PageRequest {
        self.request
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

#[derive(Debug)]
struct InFlight {
    request: PageRequest,
    token: CancellationToken,
}

#[derive(Debug)]
pub struct PaginationController<R> {
    pages: Vec<Vec<R>>,
    state: PanelState,
    error: Option<FetchError>,
    generation: u64,
    in_flight: Option<InFlight>,
}

impl<R: Record> PaginationController<R> {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            state: PanelState::Idle,
            error: None,
            generation: 0,
            in_flight: None,
        }
    }

    /// Request the first page, superseding anything in flight.
    ///
    /// Used for the initial mount and for a manual refetch; existing pages
    /// stay visible until the new first page replaces them.
    pub fn fetch_first_page(&mut self) -> PageTicket {
        if let Some(previous) = self.in_flight.take() {
            debug!(resource = %R::RESOURCE, "pages: superseding in-flight request");
            previous.token.cancel();
        }
        info!(resource = %R::RESOURCE, "pages: loading first page");
        self.state = PanelState::Loading;
        self.issue(PageRequest::First)
    }

    pub fn refetch(&mut self) -> PageTicket {
        self.fetch_first_page()
    }

    /// Request the page after the last one received.
    ///
    /// Returns `None` if any page request is already in flight, if no page
    /// has arrived yet, or if the last page was empty.
    pub fn fetch_next_page(&mut self) -> Option<PageTicket> {
        if self.in_flight.is_some() {
            debug!(resource = %R::RESOURCE, "pages: request already in flight");
            return None;
        }
        let param = self.next_page_param()?;
        info!(resource = %R::RESOURCE, page = self.pages.len() + 1, param, "pages: loading next page");
        self.state = PanelState::Loading;
        Some(self.issue(PageRequest::Next(param)))
    }

    fn issue(&mut self, request: PageRequest) -> PageTicket {
        self.generation += 1;
        let token = CancellationToken::new();
        self.in_flight = Some(InFlight {
            request,
            token: token.clone(),
        });
        PageTicket {
            request,
            generation: self.generation,
            token,
        }
    }

    /// Apply the outcome of `ticket`'s request. Returns `false` for a
    /// superseded ticket.
    pub fn resolve(&mut self, ticket: &PageTicket, result: Result<Vec<R>, FetchError>) -> bool {
        if ticket.generation != self.generation || self.in_flight.is_none() {
            debug!(
                resource = %R::RESOURCE,
                stale = ticket.generation,
                current = self.generation,
                "pages: discarding superseded result"
            );
            return false;
        }

        self.in_flight = None;
        match result {
            Ok(page) => {
                info!(resource = %R::RESOURCE, request = ?ticket.request, count = page.len(), "pages: page received");
                if ticket.request == PageRequest::First {
                    self.pages.clear();
                }
                self.pages.push(page);
                self.state = PanelState::Success;
                self.error = None;
            }
            Err(err) => {
                warn!(resource = %R::RESOURCE, request = ?ticket.request, error = %err, "pages: request failed");
                self.state = PanelState::Error;
                self.error = Some(err);
            }
        }
        true
    }

    /// Cancel the in-flight page request, if any.
    pub fn cancel(&mut self) {
        if let Some(in_flight) = &self.in_flight {
            in_flight.token.cancel();
        }
    }

    /// Length of the most recent page; `None` before the first page or
    /// after an empty one.
    pub fn next_page_param(&self) -> Option<usize> {
        self.pages.last().map(Vec::len).filter(|len| *len > 0)
    }

    pub fn has_next_page(&self) -> bool {
        self.next_page_param().is_some()
    }

    pub fn is_fetching_next_page(&self) -> bool {
        matches!(
            self.in_flight,
            Some(InFlight {
                request: PageRequest::Next(_),
                ..
            })
        )
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    /// True during the first load, before any page has arrived.
    pub fn is_loading(&self) -> bool {
        self.state == PanelState::Loading && self.pages.is_empty()
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn pages(&self) -> &[Vec<R>] {
        &self.pages
    }

    /// All received records, pages concatenated in fetch order.
    pub fn items(&self) -> impl Iterator<Item = &R> {
        self.pages.iter().flatten()
    }

    pub fn item_count(&self) -> usize {
        self.pages.iter().map(Vec::len).sum()
    }
}

impl<R: Record> Default for PaginationController<R> {
    fn default() -> Self {
        Self::new()
    }
}
