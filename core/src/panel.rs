//! Fetch lifecycle for one panel.
//!
//! A panel moves through `Idle -> Loading -> Success | Error`, and back to
//! `Loading` on every refetch. Each fetch is identified by a `FetchTicket`;
//! starting a new fetch cancels the previous ticket's token and bumps the
//! generation, so a late result from a superseded request is dropped instead
//! of overwriting newer data.

use tracing::{debug, info, warn};

use crate::cancel::CancellationToken;
use crate::error::FetchError;
use crate::types::{Record, Resource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Idle,
    Loading,
    Success,
    Error,
}

/// Handle for one issued fetch.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    resource: Resource,
    generation: u64,
    token: CancellationToken,
}

impl FetchTicket {
    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

/// State for one independently fetched list.
#[derive(Debug)]
pub struct PanelController<R> {
    state: PanelState,
    data: Option<Vec<R>>,
    error: Option<FetchError>,
    generation: u64,
    in_flight: Option<CancellationToken>,
}

impl<R: Record> PanelController<R> {
    pub fn new() -> Self {
        Self {
            state: PanelState::Idle,
            data: None,
            error: None,
            generation: 0,
            in_flight: None,
        }
    }

    pub fn resource(&self) -> Resource {
        R::RESOURCE
    }

    /// Start a fetch (initial mount or manual refetch).
    ///
    /// Any fetch still in flight is cancelled and its ticket goes stale.
    pub fn begin(&mut self) -> FetchTicket {
        if let Some(previous) = self.in_flight.take() {
            debug!(resource = %R::RESOURCE, generation = self.generation, "panel: superseding in-flight fetch");
            previous.cancel();
        }

        self.generation += 1;
        let token = CancellationToken::new();
        self.in_flight = Some(token.clone());
        info!(resource = %R::RESOURCE, from = ?self.state, generation = self.generation, "panel: loading");
        self.state = PanelState::Loading;

        FetchTicket {
            resource: R::RESOURCE,
            generation: self.generation,
            token,
        }
    }

    /// Apply the outcome of `ticket`'s fetch.
    ///
    /// Returns `false` (and changes nothing) if the ticket was superseded.
    pub fn resolve(&mut self, ticket: &FetchTicket, result: Result<Vec<R>, FetchError>) -> bool {
        if ticket.resource != R::RESOURCE || ticket.generation != self.generation {
            debug!(
                resource = %R::RESOURCE,
                stale = ticket.generation,
                current = self.generation,
                "panel: discarding superseded result"
            );
            return false;
        }

        self.in_flight = None;
        match result {
            Ok(records) => {
                info!(resource = %R::RESOURCE, count = records.len(), "panel: success");
                self.state = PanelState::Success;
                self.data = Some(records);
                self.error = None;
            }
            Err(err) => {
                warn!(resource = %R::RESOURCE, error = %err, "panel: fetch failed");
                self.state = PanelState::Error;
                self.error = Some(err);
            }
        }
        true
    }

    /// Cancel the in-flight fetch, if any. Its result still has to be
    /// resolved and lands as `FetchError::Cancelled`.
    pub fn cancel(&mut self) {
        if let Some(token) = &self.in_flight {
            token.cancel();
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    /// Records from the most recent successful fetch.
    pub fn data(&self) -> Option<&[R]> {
        self.data.as_deref()
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// True during the first load, before any data has arrived.
    pub fn is_loading(&self) -> bool {
        self.state == PanelState::Loading && self.data.is_none()
    }

    /// True whenever a fetch is in flight, including background refetches.
    pub fn is_fetching(&self) -> bool {
        self.state == PanelState::Loading
    }
}

impl<R: Record> Default for PanelController<R> {
    fn default() -> Self {
        Self::new()
    }
}
