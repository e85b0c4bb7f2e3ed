//! Client core for the two-panel posts/todos feed.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The host supplies a
//! `Transport`; everything above it (fetching, shuffling, panel state,
//! pagination, scroll thresholds, text rendering) is deterministic enough to
//! test without a real server or viewport.
//!
//! # Design
//! - `FeedClient` is stateless: it holds only `base_url`.
//! - `Fetcher` couples a client with a `Transport` and threads a
//!   `CancellationToken` through each request.
//! - `PanelController` and `PaginationController` hand out tickets; results
//!   for superseded tickets are discarded, never merged into state.
//! - `QueryCache` owns one panel per `Resource` and is the only place refetch
//!   invalidation happens.
//! - `ScrollPublisher` / `ThresholdTrigger` turn raw scroll positions into
//!   "near bottom" events without any rendering dependency.

pub mod cache;
pub mod cancel;
pub mod client;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod pagination;
pub mod panel;
pub mod scroll;
pub mod shuffle;
pub mod transport;
pub mod types;
pub mod view;

pub use cache::QueryCache;
pub use cancel::CancellationToken;
pub use client::FeedClient;
pub use error::FetchError;
pub use fetcher::Fetcher;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use pagination::{PageRequest, PageTicket, PaginationController};
pub use panel::{FetchTicket, PanelController, PanelState};
pub use scroll::{
    is_near_bottom, ScrollMetrics, ScrollObserver, ScrollPublisher, SubscriptionId,
    ThresholdTrigger, DEFAULT_SCROLL_BOUNDARY,
};
pub use shuffle::{shuffle, shuffle_random};
pub use transport::Transport;
pub use types::{Post, Record, Resource, Todo, UserId};
pub use view::ItemView;
