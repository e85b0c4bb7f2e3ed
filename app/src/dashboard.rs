//! The coordinator that owns both panels.
//!
//! # Design
//! A single task owns the `QueryCache`, the paged posts list and the scroll
//! publisher. Everything reaches it as a `Message` on one channel: user
//! input from the front end, "near bottom" events from the scroll trigger,
//! and results from spawned fetch tasks. After each message the task
//! renders a `Snapshot` and publishes it on a watch channel, so the front
//! end never touches panel state directly.
//!
//! The task holds only weak senders, so it stops on `Shutdown` or once every
//! `DashboardHandle` and in-flight fetch has been dropped.

use anyhow::{anyhow, Result};
use feed_core::view::{self, LINES_PER_ITEM};
use feed_core::{
    CancellationToken, FetchError, FetchTicket, Fetcher, PageTicket, PaginationController,
    PanelState, Post, QueryCache, Record, Resource, ScrollMetrics, ScrollPublisher,
    ThresholdTrigger, Todo,
};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::{PanelMode, Settings};

/// Rendered state of both panels at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub mode: PanelMode,
    /// Posts panel body lines (no header).
    pub posts: Vec<String>,
    /// Todos panel body lines (no header).
    pub todos: Vec<String>,
    pub posts_state: PanelState,
    pub todos_state: PanelState,
    /// First visible posts line.
    pub scroll_top: usize,
    pub viewport: usize,
    /// Pages received so far (paged mode only).
    pub pages: usize,
}

impl Snapshot {
    fn empty(mode: PanelMode, viewport: usize) -> Self {
        Self {
            mode,
            posts: Vec::new(),
            todos: Vec::new(),
            posts_state: PanelState::Idle,
            todos_state: PanelState::Idle,
            scroll_top: 0,
            viewport,
            pages: 0,
        }
    }
}

enum Message {
    Refetch(Resource),
    ScrollBy(i64),
    NearBottom,
    PostsFetched {
        ticket: FetchTicket,
        result: Result<Vec<Post>, FetchError>,
    },
    TodosFetched {
        ticket: FetchTicket,
        result: Result<Vec<Todo>, FetchError>,
    },
    PageFetched {
        ticket: PageTicket,
        result: Result<Vec<Post>, FetchError>,
    },
    Shutdown,
}

/// Cloneable front-end side of a running dashboard.
#[derive(Clone)]
pub struct DashboardHandle {
    tx: mpsc::UnboundedSender<Message>,
    snapshot: watch::Receiver<Snapshot>,
}

impl DashboardHandle {
    pub fn refetch(&self, resource: Resource) -> Result<()> {
        self.send(Message::Refetch(resource))
    }

    /// Move the posts viewport by `lines` (negative scrolls up).
    pub fn scroll_by(&self, lines: i64) -> Result<()> {
        self.send(Message::ScrollBy(lines))
    }

    pub fn shutdown(&self) -> Result<()> {
        self.send(Message::Shutdown)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot.clone()
    }

    fn send(&self, message: Message) -> Result<()> {
        self.tx
            .send(message)
            .map_err(|_| anyhow!("dashboard has stopped"))
    }
}

pub struct Dashboard {
    fetcher: Fetcher,
    mode: PanelMode,
    viewport: usize,
    boundary: f64,
    cache: QueryCache,
    feed: PaginationController<Post>,
    scroll: ScrollPublisher,
    scroll_top: f64,
    tx: mpsc::WeakUnboundedSender<Message>,
    rx: mpsc::UnboundedReceiver<Message>,
    snapshot: watch::Sender<Snapshot>,
}

impl Dashboard {
    /// Start the coordinator task; both panels begin loading immediately.
    pub fn spawn(fetcher: Fetcher, settings: &Settings) -> (DashboardHandle, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let (snapshot, snapshot_rx) =
            watch::channel(Snapshot::empty(settings.mode, settings.viewport_lines));

        let dashboard = Dashboard {
            fetcher,
            mode: settings.mode,
            viewport: settings.viewport_lines,
            boundary: settings.boundary,
            cache: QueryCache::new(),
            feed: PaginationController::new(),
            scroll: ScrollPublisher::new(),
            scroll_top: 0.0,
            tx: tx.downgrade(),
            rx,
            snapshot,
        };
        let task = tokio::spawn(dashboard.run());

        (
            DashboardHandle {
                tx,
                snapshot: snapshot_rx,
            },
            task,
        )
    }

    async fn run(mut self) {
        self.mount();
        self.publish();

        while let Some(message) = self.rx.recv().await {
            if matches!(message, Message::Shutdown) {
                break;
            }
            self.handle(message);
            self.publish();
        }

        self.cache.cancel_all();
        self.feed.cancel();
        info!("dashboard: stopped");
    }

    fn mount(&mut self) {
        info!(mode = ?self.mode, "dashboard: mounting panels");
        if self.mode == PanelMode::Paged {
            let tx = self.tx.clone();
            self.scroll
                .subscribe(ThresholdTrigger::new(self.boundary, move |_: &ScrollMetrics| {
                    if let Some(tx) = tx.upgrade() {
                        let _ = tx.send(Message::NearBottom);
                    }
                }));
        }
        self.start(Resource::Posts);
        self.start(Resource::Todos);
    }

    fn handle(&mut self, message: Message) {
        match message {
            Message::Refetch(resource) => self.start(resource),
            Message::ScrollBy(lines) => self.scroll_by(lines),
            Message::NearBottom => {
                if let Some(ticket) = self.feed.fetch_next_page() {
                    let token = ticket.token().clone();
                    self.spawn_fetch::<Post, _>(token, move |result| Message::PageFetched {
                        ticket,
                        result,
                    });
                }
            }
            Message::PostsFetched { ticket, result } => {
                self.cache.resolve_posts(&ticket, result);
            }
            Message::TodosFetched { ticket, result } => {
                self.cache.resolve_todos(&ticket, result);
            }
            Message::PageFetched { ticket, result } => {
                self.feed.resolve(&ticket, result);
            }
            Message::Shutdown => {}
        }
    }

    /// Initial load or manual refetch of one panel.
    fn start(&mut self, resource: Resource) {
        match (resource, self.mode) {
            (Resource::Posts, PanelMode::Paged) => {
                let ticket = self.feed.refetch();
                let token = ticket.token().clone();
                self.spawn_fetch::<Post, _>(token, move |result| Message::PageFetched {
                    ticket,
                    result,
                });
            }
            (Resource::Posts, PanelMode::Plain) => {
                let ticket = self.cache.invalidate(Resource::Posts);
                let token = ticket.token().clone();
                self.spawn_fetch::<Post, _>(token, move |result| Message::PostsFetched {
                    ticket,
                    result,
                });
            }
            (Resource::Todos, _) => {
                let ticket = self.cache.invalidate(Resource::Todos);
                let token = ticket.token().clone();
                self.spawn_fetch::<Todo, _>(token, move |result| Message::TodosFetched {
                    ticket,
                    result,
                });
            }
        }
    }

    fn spawn_fetch<R, F>(&self, token: CancellationToken, into_message: F)
    where
        R: Record,
        F: FnOnce(Result<Vec<R>, FetchError>) -> Message + Send + 'static,
    {
        let Some(tx) = self.tx.upgrade() else {
            debug!(resource = %R::RESOURCE, "dashboard: no handles left, fetch skipped");
            return;
        };
        let fetcher = self.fetcher.clone();
        tokio::spawn(async move {
            let result = fetcher.fetch::<R>(&token).await;
            // Nobody is listening once the dashboard has shut down.
            let _ = tx.send(into_message(result));
        });
    }

    fn scroll_by(&mut self, lines: i64) {
        let content = self.posts_body().len() as f64;
        let bounds = ScrollMetrics::new(self.scroll_top, self.viewport as f64, content);
        self.scroll_top = (self.scroll_top + lines as f64).clamp(0.0, bounds.max_scroll_top());

        let metrics = ScrollMetrics::new(self.scroll_top, self.viewport as f64, content);
        debug!(
            scroll_top = metrics.scroll_top,
            remaining = metrics.distance_to_bottom(),
            "dashboard: scrolled"
        );
        self.scroll.publish(metrics);
    }

    fn posts_body(&self) -> Vec<String> {
        match self.mode {
            PanelMode::Plain => view::panel_body(self.cache.posts()),
            PanelMode::Paged => view::paged_body(&self.feed),
        }
    }

    fn publish(&self) {
        let posts = self.posts_body();
        let posts_state = match self.mode {
            PanelMode::Plain => self.cache.state(Resource::Posts),
            PanelMode::Paged => self.feed.state(),
        };
        debug!(
            posts_lines = posts.len(),
            items = posts.len() / LINES_PER_ITEM,
            "dashboard: publishing snapshot"
        );
        self.snapshot.send_replace(Snapshot {
            mode: self.mode,
            posts,
            todos: view::panel_body(self.cache.todos()),
            posts_state,
            todos_state: self.cache.state(Resource::Todos),
            scroll_top: self.scroll_top as usize,
            viewport: self.viewport,
            pages: self.feed.pages().len(),
        });
    }
}
