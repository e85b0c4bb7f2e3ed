//! Fetch-lifecycle scenarios driven through a scripted transport.
//!
//! Each call to the transport pops the next scripted reply (after its delay),
//! so tests control exactly what every request sees and in which order
//! requests complete.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use feed_core::{
    CancellationToken, FeedClient, FetchError, Fetcher, HttpRequest, HttpResponse, PanelController,
    PanelState, PaginationController, Post, ScrollMetrics, ScrollPublisher, ThresholdTrigger, Todo,
    Transport, DEFAULT_SCROLL_BOUNDARY,
};

struct Reply {
    delay: Duration,
    result: Result<HttpResponse, FetchError>,
}

#[derive(Default)]
struct Scripted {
    replies: Mutex<VecDeque<Reply>>,
    calls: AtomicUsize,
}

impl Scripted {
    fn push_ok(&self, delay_ms: u64, body: String) {
        self.replies.lock().unwrap().push_back(Reply {
            delay: Duration::from_millis(delay_ms),
            result: Ok(HttpResponse::ok(body)),
        });
    }

    fn push_err(&self, err: FetchError) {
        self.replies.lock().unwrap().push_back(Reply {
            delay: Duration::ZERO,
            result: Err(err),
        });
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for Scripted {
    async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted request");
        tokio::time::sleep(reply.delay).await;
        reply.result
    }
}

fn posts_json(ids: impl IntoIterator<Item = u64>) -> String {
    let items: Vec<String> = ids
        .into_iter()
        .map(|id| format!(r#"{{"userId":1,"id":{id},"title":"post {id}","body":"body {id}"}}"#))
        .collect();
    format!("[{}]", items.join(","))
}

fn todos_json(ids: impl IntoIterator<Item = u64>) -> String {
    let items: Vec<String> = ids
        .into_iter()
        .map(|id| format!(r#"{{"userId":1,"id":{id},"title":"todo {id}","completed":false}}"#))
        .collect();
    format!("[{}]", items.join(","))
}

fn fetcher(transport: Arc<Scripted>) -> Fetcher {
    Fetcher::new(FeedClient::new("http://feed.test"), transport)
}

fn sorted_ids<'a>(items: impl IntoIterator<Item = &'a Post>) -> Vec<u64> {
    let mut ids: Vec<u64> = items.into_iter().map(|p| p.id).collect();
    ids.sort_unstable();
    ids
}

#[tokio::test]
async fn three_items_load_into_panel() {
    let transport = Arc::new(Scripted::default());
    transport.push_ok(0, posts_json([1, 2, 3]));
    let fetcher = fetcher(transport.clone());

    let mut panel = PanelController::<Post>::new();
    assert_eq!(panel.state(), PanelState::Idle);

    let ticket = panel.begin();
    assert_eq!(panel.state(), PanelState::Loading);

    let result = fetcher.fetch::<Post>(ticket.token()).await;
    assert!(panel.resolve(&ticket, result));
    assert_eq!(panel.state(), PanelState::Success);
    assert_eq!(sorted_ids(panel.data().unwrap()), vec![1, 2, 3]);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn rejected_fetch_then_refetch() {
    let transport = Arc::new(Scripted::default());
    transport.push_err(FetchError::Transport("connection reset".into()));
    transport.push_ok(0, todos_json([9]));
    let fetcher = fetcher(transport.clone());

    let mut panel = PanelController::<Todo>::new();
    let ticket = panel.begin();
    let result = fetcher.fetch::<Todo>(ticket.token()).await;
    panel.resolve(&ticket, result);
    assert_eq!(panel.state(), PanelState::Error);
    assert!(!panel.is_loading());

    let ticket = panel.begin();
    assert_eq!(panel.state(), PanelState::Loading);
    let result = fetcher.fetch::<Todo>(ticket.token()).await;
    panel.resolve(&ticket, result);
    assert_eq!(panel.state(), PanelState::Success);
    assert_eq!(panel.data().unwrap()[0].id, 9);
}

#[tokio::test]
async fn scroll_near_bottom_requests_exactly_one_page() {
    let transport = Arc::new(Scripted::default());
    transport.push_ok(0, posts_json(1..=20));
    transport.push_ok(50, posts_json(21..=40));
    let fetcher = fetcher(transport.clone());

    let mut pages = PaginationController::<Post>::new();
    let first = pages.fetch_first_page();
    let result = fetcher.fetch::<Post>(first.token()).await;
    pages.resolve(&first, result);
    assert_eq!(pages.item_count(), 20);
    assert!(!pages.is_fetching_next_page());

    let near_bottom = Arc::new(AtomicUsize::new(0));
    let hits = near_bottom.clone();
    let mut publisher = ScrollPublisher::new();
    publisher.subscribe(ThresholdTrigger::new(DEFAULT_SCROLL_BOUNDARY, move |_: &ScrollMetrics| {
        hits.fetch_add(1, Ordering::SeqCst);
    }));

    let mut issued = Vec::new();
    let mut drain = |pages: &mut PaginationController<Post>, seen: &mut usize| {
        while *seen < near_bottom.load(Ordering::SeqCst) {
            *seen += 1;
            if let Some(ticket) = pages.fetch_next_page() {
                issued.push(ticket);
            }
        }
    };
    let mut seen = 0;

    // Far from the bottom: nothing.
    publisher.publish(ScrollMetrics::new(0.0, 400.0, 2000.0));
    drain(&mut pages, &mut seen);
    // Within 200 of the bottom, twice before anything resolves.
    publisher.publish(ScrollMetrics::new(1450.0, 400.0, 2000.0));
    drain(&mut pages, &mut seen);
    publisher.publish(ScrollMetrics::new(1500.0, 400.0, 2000.0));
    drain(&mut pages, &mut seen);

    assert_eq!(seen, 2);
    assert_eq!(issued.len(), 1);
    assert!(pages.is_fetching_next_page());

    let ticket = issued.pop().unwrap();
    let result = fetcher.fetch::<Post>(ticket.token()).await;
    assert!(pages.resolve(&ticket, result));
    assert_eq!(transport.calls(), 2);
    assert_eq!(pages.item_count(), 40);
    assert_eq!(pages.next_page_param(), Some(20));
    assert!(!pages.is_fetching_next_page());
}

#[tokio::test]
async fn refetch_during_flight_shows_one_result() {
    let transport = Arc::new(Scripted::default());
    // First request is slow; the refetch answers quickly.
    transport.push_ok(200, posts_json([1, 2, 3]));
    transport.push_ok(0, posts_json([7, 8]));
    let fetcher = fetcher(transport.clone());

    let mut panel = PanelController::<Post>::new();
    let first = panel.begin();
    let slow = {
        let fetcher = fetcher.clone();
        let ticket = first.clone();
        tokio::spawn(async move {
            let result = fetcher.fetch::<Post>(ticket.token()).await;
            (ticket, result)
        })
    };
    // Let the first request reach the transport before superseding it.
    tokio::time::sleep(Duration::from_millis(20)).await;

    let second = panel.begin();
    assert!(first.token().is_cancelled());
    let result = fetcher.fetch::<Post>(second.token()).await;
    assert!(panel.resolve(&second, result));

    let (ticket, late) = slow.await.unwrap();
    assert_eq!(late.as_ref().unwrap_err(), &FetchError::Cancelled);
    assert!(!panel.resolve(&ticket, late));

    assert_eq!(panel.state(), PanelState::Success);
    assert_eq!(sorted_ids(panel.data().unwrap()), vec![7, 8]);
}

#[tokio::test]
async fn cancelled_current_fetch_is_an_error() {
    let transport = Arc::new(Scripted::default());
    transport.push_ok(500, todos_json([1]));
    let fetcher = fetcher(transport.clone());

    let mut panel = PanelController::<Todo>::new();
    let ticket = panel.begin();
    let token: CancellationToken = ticket.token().clone();
    let task = {
        let fetcher = fetcher.clone();
        tokio::spawn(async move { fetcher.fetch::<Todo>(&token).await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    panel.cancel();

    let result = task.await.unwrap();
    assert!(panel.resolve(&ticket, result));
    assert_eq!(panel.state(), PanelState::Error);
    assert_eq!(panel.error(), Some(&FetchError::Cancelled));
}
