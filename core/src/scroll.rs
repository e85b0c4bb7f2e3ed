//! Scroll-position publishing and bottom-proximity detection.
//!
//! The view publishes raw `ScrollMetrics`; observers decide what to do with
//! them. `ThresholdTrigger` fires its callback on every published position
//! that lies within `boundary` units of the bottom. It does not debounce:
//! suppressing duplicate page requests is the pagination controller's job.

use tracing::trace;

/// Distance from the bottom, in scroll units, that counts as "near".
pub const DEFAULT_SCROLL_BOUNDARY: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Offset of the viewport's top edge from the content's top edge.
    pub scroll_top: f64,
    pub viewport_height: f64,
    /// Total content height.
    pub scroll_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_top: f64, viewport_height: f64, scroll_height: f64) -> Self {
        Self {
            scroll_top,
            viewport_height,
            scroll_height,
        }
    }

    /// How far the viewport's bottom edge is from the content's bottom.
    pub fn distance_to_bottom(&self) -> f64 {
        self.scroll_height - (self.scroll_top + self.viewport_height)
    }

    /// Largest `scroll_top` that keeps the viewport inside the content.
    pub fn max_scroll_top(&self) -> f64 {
        (self.scroll_height - self.viewport_height).max(0.0)
    }
}

/// `scroll_top + viewport_height >= scroll_height - boundary`.
pub fn is_near_bottom(metrics: &ScrollMetrics, boundary: f64) -> bool {
    metrics.scroll_top + metrics.viewport_height >= metrics.scroll_height - boundary
}

pub trait ScrollObserver: Send {
    fn on_scroll(&mut self, metrics: &ScrollMetrics);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Fans scroll positions out to subscribed observers, in subscription order.
#[derive(Default)]
pub struct ScrollPublisher {
    next_id: u64,
    observers: Vec<(SubscriptionId, Box<dyn ScrollObserver>)>,
    last: Option<ScrollMetrics>,
}

impl ScrollPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl ScrollObserver + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    pub fn publish(&mut self, metrics: ScrollMetrics) {
        trace!(
            scroll_top = metrics.scroll_top,
            viewport = metrics.viewport_height,
            height = metrics.scroll_height,
            "scroll: publish"
        );
        self.last = Some(metrics);
        for (_, observer) in &mut self.observers {
            observer.on_scroll(&metrics);
        }
    }

    /// The most recently published position.
    pub fn last(&self) -> Option<ScrollMetrics> {
        self.last
    }

    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }
}

/// Calls `on_trigger` for each published position near the bottom.
pub struct ThresholdTrigger<F> {
    boundary: f64,
    on_trigger: F,
}

impl<F> ThresholdTrigger<F>
where
    F: FnMut(&ScrollMetrics) + Send,
{
    pub fn new(boundary: f64, on_trigger: F) -> Self {
        Self {
            boundary,
            on_trigger,
        }
    }
}

impl<F> ScrollObserver for ThresholdTrigger<F>
where
    F: FnMut(&ScrollMetrics) + Send,
{
    fn on_scroll(&mut self, metrics: &ScrollMetrics) {
        if is_near_bottom(metrics, self.boundary) {
            (self.on_trigger)(metrics);
        }
    }
}
