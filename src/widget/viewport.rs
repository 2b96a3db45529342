//! The widget's view of the page it is embedded in: scroll position
//! and the ability to bring the newest message into view.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::watch;

/// How close to the bottom (in px) still counts as "at the bottom".
pub const BOTTOM_TOLERANCE: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub viewport_height: f64,
    pub scroll_y: f64,
    pub page_height: f64,
}

impl ScrollMetrics {
    pub fn at_bottom(&self) -> bool {
        self.viewport_height + self.scroll_y >= self.page_height - BOTTOM_TOLERANCE
    }
}

/// A live feed of scroll positions. The listener is released when
/// this is dropped.
pub struct ScrollSubscription {
    rx: watch::Receiver<ScrollMetrics>,
}

impl ScrollSubscription {
    pub fn new(rx: watch::Receiver<ScrollMetrics>) -> Self {
        Self { rx }
    }

    /// The most recent position, marking it as seen.
    pub fn latest(&mut self) -> ScrollMetrics {
        *self.rx.borrow_and_update()
    }

    /// Whether the page scrolled since `latest` was last called. A
    /// page that has gone away counts as unchanged.
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }
}

pub trait Viewport {
    fn subscribe(&self) -> ScrollSubscription;
    fn scroll_to_latest(&self);
}

struct PageInner {
    tx: watch::Sender<ScrollMetrics>,
    auto_scrolls: AtomicUsize,
}

/// An in-memory page. Clones share the same scroll state so the
/// owner can keep scrolling after handing one to a session.
#[derive(Clone)]
pub struct Page {
    inner: Arc<PageInner>,
}

impl Page {
    pub fn new(viewport_height: f64, page_height: f64) -> Self {
        let (tx, _rx) = watch::channel(ScrollMetrics {
            viewport_height,
            scroll_y: 0.0,
            page_height,
        });
        Self {
            inner: Arc::new(PageInner {
                tx,
                auto_scrolls: AtomicUsize::new(0),
            }),
        }
    }

    pub fn metrics(&self) -> ScrollMetrics {
        *self.inner.tx.borrow()
    }

    pub fn scroll_to(&self, scroll_y: f64) {
        self.inner.tx.send_modify(|m| m.scroll_y = scroll_y);
    }

    pub fn scroll_to_bottom(&self) {
        self.inner
            .tx
            .send_modify(|m| m.scroll_y = (m.page_height - m.viewport_height).max(0.0));
    }

    /// Number of live scroll listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.tx.receiver_count()
    }

    /// How many times a widget asked to reveal its newest message.
    pub fn auto_scroll_count(&self) -> usize {
        self.inner.auto_scrolls.load(Ordering::SeqCst)
    }
}

impl Viewport for Page {
    fn subscribe(&self) -> ScrollSubscription {
        ScrollSubscription::new(self.inner.tx.subscribe())
    }

    fn scroll_to_latest(&self) {
        self.inner.auto_scrolls.fetch_add(1, Ordering::SeqCst);
    }
}
