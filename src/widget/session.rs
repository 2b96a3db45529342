//! The chat widget's state machine.
//!
//! A `ChatSession` owns the conversation log, whether the panel is
//! open, the draft being typed and whether the page is scrolled far
//! enough down that the widget should get out of the way. All changes
//! happen through `&mut self` on discrete events (clicks, keys,
//! scrolls, finished requests) so no two transitions ever overlap.
//!
//! Sending a message does not block. Each request runs on its own
//! task in a `JoinSet`; `next_completion` applies replies in whatever
//! order the network delivers them. A request task that dies without
//! answering counts as a transport failure.

use std::sync::Arc;

use handlebars::Handlebars;
use tokio::task::JoinSet;

use super::message::ChatMessage;
use super::render::{plain_product_list, render_product_list, templates};
use super::transport::{Transport, TransportError};
use super::viewport::{ScrollMetrics, ScrollSubscription, Viewport};
use crate::intent::Reply;

pub const TRANSPORT_APOLOGY: &str = "Sorry, I couldn't understand that.";

type Completion = Result<Reply, TransportError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Closed,
    Open,
}

/// What the shopper actually sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Scrolled to the bottom of the page, nothing is shown
    Hidden,
    /// Just the floating button that opens the panel
    Launcher,
    /// The full chat panel
    Panel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank input, nothing happened
    Ignored,
    /// Too many requests outstanding, nothing was appended
    Throttled,
    Sent,
}

/// Canned messages offered as one tap buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickReply {
    Hello,
    StoreHours,
    Recommend,
}

impl QuickReply {
    pub const ALL: [QuickReply; 3] = [
        QuickReply::Hello,
        QuickReply::StoreHours,
        QuickReply::Recommend,
    ];

    pub fn text(&self) -> &'static str {
        match self {
            QuickReply::Hello => "Hello",
            QuickReply::StoreHours => "What are your store hours?",
            QuickReply::Recommend => "Recommend me a product",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SessionLimits {
    /// Requests allowed to be waiting on the server at once
    pub max_in_flight: usize,
    /// Oldest messages are dropped beyond this
    pub max_messages: usize,
}

impl Default for SessionLimits {
    fn default() -> Self {
        Self {
            max_in_flight: 8,
            max_messages: 200,
        }
    }
}

pub struct ChatSession<T: Transport, V: Viewport> {
    messages: Vec<ChatMessage>,
    state: WidgetState,
    suppressed: bool,
    draft: String,
    transport: Arc<T>,
    viewport: V,
    scroll: ScrollSubscription,
    templates: Handlebars<'static>,
    requests: JoinSet<Completion>,
    limits: SessionLimits,
    // Messages ever appended, and how many of those a front end has
    // already shown
    appended: usize,
    shown: usize,
}

impl<T: Transport, V: Viewport> ChatSession<T, V> {
    pub fn new(transport: T, viewport: V) -> Self {
        Self::with_limits(transport, viewport, SessionLimits::default())
    }

    pub fn with_limits(transport: T, viewport: V, limits: SessionLimits) -> Self {
        let mut scroll = viewport.subscribe();
        let suppressed = scroll.latest().at_bottom();

        Self {
            messages: Vec::new(),
            state: WidgetState::Closed,
            suppressed,
            draft: String::new(),
            transport: Arc::new(transport),
            viewport,
            scroll,
            templates: templates(),
            requests: JoinSet::new(),
            limits,
            appended: 0,
            shown: 0,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == WidgetState::Open
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    pub fn visibility(&self) -> Visibility {
        match (self.suppressed, self.state) {
            (true, _) => Visibility::Hidden,
            (false, WidgetState::Closed) => Visibility::Launcher,
            (false, WidgetState::Open) => Visibility::Panel,
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn in_flight(&self) -> usize {
        self.requests.len()
    }

    /// Messages appended since the last call, oldest first. Anything
    /// already dropped by the log cap is skipped.
    pub fn take_unshown(&mut self) -> &[ChatMessage] {
        let pending = (self.appended - self.shown).min(self.messages.len());
        self.shown = self.appended;
        &self.messages[self.messages.len() - pending..]
    }

    pub fn open(&mut self) {
        self.state = WidgetState::Open;
    }

    pub fn close(&mut self) {
        self.state = WidgetState::Closed;
    }

    pub fn toggle(&mut self) {
        self.state = match self.state {
            WidgetState::Open => WidgetState::Closed,
            WidgetState::Closed => WidgetState::Open,
        };
    }

    pub fn set_draft(&mut self, text: &str) {
        self.draft = text.to_string();
    }

    /// Recompute suppression for a new scroll position. Open/closed is
    /// left alone so scrolling back up restores whatever was showing.
    pub fn on_scroll(&mut self, metrics: ScrollMetrics) {
        let suppressed = metrics.at_bottom();
        if suppressed != self.suppressed {
            tracing::trace!("Widget suppressed: {}", suppressed);
        }
        self.suppressed = suppressed;
    }

    /// Pick up any scroll that happened since the last check. Returns
    /// true if there was one.
    pub fn sync_scroll(&mut self) -> bool {
        if !self.scroll.has_changed() {
            return false;
        }
        let metrics = self.scroll.latest();
        self.on_scroll(metrics);
        true
    }

    /// Send `text` to the assistant. The user's message shows up right
    /// away and the reply is appended once it arrives.
    pub fn submit(&mut self, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            return SubmitOutcome::Ignored;
        }
        if self.requests.len() >= self.limits.max_in_flight {
            tracing::warn!(
                "Dropping message, {} requests already outstanding",
                self.requests.len()
            );
            return SubmitOutcome::Throttled;
        }

        self.push(ChatMessage::user(text));
        self.draft.clear();
        self.dispatch(text);

        SubmitOutcome::Sent
    }

    /// Enter key or the send button.
    pub fn submit_draft(&mut self) -> SubmitOutcome {
        let text = self.draft.clone();
        self.submit(&text)
    }

    pub fn quick_reply(&mut self, preset: QuickReply) -> SubmitOutcome {
        self.submit(preset.text())
    }

    fn dispatch(&mut self, text: &str) {
        let transport = Arc::clone(&self.transport);
        let message = text.to_string();

        // Dropping the session aborts whatever is still outstanding
        self.requests
            .spawn(async move { transport.send(&message).await });
    }

    /// Wait for the next outstanding request to finish and append its
    /// reply. Returns false when nothing is outstanding.
    pub async fn next_completion(&mut self) -> bool {
        let Some(joined) = self.requests.join_next().await else {
            return false;
        };

        match joined {
            Ok(Ok(reply)) => self.on_response(reply),
            Ok(Err(e)) => {
                tracing::warn!("Chat request failed: {}", e);
                self.on_transport_failure();
            }
            Err(e) => {
                tracing::error!("Chat request task died: {}", e);
                self.on_transport_failure();
            }
        }
        true
    }

    /// Apply every outstanding request. Returns how many were applied.
    pub async fn settle(&mut self) -> usize {
        let mut applied = 0;
        while self.next_completion().await {
            applied += 1;
        }
        applied
    }

    /// Append a reply from the assistant. Product lists are rendered
    /// to HTML and marked structured, text is shown as is.
    pub fn on_response(&mut self, reply: Reply) {
        let message = match reply {
            Reply::Text(body) => ChatMessage::bot(&body),
            Reply::ProductList(products) => {
                match render_product_list(&self.templates, &products) {
                    Ok(html) => ChatMessage::bot_structured(&html),
                    Err(e) => {
                        tracing::error!("Failed to render product list: {}", e);
                        ChatMessage::bot(&plain_product_list(&products))
                    }
                }
            }
        };
        self.push(message);
    }

    pub fn on_transport_failure(&mut self) {
        self.push(ChatMessage::bot(TRANSPORT_APOLOGY));
    }

    fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.appended += 1;
        if self.messages.len() > self.limits.max_messages {
            let excess = self.messages.len() - self.limits.max_messages;
            self.messages.drain(..excess);
        }
        self.viewport.scroll_to_latest();
    }
}
