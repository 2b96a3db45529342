//! Client side of the assistant: the chat widget embedded in the
//! storefront. Everything that touches the outside world (network,
//! page scrolling) sits behind `Transport` and `Viewport` so the
//! session itself can be driven directly in tests.

pub mod message;
pub mod render;
pub mod session;
pub mod transport;
pub mod viewport;

pub use message::{ChatMessage, Sender};
pub use session::{
    ChatSession, QuickReply, SessionLimits, SubmitOutcome, TRANSPORT_APOLOGY, Visibility,
    WidgetState,
};
pub use transport::{HttpTransport, Transport, TransportError};
pub use viewport::{Page, ScrollMetrics, ScrollSubscription, Viewport};
