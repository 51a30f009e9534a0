//! Transport session: an ordered, bidirectional, message-framed channel.

pub mod ws;

pub use ws::WsTransport;

use async_trait::async_trait;

use crate::error::Result;
use crate::protocol::{ClientEvent, ServerEvent};

/// An open duplex channel to the model-serving endpoint.
///
/// The channel is assumed reliable and ordered. It is exclusively owned by
/// one session driver and lent to at most one active response run at a time,
/// so the methods take `&mut self`.
#[async_trait]
pub trait Transport: Send {
    /// Send one outbound structured message.
    async fn send(&mut self, event: &ClientEvent) -> Result<()>;

    /// Receive the next inbound event.
    ///
    /// Returns `None` once the channel is closed; after that every call
    /// returns `None`.
    async fn recv(&mut self) -> Option<Result<ServerEvent>>;

    /// Close the channel. Idempotent: closing an already-closed channel
    /// succeeds without releasing anything twice.
    async fn close(&mut self) -> Result<()>;
}
