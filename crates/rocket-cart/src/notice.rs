//! User-facing notices and the sinks that surface them.

use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// A transient message shown to the user when a cart operation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Notice {
    /// Requested quantity exceeds available stock.
    OutOfStock,
    /// Adding a product failed.
    AddProductFailed,
    /// Removing a product failed.
    RemoveProductFailed,
    /// Changing a product's amount failed.
    UpdateFailed,
}

impl Notice {
    /// Stable identifier, e.g. `"out-of-stock"`.
    pub fn kind(&self) -> &'static str {
        match self {
            Notice::OutOfStock => "out-of-stock",
            Notice::AddProductFailed => "add-product-failed",
            Notice::RemoveProductFailed => "remove-product-failed",
            Notice::UpdateFailed => "update-failed",
        }
    }

    /// Text shown to the user.
    pub fn message(&self) -> &'static str {
        match self {
            Notice::OutOfStock => "Requested quantity is out of stock",
            Notice::AddProductFailed => "Could not add the product",
            Notice::RemoveProductFailed => "Could not remove the product",
            Notice::UpdateFailed => "Could not change the product quantity",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Fire-and-forget sink for notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

impl<F> Notifier for F
where
    F: Fn(Notice) + Send + Sync,
{
    fn notify(&self, notice: Notice) {
        self(notice)
    }
}

/// Notifier that emits each notice as a `warn` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        tracing::warn!(notice = notice.kind(), "{}", notice.message());
    }
}

/// Notifier that forwards notices to a channel, for a UI loop to drain.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notice>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiving end of its channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: Notice) {
        // Receiver gone means nobody is rendering notices anymore.
        let _ = self.tx.send(notice);
    }
}
