//! Per-window notice channel.
//!
//! Each window record owns an [`Endpoint`], the registry-side half of a
//! channel bound to that window. The registry pushes [`WindowNotice`] values
//! through it (an intercepted close, the teardown of a sibling window) and
//! the window's embedding drains them from the matching [`NoticeReceiver`].
//!
//! The other direction — a window originating commands — goes through the
//! shared [`crate::channel::CommandSender`], which any window may clone.

use crossbeam_channel::{Receiver, Sender, unbounded};
use tracing::debug;

use casement_protocol::WindowId;

/// A registry-originated event delivered through a window's endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowNotice {
    /// A close request was intercepted by the prevent-close guard; the
    /// window stays alive and should decide what to do with the request.
    CloseIntercepted,
    /// The host should close the main window. Its native lifetime is owned
    /// by the host application, never torn down by the registry.
    CloseRequested,
    /// The window with the given id was destroyed.
    WindowDestroyed(WindowId),
}

/// Window-side receiving half of an endpoint.
pub type NoticeReceiver = Receiver<WindowNotice>;

/// Registry-side half of a window's communication endpoint.
pub struct Endpoint {
    notices: Sender<WindowNotice>,
}

impl Endpoint {
    /// Create a connected endpoint/receiver pair.
    pub(crate) fn pair() -> (Self, NoticeReceiver) {
        let (tx, rx) = unbounded();
        (Self { notices: tx }, rx)
    }

    /// Deliver a notice to the window side.
    ///
    /// A window whose embedding stopped listening is tolerated; the notice
    /// is dropped.
    pub(crate) fn notify(&self, notice: WindowNotice) {
        if let Err(err) = self.notices.send(notice) {
            debug!(
                target: "casement::endpoint",
                notice = ?err.0,
                "notice dropped, window side disconnected"
            );
        }
    }
}
