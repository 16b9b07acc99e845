//! Cross-thread command marshaling.
//!
//! Registry operations must run on the UI thread, but commands can originate
//! anywhere (an engine binder thread, a worker). [`CommandSender`] enqueues a
//! call from any thread and hands back a [`PendingReply`]; the UI thread
//! periodically calls [`CommandQueue::drain`] inside its event loop, where
//! the windowing backend is available, and the replies travel back to the
//! submitters. Submission never blocks, and the registry is only ever
//! entered from the draining thread, so it needs no locking.

use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use tracing::debug;

use casement_protocol::{MethodCall, Reply, Result};

use crate::dispatch;
use crate::window::{WindowBackend, WindowRegistry};

struct QueuedCall {
    call: MethodCall,
    reply: Sender<Result<Reply>>,
}

/// Sending half of the command queue. Cheap to clone; every window's
/// embedding can hold one to originate commands.
#[derive(Clone)]
pub struct CommandSender {
    tx: Sender<QueuedCall>,
}

/// Waiter for the reply to one submitted call.
pub struct PendingReply {
    rx: Receiver<Result<Reply>>,
}

/// Receiving half of the command queue, drained on the UI thread.
pub struct CommandQueue {
    rx: Receiver<QueuedCall>,
}

/// Create a connected sender/queue pair.
pub fn command_channel() -> (CommandSender, CommandQueue) {
    let (tx, rx) = unbounded();
    (CommandSender { tx }, CommandQueue { rx })
}

impl CommandSender {
    /// Enqueue a call for the UI thread. Never blocks.
    ///
    /// If the queue side is gone (the embedding shut down), the returned
    /// waiter reports that instead of hanging.
    pub fn submit(&self, call: MethodCall) -> PendingReply {
        let (reply_tx, reply_rx) = bounded(1);
        let queued = QueuedCall {
            call,
            reply: reply_tx,
        };
        if let Err(err) = self.tx.send(queued) {
            debug!(
                target: "casement::channel",
                method = %err.0.call.method,
                "submission dropped, queue closed"
            );
        }
        PendingReply { rx: reply_rx }
    }
}

impl PendingReply {
    /// Block until the UI thread has produced the reply.
    ///
    /// Returns `None` if the dispatching side went away before answering.
    pub fn wait(self) -> Option<Result<Reply>> {
        self.rx.recv().ok()
    }

    /// Poll for the reply without blocking.
    pub fn try_wait(&self) -> Option<Result<Reply>> {
        self.rx.try_recv().ok()
    }
}

impl CommandQueue {
    /// Dispatch every queued call in arrival order, on the calling (UI)
    /// thread. Returns the number of calls handled.
    pub fn drain(
        &self,
        registry: &mut WindowRegistry,
        backend: &mut dyn WindowBackend,
    ) -> usize {
        let mut handled = 0;
        while let Ok(queued) = self.rx.try_recv() {
            let result = dispatch::dispatch(registry, backend, &queued.call);
            if queued.reply.send(result).is_err() {
                debug!(
                    target: "casement::channel",
                    method = %queued.call.method,
                    "reply dropped, caller went away"
                );
            }
            handled += 1;
        }
        handled
    }
}
