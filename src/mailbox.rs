//! Bounded, single-consumer mailbox built on a `crossbeam_channel`.
//!
//! Enqueue policy on a full mailbox is **blocking**: the producer suspends
//! until the consumer makes room. This is the vendor choice this core
//! commits to (see `spec.md` / `SPEC_FULL.md` §4.3); the alternative
//! drop-newest policy is not implemented.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::envelope::Envelope;

/// An item traveling through a mailbox: either a user envelope or the
/// poison marker that requests graceful shutdown.
pub(crate) enum Mail {
    User(Envelope),
    Poison,
}

/// Producer handle for a process's mailbox. Cheap to clone; every sender
/// in the system holds one of these for a given destination.
#[derive(Clone)]
pub(crate) struct MailboxSender {
    tx: crossbeam_channel::Sender<Mail>,
    closed: Arc<AtomicBool>,
}

/// Consumer handle, owned by exactly one process.
pub(crate) struct MailboxReceiver {
    rx: crossbeam_channel::Receiver<Mail>,
}

/// Create a bounded mailbox with the given capacity (must be at least 1).
pub(crate) fn mailbox(capacity: usize) -> (MailboxSender, MailboxReceiver) {
    assert!(capacity >= 1, "mailbox capacity must be >= 1");
    let (tx, rx) = crossbeam_channel::bounded(capacity);
    let sender = MailboxSender {
        tx,
        closed: Arc::new(AtomicBool::new(false)),
    };
    let receiver = MailboxReceiver { rx };
    (sender, receiver)
}

impl MailboxSender {
    /// Whether this mailbox has been closed by a poison request.
    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Enqueue an envelope. Blocks the caller while the mailbox is full.
    /// Fails (handing the mail back) if the mailbox has been closed or its
    /// consumer has gone away.
    pub(crate) fn enqueue(&self, mail: Mail) -> Result<(), Mail> {
        if self.closed.load(Ordering::Acquire) {
            return Err(mail);
        }
        self.tx.send(mail).map_err(|err| err.into_inner())
    }

    /// Close the mailbox to further enqueues and push the poison marker.
    /// Pending envelopes ahead of the marker are still delivered; the
    /// marker itself is what triggers final shutdown once dequeued.
    pub(crate) fn poison(&self) {
        self.closed.store(true, Ordering::Release);
        let _ = self.tx.send(Mail::Poison);
    }
}

impl MailboxReceiver {
    /// Block for the next item. Returns `Err` only if every sender handle
    /// (including the one kept alive by the registry entry) has dropped,
    /// which this core never lets happen while a process is registered.
    pub(crate) fn recv(&self) -> Result<Mail, crossbeam_channel::RecvError> {
        self.rx.recv()
    }
}
