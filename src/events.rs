//! Structured observability events (`spec.md` §6).
//!
//! Every event is logged through the `log` facade at an appropriate
//! level. Tests (and any host application) can additionally subscribe via
//! `Engine::subscribe` to receive a live copy of each event as it is
//! emitted, without depending on a specific logging backend.

use crate::pid::Pid;

#[derive(Debug, Clone)]
pub enum Event {
    /// A process was spawned and registered.
    Spawned { pid: Pid, kind: String },
    /// A receiver failed and the process restarted (within its budget).
    Restarted { pid: Pid, attempt: u32 },
    /// A process delivered its terminal `Stopped` message and deregistered.
    Stopped { pid: Pid },
    /// A send resolved to the dead-letter process because the destination
    /// was unknown or its mailbox had been closed.
    DeadLetterHit { destination: Pid },
    /// Reserved for a drop-on-overflow mailbox policy; unused by this
    /// core, which commits to blocking enqueue (see `mailbox.rs`).
    MailboxOverflow { pid: Pid },
}

pub(crate) fn log_event(event: &Event) {
    match event {
        Event::Spawned { pid, kind } => log::debug!("spawned {pid} (kind={kind})"),
        Event::Restarted { pid, attempt } => log::warn!("{pid} restarted (attempt {attempt})"),
        Event::Stopped { pid } => log::debug!("{pid} stopped"),
        Event::DeadLetterHit { destination } => log::debug!("dead letter: unroutable send to {destination}"),
        Event::MailboxOverflow { pid } => log::warn!("{pid} mailbox overflow"),
    }
}
