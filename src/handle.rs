//! The registry's view of a running process: just enough to route an
//! envelope to it. The full `Process` state machine lives in `process.rs`
//! and is never itself shared outside its own thread.

use crate::mailbox::MailboxSender;
use crate::pid::Pid;

#[derive(Clone)]
pub(crate) struct ProcessHandle {
    pub(crate) pid: Pid,
    pub(crate) mailbox: MailboxSender,
    pub(crate) kind: String,
}

impl ProcessHandle {
    pub(crate) fn new(pid: Pid, mailbox: MailboxSender, kind: String) -> Self {
        Self { pid, mailbox, kind }
    }
}
