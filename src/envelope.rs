//! Envelopes and the closed set of engine-injected system messages.

use std::any::Any;

use crate::pid::Pid;

/// A message in transit: payload, destination, and optional sender.
///
/// Created on send, consumed exactly once by the destination process, and
/// never mutated in place.
pub struct Envelope {
    pub(crate) payload: Box<dyn Any + Send>,
    pub destination: Pid,
    pub sender: Option<Pid>,
}

impl Envelope {
    pub(crate) fn new(payload: Box<dyn Any + Send>, destination: Pid, sender: Option<Pid>) -> Self {
        Self {
            payload,
            destination,
            sender,
        }
    }
}

/// Synthetic lifecycle messages the engine injects around user messages.
///
/// `Initialized` and `Started` are delivered, in that order, before any
/// user message at the start of every process generation; `Stopped` is
/// always the last message a receiver sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemMessage {
    Initialized,
    Started,
    Stopped,
}
