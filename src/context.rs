//! Per-envelope ambient state visible to a receiver invocation.

use std::any::Any;

use crate::engine::Engine;
use crate::envelope::Envelope;
use crate::pid::Pid;

/// Ambient state for a single receiver invocation: the message, its
/// sender (if any), the receiving process's own PID, and the engine
/// handle. Built fresh for every envelope and dropped at the end of the
/// invocation — it never outlives one `Receiver::receive` call.
pub struct Context<'a> {
    envelope: Envelope,
    pid: &'a Pid,
    engine: &'a Engine,
}

impl<'a> Context<'a> {
    pub(crate) fn new(envelope: Envelope, pid: &'a Pid, engine: &'a Engine) -> Self {
        Self {
            envelope,
            pid,
            engine,
        }
    }

    /// The current message as a type-erased reference.
    pub fn message(&self) -> &(dyn Any + Send) {
        &*self.envelope.payload
    }

    /// Downcast the current message to a concrete type, if it matches.
    pub fn message_as<T: 'static>(&self) -> Option<&T> {
        self.envelope.payload.downcast_ref::<T>()
    }

    /// Take ownership of the current message, leaving a unit placeholder
    /// behind. Used by receivers (such as the request/response reply
    /// process) that need to forward the payload elsewhere rather than
    /// just read it.
    pub fn take_message(&mut self) -> Box<dyn Any + Send> {
        std::mem::replace(&mut self.envelope.payload, Box::new(()))
    }

    /// The sender PID, if the message was sent with one attached.
    pub fn sender(&self) -> Option<&Pid> {
        self.envelope.sender.as_ref()
    }

    /// The PID this envelope was actually addressed to. For ordinary
    /// processes this equals `pid()`; inside the dead-letter process it is
    /// the original, unroutable destination.
    pub fn destination(&self) -> &Pid {
        &self.envelope.destination
    }

    /// The receiving process's own PID.
    pub fn pid(&self) -> &Pid {
        self.pid
    }

    /// The engine that owns this process.
    pub fn engine(&self) -> &Engine {
        self.engine
    }

    /// Sugar for sending `value` back to the envelope's sender, with this
    /// process as the new sender. A no-op (with a warning logged) if the
    /// envelope had no sender.
    pub fn respond<M: Any + Send + 'static>(&self, value: M) {
        match self.sender() {
            Some(sender) => self.engine.send_with_sender(sender, value, self.pid.clone()),
            None => log::warn!("{}: respond() called but envelope had no sender", self.pid),
        }
    }
}
