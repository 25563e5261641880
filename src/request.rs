//! Request/response built on ephemeral one-shot reply processes.

use std::any::Any;
use std::time::Duration;

use rand::Rng;

use crate::context::Context;
use crate::engine::Engine;
use crate::error::EngineError;
use crate::pid::Pid;
use crate::receiver::Receiver;

/// A pending request. Blocks on [`Response::result`] until either a reply
/// arrives or the deadline passed to [`Engine::request`] elapses.
pub struct Response {
    pid: Pid,
    rx: crossbeam_channel::Receiver<Box<dyn Any + Send>>,
    engine: Engine,
    timeout: Duration,
}

impl Response {
    pub(crate) fn new(
        pid: Pid,
        rx: crossbeam_channel::Receiver<Box<dyn Any + Send>>,
        engine: Engine,
        timeout: Duration,
    ) -> Self {
        Self {
            pid,
            rx,
            engine,
            timeout,
        }
    }

    /// The PID of the ephemeral reply process that will receive the
    /// answer. After `result()` returns, resolving this PID through the
    /// registry yields the dead-letter PID.
    pub fn pid(&self) -> &Pid {
        &self.pid
    }

    /// Block until a response arrives or the deadline elapses, then
    /// deregister the reply process either way. A reply that arrives
    /// after the deadline is routed to dead-letter when it is sent.
    pub fn result<T: 'static>(self) -> Result<T, EngineError> {
        let outcome = self.rx.recv_timeout(self.timeout);
        self.engine.poison(&self.pid);
        match outcome {
            Ok(boxed) => boxed
                .downcast::<T>()
                .map(|value| *value)
                .map_err(|_| EngineError::ResponseTypeMismatch(self.pid.clone())),
            Err(_) => Err(EngineError::RequestTimeout),
        }
    }
}

/// One-shot receiver: forwards the first non-system message it sees to
/// the waiting `Response`, then falls silent (the process itself is torn
/// down by `Response::result`'s unconditional `poison`).
pub(crate) struct ReplyReceiver {
    tx: crossbeam_channel::Sender<Box<dyn Any + Send>>,
}

impl ReplyReceiver {
    pub(crate) fn new(tx: crossbeam_channel::Sender<Box<dyn Any + Send>>) -> Self {
        Self { tx }
    }
}

impl Receiver for ReplyReceiver {
    fn receive(&mut self, ctx: &mut Context<'_>) {
        if ctx.message_as::<crate::envelope::SystemMessage>().is_some() {
            return;
        }
        let _ = self.tx.try_send(ctx.take_message());
    }
}

/// A unique-enough local name for an ephemeral reply PID.
pub(crate) fn reply_name() -> String {
    let token: u64 = rand::rng().random();
    format!("$reply-{token:016x}")
}
