//! The dead-letter process: the sink every unroutable envelope lands in.

use crate::context::Context;
use crate::envelope::SystemMessage;
use crate::receiver::Receiver;

/// Logs whatever it receives at `trace` level and otherwise does nothing.
/// `Engine::dispatch` already emits `Event::DeadLetterHit` before the
/// envelope reaches here; this receiver exists so the dead-letter PID is
/// a process like any other rather than special-cased in the dispatch
/// path.
pub(crate) struct DeadLetterReceiver;

impl Receiver for DeadLetterReceiver {
    fn receive(&mut self, ctx: &mut Context<'_>) {
        if ctx.message_as::<SystemMessage>().is_some() {
            return;
        }
        log::trace!(
            "dead letter: message from {:?} addressed to {} dropped",
            ctx.sender(),
            ctx.destination()
        );
    }
}
