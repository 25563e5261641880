//! The `Receiver` capability hosted by a process.

use crate::context::Context;

/// User code hosted by a process. A fresh `Receiver` instance is created by
/// the spawning factory at every (re)start, so state never survives a
/// restart implicitly — whatever the new instance needs it must rebuild
/// from its own construction logic.
pub trait Receiver: Send {
    fn receive(&mut self, ctx: &mut Context<'_>);
}

/// Adapts a plain closure into a `Receiver`, used by `Engine::spawn_func`.
pub(crate) struct FnReceiver<F> {
    pub(crate) f: F,
}

impl<F> Receiver for FnReceiver<F>
where
    F: FnMut(&mut Context<'_>) + Send,
{
    fn receive(&mut self, ctx: &mut Context<'_>) {
        (self.f)(ctx)
    }
}
