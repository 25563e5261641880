//! The process event loop: lifecycle state machine and supervision.
//!
//! Each spawned process owns a dedicated OS thread running [`run`]. The
//! loop below is the entire state machine described in `spec.md` §4.2:
//! `Uninitialized -> Initialized -> Started -> (Running <-> Restarting) ->
//! Stopped`, collapsed into control flow rather than an explicit state
//! enum, since every state transition here is also a specific point in
//! the loop with nothing else live across it.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use crate::context::Context;
use crate::engine::Engine;
use crate::envelope::{Envelope, SystemMessage};
use crate::events::Event;
use crate::mailbox::{Mail, MailboxReceiver};
use crate::pid::Pid;
use crate::receiver::Receiver;

/// A capability producing a fresh `Receiver` instance, invoked once at
/// spawn and again at the start of every restart generation.
pub(crate) type ReceiverFactory = Arc<dyn Fn() -> Box<dyn Receiver> + Send + Sync>;

/// Runs the process loop until the process stops for good. Consumes the
/// mailbox receiver and the (cloned) engine handle for the lifetime of
/// the process.
pub(crate) fn run(
    factory: ReceiverFactory,
    inbox: MailboxReceiver,
    pid: Pid,
    engine: Engine,
    max_restarts: u32,
    kind: String,
) {
    let mut restarts: u32 = 0;

    'generation: loop {
        let mut receiver = factory();

        for system_message in [SystemMessage::Initialized, SystemMessage::Started] {
            if deliver_system(&mut *receiver, system_message, &pid, &engine).is_err() {
                restarts += 1;
                log::warn!("{pid}: panicked handling {system_message:?} (restart {restarts}/{max_restarts})");
                if restarts <= max_restarts {
                    engine.emit(Event::Restarted {
                        pid: pid.clone(),
                        attempt: restarts,
                    });
                    continue 'generation;
                }
                stop(&mut *receiver, &pid, &engine);
                return;
            }
        }
        log::debug!("{pid}: running (kind={kind})");

        loop {
            let mail = match inbox.recv() {
                Ok(mail) => mail,
                Err(_) => {
                    // Every sender handle vanished without a poison ever
                    // arriving; treat it the same as an explicit stop.
                    stop(&mut *receiver, &pid, &engine);
                    return;
                }
            };

            match mail {
                Mail::Poison => {
                    stop(&mut *receiver, &pid, &engine);
                    return;
                }
                Mail::User(envelope) => {
                    if deliver(&mut *receiver, envelope, &pid, &engine).is_err() {
                        restarts += 1;
                        log::warn!("{pid}: receiver panicked (restart {restarts}/{max_restarts})");
                        if restarts <= max_restarts {
                            engine.emit(Event::Restarted {
                                pid: pid.clone(),
                                attempt: restarts,
                            });
                            continue 'generation;
                        }
                        stop(&mut *receiver, &pid, &engine);
                        return;
                    }
                }
            }
        }
    }
}

fn deliver(
    receiver: &mut dyn Receiver,
    envelope: Envelope,
    pid: &Pid,
    engine: &Engine,
) -> std::thread::Result<()> {
    let mut ctx = Context::new(envelope, pid, engine);
    std::panic::catch_unwind(AssertUnwindSafe(|| receiver.receive(&mut ctx)))
}

fn deliver_system(
    receiver: &mut dyn Receiver,
    message: SystemMessage,
    pid: &Pid,
    engine: &Engine,
) -> std::thread::Result<()> {
    let payload: Box<dyn Any + Send> = Box::new(message);
    let envelope = Envelope::new(payload, pid.clone(), None);
    deliver(receiver, envelope, pid, engine)
}

/// Terminal transition: deliver `Stopped`, deregister, and emit the event.
/// Called from every exit path of the loop above, so it is the single
/// place that guarantees `Stopped` really is the last message any
/// receiver sees.
fn stop(receiver: &mut dyn Receiver, pid: &Pid, engine: &Engine) {
    let _ = deliver_system(receiver, SystemMessage::Stopped, pid, engine);
    engine.registry().remove(pid);
    engine.emit(Event::Stopped { pid: pid.clone() });
    log::debug!("{pid}: stopped");
}
