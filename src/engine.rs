//! The engine: owns the registry and dead-letter process, spawns
//! processes, routes sends, performs requests, and poisons processes.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};

use crate::config::{EngineConfig, SpawnOptions};
use crate::dead_letter::DeadLetterReceiver;
use crate::envelope::Envelope;
use crate::error::EngineError;
use crate::events::{log_event, Event};
use crate::handle::ProcessHandle;
use crate::mailbox::{mailbox, Mail};
use crate::pid::Pid;
use crate::process::{self, ReceiverFactory};
use crate::receiver::{FnReceiver, Receiver};
use crate::registry::Registry;
use crate::remote::RemoteHook;
use crate::request::{reply_name, ReplyReceiver, Response};

/// Reserved name for the dead-letter PID.
pub const DEAD_LETTER_NAME: &str = "$dead_letter";

struct Inner {
    registry: Registry,
    dead_letter_pid: Pid,
    remote_hook: RwLock<Option<Box<dyn RemoteHook>>>,
    config: EngineConfig,
    subscribers: Mutex<Vec<crossbeam_channel::Sender<Event>>>,
}

/// A cheaply-cloneable handle to a running actor runtime instance.
///
/// Every clone shares the same registry, dead-letter process, and remote
/// hook slot; there is no hidden global singleton, so a process can host
/// more than one independent `Engine` (this is exercised heavily by this
/// crate's own test suite).
#[derive(Clone)]
pub struct Engine(Arc<Inner>);

impl Engine {
    /// Build an engine with default configuration.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Build an engine with explicit defaults for inbox size and restart
    /// budget.
    pub fn with_config(config: EngineConfig) -> Self {
        let dead_letter_pid = Pid::local(DEAD_LETTER_NAME);
        let inner = Arc::new(Inner {
            registry: Registry::new(),
            dead_letter_pid: dead_letter_pid.clone(),
            remote_hook: RwLock::new(None),
            config,
            subscribers: Mutex::new(Vec::new()),
        });
        let engine = Engine(inner);

        let factory: ReceiverFactory = Arc::new(|| Box::new(DeadLetterReceiver) as Box<dyn Receiver>);
        let opts = SpawnOptions::new()
            .inbox_size(4096)
            .max_restarts(u32::MAX)
            .kind("dead_letter");
        let (tx, rx) = mailbox(opts.inbox_size.unwrap());
        let handle = ProcessHandle::new(dead_letter_pid.clone(), tx, "dead_letter".into());
        engine.0.registry.install_dead_letter(handle);
        engine.spawn_thread(factory, rx, dead_letter_pid, opts.max_restarts.unwrap(), "dead_letter".into());

        engine
    }

    /// The registry observer, used by tests and the remote hook to check
    /// where a PID currently resolves.
    pub fn registry(&self) -> &Registry {
        &self.0.registry
    }

    /// The dead-letter PID: the sink for unroutable envelopes and the
    /// sentinel `registry().get(..)` returns for unknown/terminated PIDs.
    pub fn dead_letter(&self) -> Pid {
        self.0.dead_letter_pid.clone()
    }

    /// Install the (single) remote hook consulted for non-local sends.
    pub fn set_remote_hook(&self, hook: impl RemoteHook + 'static) {
        *self.0.remote_hook.write() = Some(Box::new(hook));
    }

    /// Remove any installed remote hook.
    pub fn clear_remote_hook(&self) {
        *self.0.remote_hook.write() = None;
    }

    /// Subscribe to a live copy of every event the engine emits.
    pub fn subscribe(&self) -> crossbeam_channel::Receiver<Event> {
        let (tx, rx) = crossbeam_channel::bounded(256);
        self.0.subscribers.lock().push(tx);
        rx
    }

    pub(crate) fn emit(&self, event: Event) {
        log_event(&event);
        let subscribers = self.0.subscribers.lock();
        for subscriber in subscribers.iter() {
            let _ = subscriber.try_send(event.clone());
        }
    }

    /// Spawn a process from a receiver factory under `name`, with the
    /// given options. Fails with `DuplicateRegistration` if a process
    /// with that exact name/tags combination is already registered.
    pub fn spawn<F, R>(&self, factory: F, name: impl Into<String>, opts: SpawnOptions) -> Result<Pid, EngineError>
    where
        F: Fn() -> R + Send + Sync + 'static,
        R: Receiver + 'static,
    {
        let pid = Pid::with_tags("local", name, opts.tags.clone());
        let wrapped: ReceiverFactory = Arc::new(move || Box::new(factory()) as Box<dyn Receiver>);
        self.spawn_with_pid(wrapped, pid, opts)
    }

    /// Convenience: wrap a stateless closure as a receiver, matching
    /// `spawn`'s semantics exactly.
    pub fn spawn_func<F>(&self, f: F, name: impl Into<String>, opts: SpawnOptions) -> Result<Pid, EngineError>
    where
        F: Fn(&mut crate::context::Context<'_>) + Send + Sync + Clone + 'static,
    {
        self.spawn(move || FnReceiver { f: f.clone() }, name, opts)
    }

    fn spawn_with_pid(&self, factory: ReceiverFactory, pid: Pid, opts: SpawnOptions) -> Result<Pid, EngineError> {
        let capacity = opts.inbox_size.unwrap_or(self.0.config.default_inbox_size);
        let max_restarts = opts.max_restarts.unwrap_or(self.0.config.default_max_restarts);
        let kind = opts.kind.clone().unwrap_or_else(|| pid.name().to_string());

        let (tx, rx) = mailbox(capacity);
        let handle = ProcessHandle::new(pid.clone(), tx, kind.clone());
        if !self.0.registry.add(handle) {
            return Err(EngineError::DuplicateRegistration(pid));
        }

        self.spawn_thread(factory, rx, pid.clone(), max_restarts, kind.clone());
        self.emit(Event::Spawned { pid: pid.clone(), kind });
        Ok(pid)
    }

    fn spawn_thread(
        &self,
        factory: ReceiverFactory,
        inbox: crate::mailbox::MailboxReceiver,
        pid: Pid,
        max_restarts: u32,
        kind: String,
    ) {
        let engine = self.clone();
        std::thread::Builder::new()
            .name(format!("actor-{pid}"))
            .spawn(move || process::run(factory, inbox, pid, engine, max_restarts, kind))
            .expect("failed to spawn actor thread");
    }

    /// Enqueue `msg` for `pid` with no sender attached.
    pub fn send<M: Any + Send + 'static>(&self, pid: &Pid, msg: M) {
        self.dispatch(pid, Box::new(msg), None)
    }

    /// Enqueue `msg` for `pid`, attaching `sender` so the receiver can
    /// reply to it.
    pub fn send_with_sender<M: Any + Send + 'static>(&self, pid: &Pid, msg: M, sender: Pid) {
        self.dispatch(pid, Box::new(msg), Some(sender))
    }

    fn dispatch(&self, pid: &Pid, payload: Box<dyn Any + Send>, sender: Option<Pid>) {
        let envelope = Envelope::new(payload, pid.clone(), sender);

        if !pid.is_local() {
            if let Some(hook) = self.0.remote_hook.read().as_ref() {
                hook.forward(envelope);
                return;
            }
        }

        let handle = self.0.registry.resolve(pid);
        if handle.pid == self.0.dead_letter_pid && *pid != self.0.dead_letter_pid {
            self.emit(Event::DeadLetterHit { destination: pid.clone() });
        }

        match handle.mailbox.enqueue(Mail::User(envelope)) {
            Ok(()) => {}
            Err(Mail::User(envelope)) => {
                // The resolved process's mailbox had just closed (a poison
                // raced this send). Fall back to dead-letter directly.
                self.emit(Event::DeadLetterHit {
                    destination: envelope.destination.clone(),
                });
                let dead_letter = self.0.registry.resolve(&self.0.dead_letter_pid);
                let _ = dead_letter.mailbox.enqueue(Mail::User(envelope));
            }
            Err(Mail::Poison) => unreachable!("enqueue never hands back a poison marker"),
        }
    }

    /// Request graceful shutdown of `pid`. Idempotent: poisoning an
    /// already-stopped (or never-registered) PID, or the dead-letter PID
    /// itself, is a no-op.
    pub fn poison(&self, pid: &Pid) {
        if *pid == self.0.dead_letter_pid {
            return;
        }
        let handle = self.0.registry.resolve(pid);
        if handle.pid == self.0.dead_letter_pid {
            return;
        }
        handle.mailbox.poison();
    }

    /// Send `msg` to `pid` and return a handle to await its reply (or a
    /// timeout) through an ephemeral reply process.
    pub fn request<M: Any + Send + 'static>(&self, pid: &Pid, msg: M, timeout: Duration) -> Response {
        let response_pid = Pid::local(reply_name());
        let (tx, rx) = crossbeam_channel::bounded(1);

        let factory: ReceiverFactory = {
            let tx = tx.clone();
            Arc::new(move || Box::new(ReplyReceiver::new(tx.clone())) as Box<dyn Receiver>)
        };
        let opts = SpawnOptions::new().inbox_size(1).max_restarts(0).kind("reply");
        self.spawn_with_pid(factory, response_pid.clone(), opts)
            .expect("ephemeral reply PID collided with an existing registration");

        self.send_with_sender(pid, msg, response_pid.clone());
        Response::new(response_pid, rx, self.clone(), timeout)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
