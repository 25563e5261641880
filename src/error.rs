//! Error taxonomy for the engine.
//!
//! Per `spec.md` §7, transient per-envelope failures never propagate out
//! of the engine API as a `Result`: a receiver that exhausts its restart
//! budget just stops (there is no caller left to hand a `Result` back
//! to — supervision happens on the process's own thread), and a send to
//! an unknown or closed-mailbox destination is silently redirected to
//! the dead-letter process (see `Engine::dispatch`, `Event::
//! DeadLetterHit`). Only the call sites below actually construct a
//! value of this type.

use std::fmt;

use crate::pid::Pid;

#[derive(Debug, Clone)]
pub enum EngineError {
    /// A request's deadline elapsed before a response arrived.
    RequestTimeout,
    /// A response arrived but did not downcast to the type the caller
    /// asked `Response::result` for.
    ResponseTypeMismatch(Pid),
    /// `spawn`/`spawn_func` was called with a name/tags combination that
    /// is already registered; the existing process was left untouched.
    DuplicateRegistration(Pid),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RequestTimeout => write!(f, "request timed out before a response arrived"),
            Self::ResponseTypeMismatch(pid) => write!(f, "{pid}: response did not match the requested type"),
            Self::DuplicateRegistration(pid) => write!(f, "{pid}: already registered"),
        }
    }
}

impl std::error::Error for EngineError {}
