//! Concurrent registry mapping lookup keys to process handles.
//!
//! Grounded on the original engine's `registry.go`: `add` is insert-if-
//! absent (log and ignore on collision), `remove` is idempotent, `get`
//! never reports absence (it falls back to the dead-letter handle), and
//! `get_by_name` is a first-match scan. Restructured here as a
//! `parking_lot::RwLock` over an `FxHashMap`, matching the concurrent map
//! pattern used by this codebase's own process registry.

use std::sync::OnceLock;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::handle::ProcessHandle;
use crate::pid::Pid;

pub struct Registry {
    map: RwLock<FxHashMap<String, ProcessHandle>>,
    dead_letter: OnceLock<ProcessHandle>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self {
            map: RwLock::new(FxHashMap::default()),
            dead_letter: OnceLock::new(),
        }
    }

    /// Install the dead-letter handle. Called exactly once, during
    /// `Engine` construction, before any other process is spawned.
    pub(crate) fn install_dead_letter(&self, handle: ProcessHandle) {
        self.dead_letter
            .set(handle)
            .ok()
            .expect("dead letter installed more than once");
    }

    fn dead_letter_handle(&self) -> &ProcessHandle {
        self.dead_letter
            .get()
            .expect("dead letter not installed before use")
    }

    /// Insert a handle if its lookup key is absent. Returns `false` (and
    /// logs) on a duplicate key, leaving the existing entry untouched.
    pub(crate) fn add(&self, handle: ProcessHandle) -> bool {
        let mut map = self.map.write();
        if map.contains_key(handle.pid.lookup_key()) {
            log::warn!("process already registered: {}", handle.pid);
            return false;
        }
        map.insert(handle.pid.lookup_key().to_string(), handle);
        true
    }

    /// Remove a handle by lookup key. Idempotent: removing an absent key
    /// is a no-op.
    pub(crate) fn remove(&self, pid: &Pid) {
        self.map.write().remove(pid.lookup_key());
    }

    pub(crate) fn resolve(&self, pid: &Pid) -> ProcessHandle {
        match self.map.read().get(pid.lookup_key()) {
            Some(handle) => handle.clone(),
            None => self.dead_letter_handle().clone(),
        }
    }

    pub(crate) fn resolve_by_name(&self, name: &str) -> Option<ProcessHandle> {
        self.map.read().values().find(|h| h.pid.name() == name).cloned()
    }

    /// Look up a PID and report which PID would actually receive a send
    /// to it: itself if registered, or the dead-letter PID otherwise.
    /// Never reports absence.
    pub fn get(&self, pid: &Pid) -> Pid {
        self.resolve(pid).pid
    }

    /// First process whose name component equals `name`, if any is
    /// currently registered. Iteration order (and hence which entry wins
    /// when several processes share a name distinguished only by tags) is
    /// the hash map's order: deterministic within a run, unspecified
    /// across runs.
    pub fn get_by_name(&self, name: &str) -> Option<Pid> {
        self.resolve_by_name(name).map(|h| h.pid)
    }
}
