//! Crate-level defaults, layered under per-spawn options.

/// Engine-wide defaults. Individual `SpawnOptions` override these per
/// process.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Default mailbox capacity when `SpawnOptions::inbox_size` is unset.
    pub default_inbox_size: usize,
    /// Default restart budget when `SpawnOptions::max_restarts` is unset.
    pub default_max_restarts: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_inbox_size: 128,
            default_max_restarts: 3,
        }
    }
}

/// Per-spawn overrides: `InboxSize`, `MaxRestarts`, `Tags`, `Kind` from
/// `spec.md` §4.1, expressed as a builder rather than variadic functional
/// options.
#[derive(Debug, Clone, Default)]
pub struct SpawnOptions {
    pub(crate) inbox_size: Option<usize>,
    pub(crate) max_restarts: Option<u32>,
    pub(crate) tags: Vec<String>,
    pub(crate) kind: Option<String>,
}

impl SpawnOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounded mailbox capacity; must be at least 1.
    pub fn inbox_size(mut self, n: usize) -> Self {
        assert!(n >= 1, "inbox size must be >= 1");
        self.inbox_size = Some(n);
        self
    }

    /// Maximum receiver-failure restarts before the process stops for good.
    pub fn max_restarts(mut self, k: u32) -> Self {
        self.max_restarts = Some(k);
        self
    }

    /// Tags appended to the spawned PID; they contribute to its lookup key.
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Logical class name for observability; defaults to the spawned name.
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}
