use crate::config::ReportConfig;
use crate::error::Result;
use crate::memory::{bytes_to_string, MemoryCounters, MemoryKind};
use tracing::{debug, warn};
use uuid::Uuid;

/// An execution context (worker, stream, request loop) and the counters it owns.
///
/// Code that allocates on behalf of the context borrows the counters through
/// [`counters_mut`](Self::counters_mut). Bytes still outstanding when the
/// context is dropped are reported as leaks.
#[derive(Debug)]
pub struct MemoryContext {
    id: Uuid,
    label: String,
    counters: MemoryCounters,
}

impl MemoryContext {
    pub fn new(label: impl Into<String>) -> Self {
        Self::from_counters(label.into(), MemoryCounters::new())
    }

    pub fn with_config(label: impl Into<String>, config: ReportConfig) -> Result<Self> {
        let counters = MemoryCounters::with_config(config)?;
        Ok(Self::from_counters(label.into(), counters))
    }

    fn from_counters(label: String, counters: MemoryCounters) -> Self {
        let context = Self {
            id: Uuid::new_v4(),
            label,
            counters,
        };
        debug!(context = %context.label, id = %context.id, "memory context created");
        context
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn counters(&self) -> &MemoryCounters {
        &self.counters
    }

    pub fn counters_mut(&mut self) -> &mut MemoryCounters {
        &mut self.counters
    }

    pub fn leaks(&self) -> Vec<(MemoryKind, i64)> {
        self.counters.outstanding()
    }
}

impl Drop for MemoryContext {
    fn drop(&mut self) {
        let config = self.counters.config();
        if !config.warn_on_leak {
            return;
        }
        for (kind, used) in self.counters.outstanding() {
            warn!(
                context = %self.label,
                id = %self.id,
                %kind,
                used,
                "memory context dropped with {} {} outstanding",
                bytes_to_string(used, config.precision),
                kind
            );
        }
    }
}
