use super::format::{bytes_to_string, DEFAULT_PRECISION};
use super::kind::MemoryKind;
use crate::config::ReportConfig;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{error, info, trace, warn};

/// Counters kept for a single memory kind.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindCounters {
    /// Bytes currently outstanding. Negative means more was released than
    /// was ever recorded. Arithmetic wraps modulo 2^64, so matched
    /// allocate/deallocate pairs always cancel exactly.
    pub used: i64,
    /// Bytes ever allocated. Never decreases.
    pub allocated_total: u64,
    /// Most recent change applied to `used`.
    pub last_delta: i64,
}

/// Point-in-time copy of every kind's counters, for reporting.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    pub device: KindCounters,
    pub host: KindCounters,
    pub pinned: KindCounters,
}

impl MemorySnapshot {
    pub fn get(&self, kind: MemoryKind) -> &KindCounters {
        match kind {
            MemoryKind::Device => &self.device,
            MemoryKind::Host => &self.host,
            MemoryKind::Pinned => &self.pinned,
        }
    }
}

/// Byte accounting for one execution context.
///
/// Each worker owns its own instance and hands `&mut MemoryCounters` to the
/// allocators it drives; nothing here is shared, so updates need no locking.
/// Totals across contexts are not tracked.
#[derive(Debug, Default, Clone)]
pub struct MemoryCounters {
    kinds: [KindCounters; MemoryKind::COUNT],
    config: ReportConfig,
}

impl MemoryCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters reporting with `config`; fails if the config does not validate.
    pub fn with_config(config: ReportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            kinds: Default::default(),
            config,
        })
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Record `size` bytes of `kind` as allocated.
    pub fn allocate(&mut self, kind: MemoryKind, size: u64) {
        let delta = signed(size);
        let counters = &mut self.kinds[kind.index()];
        counters.used = counters.used.wrapping_add(delta);
        counters.allocated_total = counters.allocated_total.saturating_add(size);
        counters.last_delta = delta;
        trace!(%kind, size, used = counters.used, "memory allocated");
    }

    /// Record `size` bytes of `kind` as released.
    ///
    /// The size is trusted; releasing more than was allocated leaves `used`
    /// negative so the upstream bug stays visible.
    pub fn deallocate(&mut self, kind: MemoryKind, size: u64) {
        let delta = signed(size);
        let counters = &mut self.kinds[kind.index()];
        let before = counters.used;
        counters.used = counters.used.wrapping_sub(delta);
        counters.last_delta = delta.wrapping_neg();
        trace!(%kind, size, used = counters.used, "memory deallocated");

        if self.config.warn_on_negative && before >= 0 && counters.used < 0 {
            warn!(
                %kind,
                size,
                used = counters.used,
                "{} usage went negative ({}): more bytes released than allocated",
                kind,
                bytes_to_string(counters.used, self.config.precision)
            );
        }
    }

    /// [`allocate`](Self::allocate) for callers holding a raw memory-type value.
    ///
    /// Fails with [`MemoryError::UnrecognizedMemoryKind`] and leaves all
    /// counters untouched when `kind` is out of range.
    ///
    /// [`MemoryError::UnrecognizedMemoryKind`]: crate::error::MemoryError::UnrecognizedMemoryKind
    pub fn allocate_raw(&mut self, kind: i32, size: u64) -> Result<()> {
        let kind = resolve(kind)?;
        self.allocate(kind, size);
        Ok(())
    }

    /// [`deallocate`](Self::deallocate) for callers holding a raw memory-type value.
    pub fn deallocate_raw(&mut self, kind: i32, size: u64) -> Result<()> {
        let kind = resolve(kind)?;
        self.deallocate(kind, size);
        Ok(())
    }

    pub fn used(&self, kind: MemoryKind) -> i64 {
        self.kinds[kind.index()].used
    }

    pub fn allocated_total(&self, kind: MemoryKind) -> u64 {
        self.kinds[kind.index()].allocated_total
    }

    pub fn last_delta(&self, kind: MemoryKind) -> i64 {
        self.kinds[kind.index()].last_delta
    }

    pub fn kind(&self, kind: MemoryKind) -> KindCounters {
        self.kinds[kind.index()]
    }

    pub fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot {
            device: self.kind(MemoryKind::Device),
            host: self.kind(MemoryKind::Host),
            pinned: self.kind(MemoryKind::Pinned),
        }
    }

    /// Kinds whose current usage is not zero.
    pub fn outstanding(&self) -> Vec<(MemoryKind, i64)> {
        MemoryKind::ALL
            .iter()
            .map(|&kind| (kind, self.used(kind)))
            .filter(|&(_, used)| used != 0)
            .collect()
    }

    pub fn reset(&mut self) {
        self.kinds = Default::default();
    }

    /// One-line usage summary rendered with the configured precision.
    pub fn summary(&self) -> String {
        self.render(self.config.precision)
    }

    pub fn log_usage(&self) {
        info!("{}", self.summary());
    }

    fn render(&self, precision: usize) -> String {
        let parts: Vec<String> = MemoryKind::ALL
            .iter()
            .map(|&kind| format!("{} {}", kind, bytes_to_string(self.used(kind), precision)))
            .collect();
        format!("[MemUsage] {}", parts.join(", "))
    }
}

impl fmt::Display for MemoryCounters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_PRECISION))
    }
}

fn resolve(raw: i32) -> Result<MemoryKind> {
    MemoryKind::try_from(raw).map_err(|e| {
        error!(raw, "{}", e);
        e
    })
}

fn signed(size: u64) -> i64 {
    size as i64
}
