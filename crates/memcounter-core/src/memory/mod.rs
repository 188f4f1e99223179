//! Memory accounting: per-kind counters and byte formatting.
//!
//! Components:
//! - `kind`: Closed set of memory pools (device, host, pinned)
//! - `counters`: Per-context used / allocated-total counters
//! - `format`: Byte count to human-readable string

pub mod counters;
pub mod format;
pub mod kind;

pub use counters::*;
pub use format::*;
pub use kind::*;
