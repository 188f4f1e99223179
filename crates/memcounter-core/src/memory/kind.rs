use crate::error::{MemoryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Memory pools tracked by the runtime.
///
/// Discriminants match the runtime's memory-type numbering so that raw values
/// coming from allocator tables can be converted with [`MemoryKind::try_from`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(i32)]
pub enum MemoryKind {
    /// Accelerator memory.
    Device = 0,
    /// Regular pageable host memory.
    Host = 1,
    /// Page-locked host memory.
    Pinned = 2,
}

impl MemoryKind {
    pub const ALL: [MemoryKind; 3] = [MemoryKind::Device, MemoryKind::Host, MemoryKind::Pinned];

    pub const COUNT: usize = Self::ALL.len();

    pub fn label(&self) -> &'static str {
        match self {
            Self::Device => "Device",
            Self::Host => "Host",
            Self::Pinned => "Pinned",
        }
    }

    /// Slot of this kind in per-kind tables.
    pub(crate) fn index(self) -> usize {
        match self {
            Self::Device => 0,
            Self::Host => 1,
            Self::Pinned => 2,
        }
    }
}

impl TryFrom<i32> for MemoryKind {
    type Error = MemoryError;

    fn try_from(raw: i32) -> Result<Self> {
        match raw {
            0 => Ok(Self::Device),
            1 => Ok(Self::Host),
            2 => Ok(Self::Pinned),
            other => Err(MemoryError::UnrecognizedMemoryKind(other)),
        }
    }
}

impl From<MemoryKind> for i32 {
    fn from(kind: MemoryKind) -> Self {
        kind as i32
    }
}

impl fmt::Display for MemoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MemoryKind {
    type Err = MemoryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "device" | "gpu" => Ok(Self::Device),
            "host" | "cpu" => Ok(Self::Host),
            "pinned" => Ok(Self::Pinned),
            _ => Err(MemoryError::InvalidKindName(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_discriminants_round_trip() {
        for kind in MemoryKind::ALL {
            let raw: i32 = kind.into();
            assert_eq!(MemoryKind::try_from(raw).unwrap(), kind);
        }
    }

    #[test]
    fn out_of_range_discriminant_is_rejected() {
        assert_eq!(
            MemoryKind::try_from(3),
            Err(MemoryError::UnrecognizedMemoryKind(3))
        );
        assert_eq!(
            MemoryKind::try_from(-1),
            Err(MemoryError::UnrecognizedMemoryKind(-1))
        );
    }

    #[test]
    fn parses_labels_and_aliases() {
        assert_eq!("Device".parse::<MemoryKind>().unwrap(), MemoryKind::Device);
        assert_eq!("gpu".parse::<MemoryKind>().unwrap(), MemoryKind::Device);
        assert_eq!(" CPU ".parse::<MemoryKind>().unwrap(), MemoryKind::Host);
        assert_eq!("pinned".parse::<MemoryKind>().unwrap(), MemoryKind::Pinned);
        assert!(matches!(
            "uvm".parse::<MemoryKind>(),
            Err(MemoryError::InvalidKindName(_))
        ));
    }

    #[test]
    fn indices_are_distinct() {
        let mut seen = [false; MemoryKind::COUNT];
        for kind in MemoryKind::ALL {
            assert!(!seen[kind.index()]);
            seen[kind.index()] = true;
        }
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&MemoryKind::Pinned).unwrap();
        assert_eq!(json, "\"pinned\"");
        let back: MemoryKind = serde_json::from_str("\"device\"").unwrap();
        assert_eq!(back, MemoryKind::Device);
    }
}
