//! # Port Range Model
//!
//! An inclusive, validated range of TCP ports.
//!
//! Accepted textual forms:
//! * A single port (e.g., `80`).
//! * A `start-end` pair (e.g., `1-1024`).

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScanError;

pub const MIN_PORT: u32 = 1;
pub const MAX_PORT: u32 = u16::MAX as u32;

/// Inclusive `start..=end` range of ports, always within `1..=65535`.
///
/// Serialized as the `"start-end"` descriptor string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PortRange {
    start: u16,
    end: u16,
}

impl PortRange {
    /// Validates the bounds and builds the range.
    ///
    /// Bounds are taken as `u32` so callers can hand over unchecked input
    /// (e.g., `70000`) and get an [`ScanError::InvalidRange`] back.
    pub fn new(start: u32, end: u32) -> Result<Self, ScanError> {
        let in_bounds = |port: u32| (MIN_PORT..=MAX_PORT).contains(&port);
        if !in_bounds(start) || !in_bounds(end) || start > end {
            return Err(ScanError::InvalidRange { start, end });
        }

        Ok(Self {
            start: start as u16,
            end: end as u16,
        })
    }

    /// A range holding exactly one port.
    pub fn single(port: u16) -> Result<Self, ScanError> {
        Self::new(port.into(), port.into())
    }

    pub fn start(&self) -> u16 {
        self.start
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    /// Number of ports in the range. Never zero.
    pub fn size(&self) -> usize {
        usize::from(self.end - self.start) + 1
    }

    pub fn contains(&self, port: u16) -> bool {
        (self.start..=self.end).contains(&port)
    }

    pub fn to_iter(&self) -> RangeInclusive<u16> {
        self.start..=self.end
    }

    /// The `offset`-th port of the range, if the range is that long.
    pub fn nth(&self, offset: usize) -> Option<u16> {
        if offset >= self.size() {
            return None;
        }
        u16::try_from(usize::from(self.start) + offset).ok()
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl FromStr for PortRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (start_str, end_str) = s.split_once('-').unwrap_or((s, s));

        let start = parse_bound(start_str)?;
        let end = parse_bound(end_str)?;

        PortRange::new(start, end).map_err(|e| e.to_string())
    }
}

fn parse_bound(s: &str) -> Result<u32, String> {
    s.trim()
        .parse::<u32>()
        .map_err(|e| format!("invalid port '{s}': {e}"))
}

impl From<PortRange> for String {
    fn from(range: PortRange) -> Self {
        range.to_string()
    }
}

impl TryFrom<String> for PortRange {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
