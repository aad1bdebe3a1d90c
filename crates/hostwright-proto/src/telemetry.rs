//! Telemetry snapshot types
//!
//! A snapshot is a point-in-time record of host facts, fetched in one
//! `TelemetryLoad` round-trip. It is a plain owned value and is never
//! refreshed in place; fetch again for fresh data.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::os::OsFamily;

/// Point-in-time facts about a managed host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetrySnapshot {
    pub hostname: String,
    pub os: OsInfo,
    pub cpu: CpuFacts,
    /// Total physical memory in bytes.
    pub memory_bytes: u64,
    /// Mounted filesystems.
    pub fs: Vec<FsMount>,
    /// Network interfaces.
    pub net: Vec<NetInterface>,
    /// When the agent collected this data.
    pub collected_at: DateTime<Utc>,
}

/// Operating system facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsInfo {
    pub family: OsFamily,
    /// Concrete platform within the family, e.g. `ubuntu` or `centos`.
    pub platform: String,
    pub version: String,
    pub arch: String,
}

/// CPU facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuFacts {
    pub vendor: String,
    pub brand: String,
    pub cores: u32,
}

/// One mounted filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FsMount {
    pub filesystem: String,
    pub mountpoint: String,
    pub capacity_bytes: u64,
    pub used_bytes: u64,
    pub available_bytes: u64,
}

/// One network interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetInterface {
    pub name: String,
    pub mac: Option<String>,
    #[serde(default)]
    pub ipv4: Vec<String>,
    #[serde(default)]
    pub ipv6: Vec<String>,
}
