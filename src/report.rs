use chrono::{DateTime, Local};
use std::fmt;

pub const NOT_APPLICABLE: &str = "N/A";
pub const IP_LOOKUP_FAILED: &str = "failed to retrieve";
pub const PERMISSION_DENIED: &str = "Permission Denied";

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gigabytes {
    Value(f64),
    NotApplicable,
}

impl fmt::Display for Gigabytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` keeps width/alignment flags working for table columns.
        match self {
            Gigabytes::Value(v) => f.pad(&format!("{v:.2}")),
            Gigabytes::NotApplicable => f.pad(NOT_APPLICABLE),
        }
    }
}

// 1024^3, two decimals; a missing reading is N/A.
pub fn bytes_to_gb(bytes: Option<u64>) -> Gigabytes {
    match bytes {
        Some(b) => Gigabytes::Value(round_to(b as f64 / BYTES_PER_GB, 2)),
        None => Gigabytes::NotApplicable,
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

pub fn usage_percent(used: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to((used as f64 / total as f64) * 100.0, 1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostIdentity {
    pub hostname: String,
    pub ip_addresses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemorySnapshot {
    pub total_gb: Gigabytes,
    pub used_gb: Gigabytes,
    pub available_gb: Gigabytes,
    pub percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DiskEntry {
    Mounted {
        mountpoint: String,
        fstype: String,
        total_gb: Gigabytes,
        used_gb: Gigabytes,
        free_gb: Gigabytes,
        percent: f64,
    },
    Unreadable {
        mountpoint: String,
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessEntry {
    pub pid: u32,
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone)]
pub struct HostReport {
    pub generated_at: DateTime<Local>,
    pub identity: HostIdentity,
    pub cpu_usage_percent: f64,
    pub memory: MemorySnapshot,
    pub disks: Vec<DiskEntry>,
    pub processes: Vec<ProcessEntry>,
}
