pub mod cpu;
pub mod disk;
pub mod identity;
pub mod memory;
pub mod process;
pub mod system;
#[cfg(test)]
pub mod testing;

use crate::config::Config;
use crate::report::HostReport;
use chrono::Local;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("permission denied")]
    PermissionDenied,
    #[error("process {0} no longer exists")]
    NoSuchProcess(u32),
    #[error("process {0} is a zombie")]
    Zombie(u32),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[cfg_attr(unix, allow(dead_code))]
    #[error("{0}")]
    Unavailable(String),
}

impl ProbeError {
    pub fn from_io(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::PermissionDenied {
            ProbeError::PermissionDenied
        } else {
            ProbeError::Io(err)
        }
    }
}

#[derive(Debug, Clone)]
pub struct InterfaceAddrs {
    pub name: String,
    pub addrs: Vec<IpAddr>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryReading {
    pub total_bytes: Option<u64>,
    pub used_bytes: Option<u64>,
    pub available_bytes: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Partition {
    pub mountpoint: PathBuf,
    pub fstype: String,
}

#[derive(Debug, Clone, Copy)]
pub struct PartitionUsage {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub free_bytes: u64,
    pub percent: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ProcessDetail {
    pub pid: u32,
    pub name: String,
    pub exe: Option<String>,
    pub cmdline: Vec<String>,
}

pub trait HostProbe {
    fn host_name(&self) -> Option<String>;
    fn interfaces(&mut self) -> Result<Vec<InterfaceAddrs>, ProbeError>;
    fn cpu_usage(&mut self, window: Duration) -> f64;
    fn memory(&mut self) -> MemoryReading;
    fn partitions(&mut self) -> Result<Vec<Partition>, ProbeError>;
    fn partition_usage(&self, partition: &Partition) -> Result<PartitionUsage, ProbeError>;
    fn process_ids(&mut self) -> Vec<u32>;
    fn process_detail(&mut self, pid: u32) -> Result<ProcessDetail, ProbeError>;
}

pub const CPU_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

pub fn collect_report<P: HostProbe>(probe: &mut P, cfg: &Config) -> HostReport {
    let generated_at = Local::now();
    let identity = identity::collect_identity(probe, &cfg.loopback_interfaces);
    let cpu_usage_percent = cpu::collect_cpu(probe);
    let memory = memory::collect_memory(probe);
    let disks = disk::collect_disks(probe);
    let processes = process::collect_processes(probe);

    HostReport {
        generated_at,
        identity,
        cpu_usage_percent,
        memory,
        disks,
        processes,
    }
}

#[cfg(test)]
mod tests {
    use super::testing::FakeProbe;
    use super::*;

    #[test]
    fn io_permission_errors_are_classified() {
        let err = ProbeError::from_io(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        assert!(matches!(err, ProbeError::PermissionDenied));

        let err = ProbeError::from_io(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(matches!(err, ProbeError::Io(_)));
    }

    #[test]
    fn collect_report_runs_every_query() {
        let mut probe = FakeProbe::healthy();
        let report = collect_report(&mut probe, &Config::default());

        assert_eq!(report.identity.hostname, "web-01");
        assert_eq!(report.cpu_usage_percent, 12.5);
        assert_eq!(report.disks.len(), 2);
        assert_eq!(report.processes.len(), 2);
        assert_eq!(probe.cpu_windows, vec![CPU_SAMPLE_WINDOW]);
    }

    #[test]
    fn timestamp_is_taken_before_sampling() {
        let mut probe = FakeProbe::healthy();
        let report = collect_report(&mut probe, &Config::default());

        let sampled_at = probe.cpu_sampled_at.expect("cpu sampled");
        assert!(report.generated_at <= sampled_at);
    }
}
