use super::{
    HostProbe, InterfaceAddrs, MemoryReading, Partition, PartitionUsage, ProbeError,
    ProcessDetail,
};
use chrono::{DateTime, Local};
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
pub enum UsageFault {
    PermissionDenied,
    Io(io::ErrorKind),
}

#[derive(Debug, Clone, Copy)]
pub enum ProcessFault {
    Vanished,
    AccessDenied,
    Zombie,
    Io(io::ErrorKind),
}

#[derive(Debug, Default)]
pub struct FakeProbe {
    pub host_name: Option<String>,
    pub interfaces: Option<Vec<InterfaceAddrs>>,
    pub cpu_percent: f64,
    pub cpu_windows: Vec<Duration>,
    pub cpu_sampled_at: Option<DateTime<Local>>,
    pub memory: MemoryReading,
    pub partitions: Option<Vec<(Partition, PartitionUsage)>>,
    pub usage_faults: HashMap<PathBuf, UsageFault>,
    pub processes: BTreeMap<u32, ProcessDetail>,
    pub process_faults: HashMap<u32, ProcessFault>,
}

impl FakeProbe {
    pub fn healthy() -> Self {
        let mut probe = FakeProbe {
            host_name: Some("web-01".to_string()),
            interfaces: Some(vec![
                iface("lo", &["127.0.0.1"]),
                iface("eth0", &["10.0.0.5", "fe80::1"]),
            ]),
            cpu_percent: 12.5,
            memory: MemoryReading {
                total_bytes: Some(16 * GIB),
                used_bytes: Some(6 * GIB),
                available_bytes: Some(10 * GIB),
            },
            partitions: Some(vec![
                partition("/", "ext4", 100 * GIB, 40 * GIB),
                partition("/boot", "vfat", GIB, GIB / 4),
            ]),
            ..FakeProbe::default()
        };
        probe.add_process(1, "systemd", Some("/usr/lib/systemd/systemd"), &["/sbin/init"]);
        probe.add_process(2, "kthreadd", None, &[]);
        probe
    }

    pub fn add_process(&mut self, pid: u32, name: &str, exe: Option<&str>, cmdline: &[&str]) {
        self.processes.insert(
            pid,
            ProcessDetail {
                pid,
                name: name.to_string(),
                exe: exe.map(str::to_string),
                cmdline: cmdline.iter().map(|s| s.to_string()).collect(),
            },
        );
    }
}

pub const GIB: u64 = 1024 * 1024 * 1024;

pub fn iface(name: &str, addrs: &[&str]) -> InterfaceAddrs {
    InterfaceAddrs {
        name: name.to_string(),
        addrs: addrs
            .iter()
            .filter_map(|a| a.parse::<IpAddr>().ok())
            .collect(),
    }
}

pub fn partition(mount: &str, fstype: &str, total: u64, used: u64) -> (Partition, PartitionUsage) {
    let free = total.saturating_sub(used);
    (
        Partition {
            mountpoint: PathBuf::from(mount),
            fstype: fstype.to_string(),
        },
        PartitionUsage {
            total_bytes: total,
            used_bytes: used,
            free_bytes: free,
            percent: crate::report::usage_percent(used, used + free),
        },
    )
}

impl HostProbe for FakeProbe {
    fn host_name(&self) -> Option<String> {
        self.host_name.clone()
    }

    fn interfaces(&mut self) -> Result<Vec<InterfaceAddrs>, ProbeError> {
        self.interfaces.clone().ok_or_else(|| {
            ProbeError::Io(io::Error::new(io::ErrorKind::Other, "getifaddrs failed"))
        })
    }

    fn cpu_usage(&mut self, window: Duration) -> f64 {
        self.cpu_windows.push(window);
        self.cpu_sampled_at = Some(Local::now());
        self.cpu_percent
    }

    fn memory(&mut self) -> MemoryReading {
        self.memory.clone()
    }

    fn partitions(&mut self) -> Result<Vec<Partition>, ProbeError> {
        match &self.partitions {
            Some(list) => Ok(list.iter().map(|(p, _)| p.clone()).collect()),
            None => Err(ProbeError::Io(io::Error::new(
                io::ErrorKind::Other,
                "cannot read mount table",
            ))),
        }
    }

    fn partition_usage(&self, partition: &Partition) -> Result<PartitionUsage, ProbeError> {
        if let Some(fault) = self.usage_faults.get(&partition.mountpoint) {
            return Err(match fault {
                UsageFault::PermissionDenied => ProbeError::from_io(io::Error::from(
                    io::ErrorKind::PermissionDenied,
                )),
                UsageFault::Io(kind) => {
                    ProbeError::Io(io::Error::new(*kind, "stale file handle"))
                }
            });
        }
        self.partitions
            .as_ref()
            .and_then(|list| list.iter().find(|(p, _)| p.mountpoint == partition.mountpoint))
            .map(|(_, usage)| *usage)
            .ok_or_else(|| ProbeError::Io(io::Error::from(io::ErrorKind::NotFound)))
    }

    fn process_ids(&mut self) -> Vec<u32> {
        let mut pids: Vec<u32> = self.processes.keys().copied().collect();
        pids.extend(self.process_faults.keys().copied());
        pids.sort_unstable();
        pids.dedup();
        pids
    }

    fn process_detail(&mut self, pid: u32) -> Result<ProcessDetail, ProbeError> {
        if let Some(fault) = self.process_faults.get(&pid) {
            return Err(match fault {
                ProcessFault::Vanished => ProbeError::NoSuchProcess(pid),
                ProcessFault::AccessDenied => ProbeError::PermissionDenied,
                ProcessFault::Zombie => ProbeError::Zombie(pid),
                ProcessFault::Io(kind) => {
                    ProbeError::Io(io::Error::new(*kind, "malformed stat file"))
                }
            });
        }
        self.processes
            .get(&pid)
            .cloned()
            .ok_or(ProbeError::NoSuchProcess(pid))
    }
}
