use crate::collectors::{
    HostProbe, InterfaceAddrs, MemoryReading, Partition, PartitionUsage, ProbeError,
    ProcessDetail,
};
use std::time::Duration;
use sysinfo::{
    Disks, Networks, Pid, ProcessRefreshKind, ProcessStatus, ProcessesToUpdate, System,
    ThreadKind, UpdateKind, MINIMUM_CPU_UPDATE_INTERVAL,
};
use tracing::debug;

pub struct SysinfoProbe {
    system: System,
    disks: Disks,
}

impl SysinfoProbe {
    pub fn new() -> Self {
        Self {
            system: System::new(),
            disks: Disks::new(),
        }
    }
}

impl Default for SysinfoProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl HostProbe for SysinfoProbe {
    fn host_name(&self) -> Option<String> {
        System::host_name()
    }

    fn interfaces(&mut self) -> Result<Vec<InterfaceAddrs>, ProbeError> {
        let networks = Networks::new_with_refreshed_list();
        let interfaces: Vec<InterfaceAddrs> = networks
            .list()
            .iter()
            .map(|(name, data)| InterfaceAddrs {
                name: name.to_string(),
                addrs: data.ip_networks().iter().map(|n| n.addr).collect(),
            })
            .collect();
        debug!(interfaces = interfaces.len(), "network interfaces enumerated");
        Ok(interfaces)
    }

    fn cpu_usage(&mut self, window: Duration) -> f64 {
        self.system.refresh_cpu_usage();
        std::thread::sleep(window.max(MINIMUM_CPU_UPDATE_INTERVAL));
        self.system.refresh_cpu_usage();
        self.system.global_cpu_usage() as f64
    }

    fn memory(&mut self) -> MemoryReading {
        self.system.refresh_memory();
        let total = self.system.total_memory();
        if total == 0 {
            debug!("memory totals unavailable");
            return MemoryReading::default();
        }
        MemoryReading {
            total_bytes: Some(total),
            used_bytes: Some(self.system.used_memory()),
            available_bytes: Some(self.system.available_memory()),
        }
    }

    fn partitions(&mut self) -> Result<Vec<Partition>, ProbeError> {
        self.disks = Disks::new_with_refreshed_list();
        Ok(self
            .disks
            .list()
            .iter()
            .map(|d| Partition {
                mountpoint: d.mount_point().to_path_buf(),
                fstype: d.file_system().to_string_lossy().to_string(),
            })
            .collect())
    }

    #[cfg(unix)]
    fn partition_usage(&self, partition: &Partition) -> Result<PartitionUsage, ProbeError> {
        statvfs_usage(&partition.mountpoint)
    }

    #[cfg(not(unix))]
    fn partition_usage(&self, partition: &Partition) -> Result<PartitionUsage, ProbeError> {
        let disk = self
            .disks
            .list()
            .iter()
            .find(|d| d.mount_point() == partition.mountpoint)
            .ok_or_else(|| {
                ProbeError::Unavailable(format!(
                    "no usage data for {}",
                    partition.mountpoint.display()
                ))
            })?;
        let total = disk.total_space();
        let free = disk.available_space();
        let used = total.saturating_sub(free);
        Ok(PartitionUsage {
            total_bytes: total,
            used_bytes: used,
            free_bytes: free,
            percent: crate::report::usage_percent(used, total),
        })
    }

    fn process_ids(&mut self) -> Vec<u32> {
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing(),
        );
        let mut pids: Vec<u32> = self
            .system
            .processes()
            .iter()
            // Linux also lists userland threads as tasks; kernel threads stay.
            .filter(|(_, p)| !matches!(p.thread_kind(), Some(ThreadKind::Userland)))
            .map(|(pid, _)| pid.as_u32())
            .collect();
        pids.sort_unstable();
        pids
    }

    fn process_detail(&mut self, pid: u32) -> Result<ProcessDetail, ProbeError> {
        let sys_pid = Pid::from_u32(pid);
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[sys_pid]),
            true,
            ProcessRefreshKind::nothing()
                .with_exe(UpdateKind::Always)
                .with_cmd(UpdateKind::Always),
        );

        let process = self
            .system
            .process(sys_pid)
            .ok_or(ProbeError::NoSuchProcess(pid))?;
        if matches!(process.status(), ProcessStatus::Zombie | ProcessStatus::Dead) {
            return Err(ProbeError::Zombie(pid));
        }

        Ok(ProcessDetail {
            pid,
            name: process.name().to_string_lossy().to_string(),
            exe: process.exe().map(|p| p.to_string_lossy().to_string()),
            cmdline: process
                .cmd()
                .iter()
                .map(|a| a.to_string_lossy().to_string())
                .collect(),
        })
    }
}

#[cfg(unix)]
fn statvfs_usage(path: &std::path::Path) -> Result<PartitionUsage, ProbeError> {
    use nix::sys::statvfs::statvfs;

    let stats = statvfs(path).map_err(error_from_errno)?;

    let frsize = stats.fragment_size() as u64;
    let blocks = stats.blocks() as u64;
    let total = blocks.saturating_mul(frsize);
    let free = (stats.blocks_available() as u64).saturating_mul(frsize);
    let used = blocks
        .saturating_sub(stats.blocks_free() as u64)
        .saturating_mul(frsize);

    Ok(PartitionUsage {
        total_bytes: total,
        used_bytes: used,
        free_bytes: free,
        // Non-root reserved blocks are excluded, matching what `df` shows.
        percent: crate::report::usage_percent(used, used + free),
    })
}

#[cfg(unix)]
fn error_from_errno(errno: nix::errno::Errno) -> ProbeError {
    use nix::errno::Errno;

    match errno {
        Errno::EACCES | Errno::EPERM => ProbeError::PermissionDenied,
        other => ProbeError::Io(std::io::Error::from(other)),
    }
}
