use crate::collectors::{HostProbe, ProbeError};
use crate::report::{bytes_to_gb, DiskEntry, PERMISSION_DENIED};
use tracing::{error, warn};

pub fn collect_disks<P: HostProbe>(probe: &mut P) -> Vec<DiskEntry> {
    let partitions = match probe.partitions() {
        Ok(list) => list,
        Err(err) => {
            error!(error = %err, "failed to list disk partitions");
            return Vec::new();
        }
    };

    partitions
        .iter()
        .map(|partition| {
            let mountpoint = partition.mountpoint.to_string_lossy().to_string();
            match probe.partition_usage(partition) {
                Ok(usage) => DiskEntry::Mounted {
                    mountpoint,
                    fstype: partition.fstype.clone(),
                    total_gb: bytes_to_gb(Some(usage.total_bytes)),
                    used_gb: bytes_to_gb(Some(usage.used_bytes)),
                    free_gb: bytes_to_gb(Some(usage.free_bytes)),
                    percent: usage.percent,
                },
                Err(ProbeError::PermissionDenied) => {
                    warn!(mountpoint = %mountpoint, "permission denied reading disk usage");
                    DiskEntry::Unreadable {
                        mountpoint,
                        error: PERMISSION_DENIED.to_string(),
                    }
                }
                Err(err) => {
                    warn!(mountpoint = %mountpoint, error = %err, "failed to read disk usage");
                    DiskEntry::Unreadable {
                        mountpoint,
                        error: err.to_string(),
                    }
                }
            }
        })
        .collect()
}
