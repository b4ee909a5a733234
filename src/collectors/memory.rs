use crate::collectors::HostProbe;
use crate::report::{bytes_to_gb, usage_percent, MemorySnapshot};

pub fn collect_memory<P: HostProbe>(probe: &mut P) -> MemorySnapshot {
    let reading = probe.memory();

    let percent = match (reading.total_bytes, reading.available_bytes) {
        (Some(total), Some(available)) if total > 0 => {
            Some(usage_percent(total.saturating_sub(available), total))
        }
        _ => None,
    };

    MemorySnapshot {
        total_gb: bytes_to_gb(reading.total_bytes),
        used_gb: bytes_to_gb(reading.used_bytes),
        available_gb: bytes_to_gb(reading.available_bytes),
        percent,
    }
}
