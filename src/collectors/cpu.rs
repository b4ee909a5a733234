use crate::collectors::{HostProbe, CPU_SAMPLE_WINDOW};
use crate::report::round_to;

pub fn collect_cpu<P: HostProbe>(probe: &mut P) -> f64 {
    let raw = probe.cpu_usage(CPU_SAMPLE_WINDOW);
    if !raw.is_finite() {
        return 0.0;
    }
    round_to(raw.clamp(0.0, 100.0), 1)
}
