use crate::collectors::HostProbe;
use crate::report::{HostIdentity, IP_LOOKUP_FAILED};
use std::collections::BTreeSet;
use std::net::IpAddr;
use tracing::error;

const UNKNOWN_HOST: &str = "unknown";

pub fn collect_identity<P: HostProbe>(
    probe: &mut P,
    loopback_interfaces: &[String],
) -> HostIdentity {
    let hostname = probe
        .host_name()
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| UNKNOWN_HOST.to_string());

    let ip_addresses = match probe.interfaces() {
        Ok(interfaces) => {
            // BTreeSet gives dedup + ascending order in one pass.
            let unique: BTreeSet<String> = interfaces
                .iter()
                .filter(|i| !loopback_interfaces.iter().any(|lo| lo == &i.name))
                .flat_map(|i| i.addrs.iter())
                .filter_map(|addr| match addr {
                    IpAddr::V4(v4) if !v4.is_loopback() => Some(v4.to_string()),
                    _ => None,
                })
                .collect();
            unique.into_iter().collect()
        }
        Err(err) => {
            error!(error = %err, "failed to enumerate network interfaces");
            vec![IP_LOOKUP_FAILED.to_string()]
        }
    };

    HostIdentity {
        hostname,
        ip_addresses,
    }
}
