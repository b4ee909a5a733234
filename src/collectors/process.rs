use crate::collectors::{HostProbe, ProbeError, ProcessDetail};
use crate::report::ProcessEntry;
use std::path::Path;
use tracing::warn;

pub fn collect_processes<P: HostProbe>(probe: &mut P) -> Vec<ProcessEntry> {
    let pids = probe.process_ids();
    let mut out = Vec::with_capacity(pids.len());

    for pid in pids {
        match probe.process_detail(pid) {
            Ok(detail) => out.push(to_entry(detail)),
            // Lifecycle races are expected while walking the table.
            Err(ProbeError::NoSuchProcess(_))
            | Err(ProbeError::PermissionDenied)
            | Err(ProbeError::Zombie(_)) => {}
            Err(err) => {
                warn!(pid, error = %err, "failed to read process");
            }
        }
    }

    out
}

fn to_entry(detail: ProcessDetail) -> ProcessEntry {
    let path = resolve_path(&detail.name, detail.exe.as_deref(), &detail.cmdline);
    ProcessEntry {
        pid: detail.pid,
        name: detail.name,
        path,
    }
}

pub fn inaccessible_marker(name: &str) -> String {
    format!("[inaccessible or kernel thread: {name}]")
}

enum Resolved<'a> {
    Exe(&'a str),
    Command(String),
}

// Executable path, else joined command line, else the inaccessible marker.
// An absolute first argument replaces anything that is not an absolute
// executable path; a first argument that only looks like a path wins too.
pub fn resolve_path(name: &str, exe: Option<&str>, cmdline: &[String]) -> String {
    let resolved = match exe.filter(|e| !e.trim().is_empty()) {
        Some(exe) => Resolved::Exe(exe),
        None => Resolved::Command(cmdline.join(" ")),
    };

    let needs_repair = match &resolved {
        Resolved::Exe(exe) => !Path::new(exe).is_absolute(),
        Resolved::Command(cmd) => {
            if cmd.trim().is_empty() {
                return inaccessible_marker(name);
            }
            true
        }
    };

    if needs_repair {
        if let Some(first) = cmdline.first().filter(|a| Path::new(a.as_str()).is_absolute()) {
            return first.clone();
        }
    }

    match resolved {
        Resolved::Exe(exe) => exe.to_string(),
        Resolved::Command(cmd) => cmd,
    }
}
