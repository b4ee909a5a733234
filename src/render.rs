use crate::config::Config;
use crate::report::{DiskEntry, HostReport, NOT_APPLICABLE};
use std::borrow::Cow;
use std::io::{self, Write};

const BANNER_WIDTH: usize = 40;
const DISK_RULE_WIDTH: usize = 95;
const PROCESS_RULE_WIDTH: usize = 80;
const ELLIPSIS: &str = "...";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn render_report<W: Write>(report: &HostReport, cfg: &Config, out: &mut W) -> io::Result<()> {
    let banner = "=".repeat(BANNER_WIDTH);

    writeln!(out, "{banner}")?;
    writeln!(
        out,
        "{} - {}",
        cfg.title,
        report.generated_at.format(TIMESTAMP_FORMAT)
    )?;
    writeln!(out, "{banner}")?;

    section(out, "Basic Info")?;
    writeln!(out, "Hostname: {}", report.identity.hostname)?;
    writeln!(out, "IP Addresses: {}", report.identity.ip_addresses.join(", "))?;

    section(out, "CPU Info")?;
    writeln!(out, "CPU Usage: {:.1}%", report.cpu_usage_percent)?;

    section(out, "Memory Info")?;
    let mem = &report.memory;
    writeln!(out, "  Total: {} GB", mem.total_gb)?;
    writeln!(out, "  Used: {} GB", mem.used_gb)?;
    writeln!(out, "  Available: {} GB", mem.available_gb)?;
    writeln!(out, "  Usage Rate: {}", format_percent(mem.percent))?;

    section(out, "Disk Usage")?;
    render_disks(report, out)?;

    section(out, "Running Processes")?;
    render_processes(report, cfg.max_path_chars, out)?;

    writeln!(out)?;
    writeln!(out, "{banner}")?;
    writeln!(out, "Inspection complete.")?;
    writeln!(out, "{banner}")?;
    Ok(())
}

fn section<W: Write>(out: &mut W, name: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "--- [{name}] ---")
}

fn render_disks<W: Write>(report: &HostReport, out: &mut W) -> io::Result<()> {
    if report.disks.is_empty() {
        return writeln!(out, "No disk information available.");
    }

    writeln!(
        out,
        "{:<25} {:<15} {:<15} {:<15} {:<15} {}",
        "Mount Point", "FS Type", "Total (GB)", "Used (GB)", "Free (GB)", "Use %"
    )?;
    writeln!(out, "{}", "-".repeat(DISK_RULE_WIDTH))?;

    for disk in &report.disks {
        match disk {
            DiskEntry::Mounted {
                mountpoint,
                fstype,
                total_gb,
                used_gb,
                free_gb,
                percent,
            } => writeln!(
                out,
                "{:<25} {:<15} {:<15} {:<15} {:<15} {:.1}%",
                mountpoint, fstype, total_gb, used_gb, free_gb, percent
            )?,
            DiskEntry::Unreadable { mountpoint, error } => writeln!(
                out,
                "{:<25} {:<15} {:<15} {:<15} {:<15} {}",
                mountpoint, NOT_APPLICABLE, NOT_APPLICABLE, NOT_APPLICABLE, NOT_APPLICABLE, error
            )?,
        }
    }
    Ok(())
}

fn render_processes<W: Write>(
    report: &HostReport,
    max_path_chars: usize,
    out: &mut W,
) -> io::Result<()> {
    if report.processes.is_empty() {
        return writeln!(out, "No process information available.");
    }

    writeln!(out, "{:<10} {:<30} {}", "PID", "Name", "Path/Command")?;
    writeln!(out, "{}", "-".repeat(PROCESS_RULE_WIDTH))?;
    for proc in &report.processes {
        writeln!(
            out,
            "{:<10} {:<30} {}",
            proc.pid,
            proc.name,
            truncate_path(&proc.path, max_path_chars)
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Total Processes: {}", report.processes.len())
}

fn format_percent(percent: Option<f64>) -> String {
    match percent {
        Some(p) => format!("{p:.1}%"),
        None => NOT_APPLICABLE.to_string(),
    }
}

// Counts chars, not bytes.
pub fn truncate_path(path: &str, max_chars: usize) -> Cow<'_, str> {
    if path.chars().count() <= max_chars {
        return Cow::Borrowed(path);
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut cut: String = path.chars().take(keep).collect();
    cut.push_str(ELLIPSIS);
    Cow::Owned(cut)
}
