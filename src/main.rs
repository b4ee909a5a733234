mod collectors;
mod config;
mod render;
mod report;

use clap::Parser;
use collectors::collect_report;
use collectors::system::SysinfoProbe;
use config::Config;
use std::io::Write;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hostcheck")]
#[command(version, about = "Prints a one-shot inspection report of the local host")]
struct Cli {
    #[arg(long)]
    config: Option<String>,
    #[arg(long)]
    print_default_config: bool,
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    if cli.print_default_config {
        print!("{}", Config::example_yaml());
        return;
    }

    let cfg = match cli.config.as_deref() {
        Some(path) => match Config::load_from_file(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                error!(error = %err, "failed to load configuration");
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    let mut probe = SysinfoProbe::new();
    let report = collect_report(&mut probe, &cfg);
    debug!(
        disks = report.disks.len(),
        processes = report.processes.len(),
        "host report collected"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = render_and_flush(&report, &cfg, &mut out) {
        error!(error = %err, "failed to write report");
    }
}

fn render_and_flush<W: Write>(
    report: &report::HostReport,
    cfg: &Config,
    out: &mut W,
) -> std::io::Result<()> {
    render::render_report(report, cfg, out)?;
    out.flush()
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
