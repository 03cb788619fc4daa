use clap::{ArgAction, Parser};
use deleted_open_lib::{lsof, ps, report, size};
use eyre::Result;

use std::{io, path::PathBuf};

/// List deleted-but-open files under a path, sorted by size.
/// Finds disk space held by files that were unlinked while some process
/// still keeps them open, the classic "df says full, du disagrees" case.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory or mount point to scan
    #[arg(default_value = ".", value_parser = clap::value_parser!(PathBuf))]
    path: PathBuf,

    /// Minimum file size to report (e.g. 100M, 2T)
    #[arg(long, default_value = "500G")]
    minsize: String,

    /// Show process details for each match
    #[arg(long, action = ArgAction::SetTrue, default_value_t = false)]
    process: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    #[cfg(unix)]
    if unsafe { libc::geteuid() } != 0 {
        eprintln!("Warning: not running as root; lsof may not list all files.");
    }

    let min_bytes = size::parse_size(&args.minsize)?;
    let raw = lsof::run_lsof(&args.path)?;
    let mut entries = lsof::parse_listing(&raw, min_bytes);

    if entries.is_empty() {
        eprintln!(
            "No deleted-but-open files >= {} found under '{}'.",
            args.minsize,
            args.path.display()
        );
        return Ok(());
    }

    report::sort_by_size(&mut entries);

    let ps_source = |pid: &str| ps::query_process(pid);
    let detail: Option<&dyn report::ProcessInfoSource> =
        if args.process { Some(&ps_source) } else { None };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_report(&mut out, &entries, detail)?;
    Ok(())
}
