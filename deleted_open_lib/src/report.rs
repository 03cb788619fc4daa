use std::io::Write;

use eyre::Result;

use crate::{lsof::OpenDeletedFile, size::format_size};

pub const HEADER: [&str; 10] = [
    "SIZE", "COMMAND", "PID", "USER", "FD", "TYPE", "DEVICE", "NLINK", "NODE", "NAME",
];

/// Margin for process-detail lines printed beneath their record.
const DETAIL_INDENT: &str = "    ";

/// Looks up process metadata for a record's pid. Seam over the real ps
/// invocation so rendering is testable without spawning anything.
pub trait ProcessInfoSource {
    fn lookup(&self, pid: &str) -> Result<String>;
}

impl<F> ProcessInfoSource for F
where
    F: Fn(&str) -> Result<String>,
{
    fn lookup(&self, pid: &str) -> Result<String> {
        self(pid)
    }
}

/// Sorts records by size descending. The sort is stable, so equal sizes
/// keep their listing order.
pub fn sort_by_size(entries: &mut [OpenDeletedFile]) {
    entries.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));
}

/// Writes the tab-separated table to `out`, one row per record with SIZE
/// rendered human-readable. When `detail` is given, each row is followed by
/// that record's process info, indented; a failed lookup prints a single
/// placeholder line and never aborts the run.
pub fn write_report<W: Write>(
    out: &mut W,
    entries: &[OpenDeletedFile],
    detail: Option<&dyn ProcessInfoSource>,
) -> Result<()> {
    writeln!(out, "{}", HEADER.join("\t"))?;
    for entry in entries {
        writeln!(
            out,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            format_size(entry.size_bytes),
            entry.command,
            entry.pid,
            entry.user,
            entry.fd,
            entry.file_type,
            entry.device,
            entry.link_count,
            entry.node,
            entry.name,
        )?;
        let Some(source) = detail else {
            continue;
        };
        match source.lookup(&entry.pid) {
            Ok(info) => {
                for line in info.lines() {
                    writeln!(out, "{DETAIL_INDENT}{line}")?;
                }
            }
            Err(_) => {
                writeln!(
                    out,
                    "{DETAIL_INDENT}no process info available for pid {}",
                    entry.pid
                )?;
            }
        }
    }
    Ok(())
}
