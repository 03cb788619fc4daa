use std::{
    path::Path,
    process::{Command, Stdio},
};

use eyre::{Context, Result};

/// Marker lsof appends to the name of an unlinked file.
pub const DELETED_MARKER: &str = "(deleted)";

/// One open file descriptor referencing a fully unlinked file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenDeletedFile {
    pub size_bytes: u64,
    pub command: String,
    pub pid: String,
    pub user: String,
    pub fd: String,
    pub file_type: String,
    pub device: String,
    pub link_count: u64,
    pub node: String,
    pub name: String,
}

/// Runs `lsof +L1` scoped to `path` and returns whatever it wrote to stdout.
///
/// lsof exits non-zero when nothing matched, which is indistinguishable from
/// a real failure without inspecting the output. Captured stdout (even empty)
/// is therefore the data to parse; only failing to spawn lsof is an error.
pub fn run_lsof(path: &Path) -> Result<String> {
    let output = Command::new("lsof")
        .arg("+L1")
        .arg(path)
        .stderr(Stdio::null())
        .output()
        .wrap_err_with(|| format!("failed to run lsof on '{}'", path.display()))?;
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Parses raw lsof output into records, keeping only files with zero links,
/// a deletion marker in the name, and size at or above `min_bytes`.
///
/// lsof emits heterogeneous rows for sockets, pipes and such; anything that
/// does not split into the ten expected fields or whose size/nlink columns
/// are not integers is skipped. Emission order is listing order.
pub fn parse_listing(raw: &str, min_bytes: u64) -> Vec<OpenDeletedFile> {
    let mut entries = Vec::new();
    for line in raw.lines().skip(1) {
        let fields = split_fields(line, 10);
        let &[command, pid, user, fd, file_type, device, size, nlink, node, name] =
            fields.as_slice()
        else {
            continue;
        };
        let (Ok(size_bytes), Ok(link_count)) = (size.parse::<u64>(), nlink.parse::<u64>()) else {
            continue;
        };
        if link_count != 0 || !name.contains(DELETED_MARKER) {
            continue;
        }
        if size_bytes < min_bytes {
            continue;
        }
        entries.push(OpenDeletedFile {
            size_bytes,
            command: command.to_string(),
            pid: pid.to_string(),
            user: user.to_string(),
            fd: fd.to_string(),
            file_type: file_type.to_string(),
            device: device.to_string(),
            link_count,
            node: node.to_string(),
            name: name.to_string(),
        });
    }
    entries
}

/// Splits on runs of whitespace into at most `limit` fields; the final field
/// keeps embedded whitespace, since path names may contain spaces.
fn split_fields(line: &str, limit: usize) -> Vec<&str> {
    let mut fields = Vec::with_capacity(limit);
    let mut rest = line.trim_start();
    while fields.len() + 1 < limit {
        let Some(end) = rest.find(char::is_whitespace) else {
            break;
        };
        fields.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }
    if !rest.is_empty() {
        fields.push(rest);
    }
    fields
}
