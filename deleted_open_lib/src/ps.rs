use std::process::Command;

use eyre::{Result, eyre};

/// Fields requested from ps: identity, ownership, runtime and resource use.
const PS_FIELDS: &str = "pid,ppid,user,etime,%cpu,%mem,args";

/// Asks `ps` about a single pid. Returns its raw output, a header line
/// followed by one data line. Fails when the process no longer exists or
/// ps itself cannot run; callers recover per record.
pub fn query_process(pid: &str) -> Result<String> {
    let output = Command::new("ps")
        .args(["-p", pid, "-o", PS_FIELDS])
        .output()
        .map_err(|e| eyre!("failed to run ps for pid {pid}: {e}"))?;
    if !output.status.success() {
        return Err(eyre!("no process with pid {pid}"));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
