//! Running build tool subprocesses

use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use quayside_core::error::{AdapterError, Result};

/// Pick the wrapper script if the project ships one, otherwise the tool on PATH
pub fn wrapper_or(path: &Path, wrapper: &'static str, tool: &'static str) -> &'static str {
    let unix = path.join(wrapper);
    let windows = path.join(format!("{}.bat", wrapper));
    let windows_cmd = path.join(format!("{}.cmd", wrapper));

    if unix.exists() || windows.exists() || windows_cmd.exists() {
        match wrapper {
            "gradlew" => "./gradlew",
            "mvnw" => "./mvnw",
            _ => tool,
        }
    } else {
        tool
    }
}

/// Run `program args...` in `path`, failing with the tool's output on a non-zero exit
pub fn run(path: &Path, program: &str, args: &[String]) -> Result<()> {
    let rendered = format!("{} {}", program, args.join(" "));
    info!(command = %rendered, cwd = %path.display(), "running build tool");

    let output = Command::new(program)
        .args(args)
        .current_dir(path)
        .output()
        .map_err(|e| AdapterError::CommandFailed {
            command: rendered.clone(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        return Err(AdapterError::CommandFailed {
            command: rendered,
            reason: format!("{}\n{}", stdout.trim_end(), stderr.trim_end()),
        }
        .into());
    }

    debug!(command = %rendered, "build tool finished");
    Ok(())
}
