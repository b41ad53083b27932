//! Optional external cleanup stage.
//!
//! When the user points at a cleanup Perl script, the pipeline's output is
//! run through it (`perl script -w -o -s input output`) and the intermediate
//! files it leaves behind are removed.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{AxError, Result};

/// Wrapper around a user-supplied cleanup script invoked via `perl`.
#[derive(Debug, Clone)]
pub struct CleanupTool {
    script: PathBuf,
}

impl CleanupTool {
    pub fn new(script: PathBuf) -> CleanupTool {
        CleanupTool { script }
    }

    /// Run the script over `input`, writing its result to `output`.
    pub fn run(&self, input: &Path, output: &Path) -> Result<()> {
        let status = Command::new("perl")
            .arg(&self.script)
            .args(["-w", "-o", "-s"])
            .arg(input)
            .arg(output)
            .status()
            .map_err(|e| AxError::Cleanup {
                message: format!("Failed to launch perl: {e}"),
                help: Some("Check that perl is installed and on PATH".to_string()),
            })?;
        if !status.success() {
            return Err(AxError::Cleanup {
                message: format!(
                    "Cleanup script {} exited with {status}",
                    self.script.display()
                ),
                help: Some("Re-run the script by hand to see its diagnostics".to_string()),
            });
        }
        Ok(())
    }
}

/// Remove an intermediate file and the `.bak` companion the cleanup script
/// leaves next to it. A missing `.bak` is not an error.
pub fn remove_intermediate(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| AxError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to remove intermediate file: {e}"),
    })?;

    let mut bak = path.as_os_str().to_os_string();
    bak.push(".bak");
    let bak = PathBuf::from(bak);
    match fs::remove_file(&bak) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(AxError::Io {
            path: bak,
            message: format!("Failed to remove backup file: {e}"),
        }),
    }
}
