use std::io::ErrorKind;
use std::path::PathBuf;
use anyhow::{Result, anyhow};
use log::debug;
use tokio::process::Command;
use crate::nmap::{parser, HostResult, Scanner};

/// 通过子进程调用 nmap
#[derive(Debug, Clone)]
pub struct NmapRunner {
    binary: PathBuf,
}

impl NmapRunner {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        NmapRunner { binary: binary.into() }
    }
}

impl Default for NmapRunner {
    fn default() -> Self {
        NmapRunner::new("nmap")
    }
}

impl Scanner for NmapRunner {
    async fn run(&self, args: &[String]) -> Result<Vec<HostResult>> {
        debug!("Running {} {}", self.binary.display(), args.join(" "));

        let output = match Command::new(&self.binary).args(args).output().await {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(anyhow!("nmap binary not found: {}", self.binary.display()));
            }
            Err(e) => {
                return Err(anyhow!("Failed to execute {}: {}", self.binary.display(), e));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "nmap exited with {}: {}",
                output.status,
                stderr.trim()
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let hosts = parser::parse_normal_output(&stdout);
        debug!("nmap reported {} hosts", hosts.len());

        Ok(hosts)
    }
}
