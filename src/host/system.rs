// ABOUTME: Host implementation backed by real processes and the real PATH
// Spawns commands through tokio::process and resolves binaries with `which`

use super::{CommandOutput, CommandSpec, Host, HostError};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl SystemHost {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Host for SystemHost {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, HostError> {
        debug!("Running {}", spec);

        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(if spec.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            });
        if let Some(dir) = &spec.current_dir {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|source| HostError::SpawnFailed {
            program: spec.program.clone(),
            source,
        })?;

        if let Some(input) = &spec.stdin {
            if let Some(mut stdin) = child.stdin.take() {
                stdin
                    .write_all(input.as_bytes())
                    .await
                    .map_err(|source| HostError::StdinFailed {
                        program: spec.program.clone(),
                        source,
                    })?;
                // Dropping closes the pipe so the child sees EOF.
                drop(stdin);
            }
        }

        let output = child.wait_with_output().await?;
        debug!("{} exited with {:?}", spec.program, output.status.code());

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    fn is_installed(&self, binary: &str) -> bool {
        which::which(binary).is_ok()
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
