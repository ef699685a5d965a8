// ABOUTME: Session context passed to every action handler
// Bundles config, the host boundary, the status sink and the resource queues

pub mod resources;
pub mod status;

pub use resources::{Resource, ResourceQueues};
pub use status::{StatusLevel, StatusLine, StatusLog, StatusSink, WorkerEvent};

use crate::actions::ActionError;
use crate::config::AppConfig;
use crate::host::{CommandOutput, CommandSpec, Host};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct SessionContext {
    pub config: Arc<AppConfig>,
    pub host: Arc<dyn Host>,
    pub sink: StatusSink,
    pub queues: Arc<ResourceQueues>,
}

impl SessionContext {
    pub fn new(config: AppConfig, host: Arc<dyn Host>, sink: StatusSink) -> Self {
        Self {
            config: Arc::new(config),
            host,
            sink,
            queues: Arc::new(ResourceQueues::new()),
        }
    }

    /// Echo the command, run it and append whatever it printed.
    ///
    /// Only a spawn failure is an error here; callers decide what a nonzero exit means.
    pub async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ActionError> {
        self.sink.command(spec.to_string());
        self.run_quiet(spec).await
    }

    /// Like [`run`](Self::run) but without echoing the command line.
    pub async fn run_quiet(&self, spec: &CommandSpec) -> Result<CommandOutput, ActionError> {
        match self.host.run(spec).await {
            Ok(output) => {
                let text = output.combined();
                if !text.is_empty() {
                    self.sink.output(text);
                }
                Ok(output)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Run and turn a nonzero exit into [`ActionError::CommandFailed`].
    pub async fn run_checked(&self, spec: &CommandSpec) -> Result<CommandOutput, ActionError> {
        let output = self.run(spec).await?;
        if output.is_success() {
            Ok(output)
        } else {
            Err(ActionError::CommandFailed {
                command: spec.to_string(),
                code: output.code,
            })
        }
    }

    pub fn is_installed(&self, binary: &str) -> bool {
        self.host.is_installed(binary)
    }

    pub async fn settle(&self) {
        self.pause(self.config.settle_delay()).await;
    }

    pub async fn pause(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
