// ABOUTME: Shared test helpers: a recording fake host and a fast test configuration
#![allow(dead_code)]

use anonmode::config::AppConfig;
use anonmode::host::{CommandOutput, CommandSpec, Host, HostError};
use anonmode::session::{SessionContext, StatusLevel, StatusLine, StatusSink, WorkerEvent};
use async_trait::async_trait;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Host that records every command and answers from canned responses.
///
/// Responses match on the start of the rendered command line. Anything without
/// a response exits 0 with empty output.
#[derive(Default)]
pub struct FakeHost {
    installed: Vec<String>,
    responses: Vec<(String, CommandOutput)>,
    unspawnable: Vec<String>,
    calls: Mutex<Vec<CommandSpec>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_installed(mut self, binaries: &[&str]) -> Self {
        self.installed
            .extend(binaries.iter().map(|b| b.to_string()));
        self
    }

    pub fn respond(mut self, prefix: &str, output: CommandOutput) -> Self {
        self.responses.push((prefix.to_string(), output));
        self
    }

    pub fn fail(self, prefix: &str) -> Self {
        self.respond(prefix, CommandOutput::with_code(1))
    }

    pub fn unspawnable(mut self, program: &str) -> Self {
        self.unspawnable.push(program.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.specs().iter().map(ToString::to_string).collect()
    }

    pub fn specs(&self) -> Vec<CommandSpec> {
        self.calls.lock().unwrap().clone()
    }

    pub fn ran(&self, prefix: &str) -> bool {
        self.calls().iter().any(|call| call.starts_with(prefix))
    }
}

#[async_trait]
impl Host for FakeHost {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, HostError> {
        let line = spec.to_string();
        self.calls.lock().unwrap().push(spec.clone());

        if self.unspawnable.contains(&spec.program) {
            return Err(HostError::SpawnFailed {
                program: spec.program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
            });
        }

        Ok(self
            .responses
            .iter()
            .find(|(prefix, _)| line.starts_with(prefix.as_str()))
            .map(|(_, output)| output.clone())
            .unwrap_or_else(CommandOutput::success))
    }

    fn is_installed(&self, binary: &str) -> bool {
        self.installed.iter().any(|b| b == binary)
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

pub const IP_LINK_JSON: &str =
    r#"[{"ifindex":2,"ifname":"eth0","link_type":"ether","address":"3e:a1:9c:00:4b:12"}]"#;

pub const STOCK_PROXYCHAINS: &str = "\
# proxychains.conf
strict_chain
#dynamic_chain
proxy_dns

[ProxyList]
socks4 127.0.0.1 9050
";

/// Config with no delays, proxychains pointed into `dir`, and nothing found on disk by default.
pub fn test_config(dir: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.settle_delay_ms = 0;
    config.install_recheck_delay_ms = 0;
    config.proxychains.config_paths = vec![dir.join("proxychains4.conf")];
    config.anonsurf.fallback_paths = Vec::new();
    config.anonsurf.install_dir = dir.join("kali-anonsurf");
    config.history_paths = Vec::new();
    config
}

pub fn write_proxychains(dir: &Path) {
    std::fs::write(dir.join("proxychains4.conf"), STOCK_PROXYCHAINS).unwrap();
}

pub fn context(
    config: AppConfig,
    host: Arc<FakeHost>,
) -> (SessionContext, mpsc::UnboundedReceiver<WorkerEvent>) {
    let (sink, rx) = StatusSink::channel();
    (SessionContext::new(config, host, sink), rx)
}

pub fn drain(rx: &mut mpsc::UnboundedReceiver<WorkerEvent>) -> Vec<WorkerEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

pub fn status_lines(events: &[WorkerEvent]) -> Vec<StatusLine> {
    events
        .iter()
        .filter_map(|event| match event {
            WorkerEvent::Status(line) => Some(line.clone()),
            _ => None,
        })
        .collect()
}

pub fn has_line(lines: &[StatusLine], level: StatusLevel, needle: &str) -> bool {
    lines
        .iter()
        .any(|line| line.level == level && line.text.contains(needle))
}
