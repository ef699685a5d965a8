// ABOUTME: Runs start, stop and check without the TUI and prints the status log as it arrives
// Install confirmation is answered by the --install flag instead of a dialog

use crate::actions::{self, Action, Job};
use crate::config::AppConfig;
use crate::host::Host;
use crate::session::{SessionContext, StatusLevel, StatusLine, StatusSink, WorkerEvent};
use std::io::Write;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadlessCommand {
    Start,
    Stop,
    Check { install: bool },
}

impl HeadlessCommand {
    pub fn action(&self) -> Action {
        match self {
            HeadlessCommand::Start => Action::StartFullAnonymous,
            HeadlessCommand::Stop => Action::StopAll,
            HeadlessCommand::Check { .. } => Action::CheckTools,
        }
    }
}

#[derive(Debug, Default)]
pub struct HeadlessSummary {
    pub lines: Vec<StatusLine>,
    pub installs_started: usize,
}

impl HeadlessSummary {
    pub fn errors(&self) -> usize {
        self.lines
            .iter()
            .filter(|line| line.level == StatusLevel::Error)
            .count()
    }
}

pub fn format_line(line: &StatusLine) -> String {
    format!("[{}] {}", line.timestamp.format("%H:%M:%S"), line.display_text())
}

/// Run one command to completion, writing every status line to `out`.
pub async fn run<W: Write>(
    command: HeadlessCommand,
    config: AppConfig,
    host: Arc<dyn Host>,
    mut out: W,
) -> anyhow::Result<HeadlessSummary> {
    let (sink, mut events) = StatusSink::channel();
    let ctx = SessionContext::new(config, host, sink);
    let mut summary = HeadlessSummary::default();

    info!("Headless run of {}", command.action());
    actions::spawn(Job::Action(command.action()), ctx.clone());
    let mut in_flight = 1usize;

    while in_flight > 0 {
        let Some(event) = events.recv().await else {
            break;
        };

        match event {
            WorkerEvent::Status(line) => {
                writeln!(out, "{}", format_line(&line))?;
                summary.lines.push(line);
            }
            WorkerEvent::Finished(_) => in_flight -= 1,
            WorkerEvent::ConfirmInstall(packages) => {
                let install = matches!(command, HeadlessCommand::Check { install: true });
                if install && summary.installs_started == 0 {
                    summary.installs_started += 1;
                    in_flight += 1;
                    actions::spawn(Job::InstallPackages(packages), ctx.clone());
                } else {
                    let line = StatusLine::new(
                        StatusLevel::Info,
                        format!(
                            "Not installing {}. Re-run `anonmode check --install` as root to install.",
                            packages.join(", ")
                        ),
                    );
                    writeln!(out, "{}", format_line(&line))?;
                    summary.lines.push(line);
                }
            }
            WorkerEvent::Started(_) | WorkerEvent::Availability(_) => {}
        }
    }

    out.flush()?;
    Ok(summary)
}
