// ABOUTME: Append-only status log and the sink workers use to post lines to it
// Workers never touch the log directly; lines travel over a channel to the foreground loop

use crate::actions::Action;
use crate::tools::ToolAvailability;
use chrono::{DateTime, Local};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
    /// Echo of a command about to run.
    Command,
    /// Captured stdout/stderr of a command.
    Output,
}

impl StatusLevel {
    pub fn prefix(&self) -> &'static str {
        match self {
            StatusLevel::Info | StatusLevel::Output => "",
            StatusLevel::Success => "✓ ",
            StatusLevel::Warning => "[Warning] ",
            StatusLevel::Error => "[Error] ",
            StatusLevel::Command => "$ ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub timestamp: DateTime<Local>,
    pub level: StatusLevel,
    pub text: String,
}

impl StatusLine {
    pub fn new(level: StatusLevel, text: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            level,
            text: text.into(),
        }
    }

    /// Text as shown in the status pane, level prefix included.
    pub fn display_text(&self) -> String {
        format!("{}{}", self.level.prefix(), self.text)
    }
}

/// Ordered, append-only record of everything reported during the process lifetime.
#[derive(Debug, Default, Clone)]
pub struct StatusLog {
    lines: Vec<StatusLine>,
}

impl StatusLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: StatusLine) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[StatusLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn last(&self) -> Option<&StatusLine> {
        self.lines.last()
    }
}

/// Messages from background workers to the foreground loop.
#[derive(Debug, Clone)]
pub enum WorkerEvent {
    Status(StatusLine),
    Started(Action),
    Finished(Action),
    Availability(ToolAvailability),
    /// Required packages are missing; the foreground should ask before installing them.
    ConfirmInstall(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct StatusSink {
    tx: mpsc::UnboundedSender<WorkerEvent>,
}

impl StatusSink {
    pub fn new(tx: mpsc::UnboundedSender<WorkerEvent>) -> Self {
        Self { tx }
    }

    pub fn channel() -> (Self, mpsc::UnboundedReceiver<WorkerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    pub fn line(&self, level: StatusLevel, text: impl Into<String>) {
        let line = StatusLine::new(level, text);
        match level {
            StatusLevel::Error => error!("{}", line.text),
            StatusLevel::Warning => warn!("{}", line.text),
            StatusLevel::Output => debug!("{}", line.text),
            StatusLevel::Info | StatusLevel::Success | StatusLevel::Command => {
                info!("{}", line.display_text())
            }
        }
        self.send(WorkerEvent::Status(line));
    }

    pub fn info(&self, text: impl Into<String>) {
        self.line(StatusLevel::Info, text);
    }

    pub fn success(&self, text: impl Into<String>) {
        self.line(StatusLevel::Success, text);
    }

    pub fn warn(&self, text: impl Into<String>) {
        self.line(StatusLevel::Warning, text);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.line(StatusLevel::Error, text);
    }

    pub fn command(&self, text: impl Into<String>) {
        self.line(StatusLevel::Command, text);
    }

    pub fn output(&self, text: impl Into<String>) {
        self.line(StatusLevel::Output, text);
    }

    pub fn started(&self, action: Action) {
        self.send(WorkerEvent::Started(action));
    }

    pub fn finished(&self, action: Action) {
        self.send(WorkerEvent::Finished(action));
    }

    pub fn availability(&self, availability: ToolAvailability) {
        self.send(WorkerEvent::Availability(availability));
    }

    pub fn confirm_install(&self, packages: Vec<String>) {
        self.send(WorkerEvent::ConfirmInstall(packages));
    }

    fn send(&self, event: WorkerEvent) {
        // The receiver only goes away when the UI has shut down; nothing left to report to.
        let _ = self.tx.send(event);
    }
}
