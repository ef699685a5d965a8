// ABOUTME: Application state for the action list, status pane and modal dialogs
// Workers report through WorkerEvents; only the foreground loop mutates this state

use crate::actions::{self, Action, Credentials, Job};
use crate::app::notification::Notification;
use crate::config::AppConfig;
use crate::host::Host;
use crate::session::{SessionContext, StatusLevel, StatusLine, StatusLog, StatusSink, WorkerEvent};
use crate::tools::ToolAvailability;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    InstallPackages(Vec<String>),
    ClearHistory,
}

#[derive(Debug, Clone)]
pub struct ConfirmationDialog {
    pub title: String,
    pub message: String,
    pub confirm_action: ConfirmAction,
    /// true = Yes is highlighted
    pub selected_option: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

#[derive(Debug, Clone)]
pub struct LoginPrompt {
    pub username: String,
    pub password: String,
    pub field: LoginField,
}

impl LoginPrompt {
    fn new() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            field: LoginField::Username,
        }
    }

    fn current_mut(&mut self) -> &mut String {
        match self.field {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn masked_password(&self) -> String {
        "*".repeat(self.password.chars().count())
    }
}

#[derive(Debug)]
pub struct AppState {
    pub actions: Vec<Action>,
    pub selected_action_index: usize,
    pub status_log: StatusLog,
    /// Lines scrolled up from the tail; 0 follows new output.
    pub log_scroll: usize,
    /// Latest probe result; `None` until the first check finishes.
    pub availability: Option<ToolAvailability>,
    /// Actions with a job in flight. The same action may appear more than once.
    pub running: Vec<Action>,
    pub interface: String,
    pub should_quit: bool,
    pub help_visible: bool,
    pub confirmation_dialog: Option<ConfirmationDialog>,
    pub login_prompt: Option<LoginPrompt>,
    /// Modal notice, dismissed by any key.
    pub notice: Option<String>,
    pub notification: Option<Notification>,
    pub pending_jobs: Vec<Job>,
    pub ui_needs_refresh: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            actions: Action::ALL.to_vec(),
            selected_action_index: 0,
            status_log: StatusLog::new(),
            log_scroll: 0,
            availability: None,
            running: Vec::new(),
            interface: AppConfig::default().interface,
            should_quit: false,
            help_visible: false,
            confirmation_dialog: None,
            login_prompt: None,
            notice: None,
            notification: None,
            pending_jobs: Vec::new(),
            ui_needs_refresh: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_action(&self) -> Option<Action> {
        self.actions.get(self.selected_action_index).copied()
    }

    pub fn next_action(&mut self) {
        if !self.actions.is_empty() {
            self.selected_action_index = (self.selected_action_index + 1) % self.actions.len();
        }
    }

    pub fn previous_action(&mut self) {
        if !self.actions.is_empty() {
            self.selected_action_index = if self.selected_action_index == 0 {
                self.actions.len() - 1
            } else {
                self.selected_action_index - 1
            };
        }
    }

    pub fn first_action(&mut self) {
        self.selected_action_index = 0;
    }

    pub fn last_action(&mut self) {
        self.selected_action_index = self.actions.len().saturating_sub(1);
    }

    pub fn is_running(&self, action: Action) -> bool {
        self.running.contains(&action)
    }

    pub fn is_enabled(&self, action: Action) -> bool {
        action.unavailable_reason(self.availability.as_ref()).is_none()
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Append a line that originates in the foreground (not from a worker).
    pub fn append_status(&mut self, level: StatusLevel, text: impl Into<String>) {
        self.push_line(StatusLine::new(level, text));
    }

    fn push_line(&mut self, line: StatusLine) {
        self.status_log.push(line);
        // Keep the viewport anchored when the user has scrolled up.
        if self.log_scroll > 0 {
            self.log_scroll += 1;
        }
        self.ui_needs_refresh = true;
    }

    pub fn scroll_log_up(&mut self, lines: usize) {
        let max = self.status_log.len().saturating_sub(1);
        self.log_scroll = (self.log_scroll + lines).min(max);
    }

    pub fn scroll_log_down(&mut self, lines: usize) {
        self.log_scroll = self.log_scroll.saturating_sub(lines);
    }

    pub fn follow_log(&mut self) {
        self.log_scroll = 0;
    }

    /// Handle a key press on an action: gate it, prompt for it, or queue its job.
    pub fn trigger_action(&mut self, action: Action) {
        if let Some(reason) = action.unavailable_reason(self.availability.as_ref()) {
            self.append_status(
                StatusLevel::Info,
                format!("[Info] {} unavailable: {}.", action, reason),
            );
            self.notification = Some(Notification::warning(format!("{}: {}", action, reason)));
            return;
        }

        match action {
            Action::ProtonVpnLogin => {
                self.login_prompt = Some(LoginPrompt::new());
            }
            _ if action.needs_confirmation() => {
                self.confirmation_dialog = Some(ConfirmationDialog {
                    title: "Clear History".to_string(),
                    message: "Shred bash/zsh history files? This cannot be undone.".to_string(),
                    confirm_action: ConfirmAction::ClearHistory,
                    selected_option: false,
                });
            }
            _ => self.queue_job(Job::Action(action)),
        }
    }

    pub fn queue_job(&mut self, job: Job) {
        debug!("Queueing {:?}", job);
        self.notification = Some(Notification::info(format!("Started: {}", job.action())));
        self.pending_jobs.push(job);
    }

    pub fn show_install_confirmation(&mut self, packages: Vec<String>) {
        self.confirmation_dialog = Some(ConfirmationDialog {
            title: "Install missing tools".to_string(),
            message: format!(
                "Missing tools detected:\n{}\n\nInstall now? (requires root)",
                packages.join(", ")
            ),
            confirm_action: ConfirmAction::InstallPackages(packages),
            selected_option: true,
        });
    }

    pub fn confirm_dialog(&mut self) {
        let Some(dialog) = self.confirmation_dialog.take() else {
            return;
        };

        match (dialog.selected_option, dialog.confirm_action) {
            (true, ConfirmAction::InstallPackages(packages)) => {
                self.queue_job(Job::InstallPackages(packages));
            }
            (true, ConfirmAction::ClearHistory) => {
                self.queue_job(Job::Action(Action::ClearHistory));
            }
            (false, action) => self.decline(&action),
        }
    }

    pub fn cancel_dialog(&mut self) {
        if let Some(dialog) = self.confirmation_dialog.take() {
            self.decline(&dialog.confirm_action);
        }
    }

    fn decline(&mut self, action: &ConfirmAction) {
        match action {
            ConfirmAction::InstallPackages(_) => self.append_status(
                StatusLevel::Info,
                "User declined installation. Some features may not work.",
            ),
            ConfirmAction::ClearHistory => {
                self.append_status(StatusLevel::Info, "History clear cancelled.");
            }
        }
    }

    pub fn login_input(&mut self, ch: char) {
        if let Some(ref mut prompt) = self.login_prompt {
            prompt.current_mut().push(ch);
        }
    }

    pub fn login_backspace(&mut self) {
        if let Some(ref mut prompt) = self.login_prompt {
            prompt.current_mut().pop();
        }
    }

    pub fn login_next_field(&mut self) {
        if let Some(ref mut prompt) = self.login_prompt {
            prompt.field = match prompt.field {
                LoginField::Username => LoginField::Password,
                LoginField::Password => LoginField::Username,
            };
        }
    }

    /// Enter on the username moves to the password; Enter on the password submits.
    pub fn login_submit(&mut self) {
        let Some(prompt) = self.login_prompt.as_mut() else {
            return;
        };
        if prompt.field == LoginField::Username {
            prompt.field = LoginField::Password;
            return;
        }

        let Some(prompt) = self.login_prompt.take() else {
            return;
        };
        let credentials = Credentials::new(prompt.username, prompt.password);
        if credentials.is_complete() {
            self.queue_job(Job::ProtonVpnLogin(credentials));
        } else {
            self.append_status(StatusLevel::Info, "ProtonVPN login cancelled.");
        }
    }

    pub fn login_cancel(&mut self) {
        if self.login_prompt.take().is_some() {
            self.append_status(StatusLevel::Info, "ProtonVPN login cancelled.");
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Apply a message from a worker. Runs on the foreground loop only.
    pub fn apply_worker_event(&mut self, event: WorkerEvent) {
        match event {
            WorkerEvent::Status(line) => self.push_line(line),
            WorkerEvent::Started(action) => {
                self.running.push(action);
                self.ui_needs_refresh = true;
            }
            WorkerEvent::Finished(action) => {
                if let Some(pos) = self.running.iter().position(|a| *a == action) {
                    self.running.remove(pos);
                }
                self.ui_needs_refresh = true;
            }
            WorkerEvent::Availability(availability) => {
                self.availability = Some(availability);
                self.ui_needs_refresh = true;
            }
            WorkerEvent::ConfirmInstall(packages) => {
                if self.confirmation_dialog.is_none() {
                    self.show_install_confirmation(packages);
                } else {
                    warn!("Install confirmation dropped; another dialog is open");
                    self.append_status(
                        StatusLevel::Info,
                        "Install prompt skipped while another dialog is open. Run the check again.",
                    );
                }
            }
        }
    }

    pub fn expire_notification(&mut self) {
        if self.notification.as_ref().is_some_and(Notification::is_expired) {
            self.notification = None;
            self.ui_needs_refresh = true;
        }
    }
}

pub struct App {
    pub state: AppState,
    ctx: SessionContext,
    events: mpsc::UnboundedReceiver<WorkerEvent>,
}

impl App {
    pub fn new(config: AppConfig, host: Arc<dyn Host>) -> Self {
        let (sink, events) = StatusSink::channel();
        let state = AppState {
            interface: config.interface.clone(),
            ..AppState::default()
        };
        Self {
            state,
            ctx: SessionContext::new(config, host, sink),
            events,
        }
    }

    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    /// Warn when not root and queue the initial tool check.
    pub fn init(&mut self) {
        self.init_with_privileges(nix::unistd::Uid::effective().is_root());
    }

    pub fn init_with_privileges(&mut self, is_root: bool) {
        if !is_root {
            self.state.append_status(
                StatusLevel::Warning,
                "Not running as root. Please run with sudo to allow installs and network changes.",
            );
            self.state.notice = Some(
                "This tool should be run as root for installs and network changes.\n\nPlease re-run with sudo."
                    .to_string(),
            );
        }
        self.state.queue_job(Job::Action(Action::CheckTools));
    }

    /// Drain worker events into the state and start queued jobs.
    pub fn tick(&mut self) -> anyhow::Result<()> {
        while let Ok(event) = self.events.try_recv() {
            self.state.apply_worker_event(event);
        }

        for job in std::mem::take(&mut self.state.pending_jobs) {
            info!("Starting job for {}", job.action());
            actions::spawn(job, self.ctx.clone());
        }

        self.state.expire_notification();
        Ok(())
    }

    pub fn needs_ui_refresh(&mut self) -> bool {
        std::mem::take(&mut self.state.ui_needs_refresh)
    }
}
