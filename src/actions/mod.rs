// ABOUTME: Action catalogue and the job runner that executes actions on background tasks
// Each button maps to one Action; a Job is what a worker actually runs

pub mod anonsurf;
pub mod error;
pub mod history;
pub mod network;
pub mod packages;
pub mod protonvpn;
pub mod proxychains;
pub mod tor;

pub use error::ActionError;

use crate::orchestrator;
use crate::session::SessionContext;
use crate::tools::ToolAvailability;
use std::fmt;
use tokio::task::JoinHandle;
use tracing::{info_span, Instrument};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    CheckTools,
    SpoofMac,
    StartTor,
    StopTor,
    ConfigureProxychains,
    TestProxychains,
    InstallAnonsurf,
    StartAnonsurf,
    StopAnonsurf,
    InstallProtonVpn,
    ProtonVpnLogin,
    ConnectProtonVpn,
    DisconnectProtonVpn,
    ClearHistory,
    StartFullAnonymous,
    StopAll,
}

impl Action {
    /// Display order of the action list.
    pub const ALL: [Action; 16] = [
        Action::CheckTools,
        Action::SpoofMac,
        Action::StartTor,
        Action::StopTor,
        Action::ConfigureProxychains,
        Action::TestProxychains,
        Action::InstallAnonsurf,
        Action::StartAnonsurf,
        Action::StopAnonsurf,
        Action::InstallProtonVpn,
        Action::ProtonVpnLogin,
        Action::ConnectProtonVpn,
        Action::DisconnectProtonVpn,
        Action::ClearHistory,
        Action::StartFullAnonymous,
        Action::StopAll,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Action::CheckTools => "Check & Install Tools",
            Action::SpoofMac => "Spoof MAC Address",
            Action::StartTor => "Start Tor Service",
            Action::StopTor => "Stop Tor Service",
            Action::ConfigureProxychains => "Configure ProxyChains",
            Action::TestProxychains => "Test ProxyChains (ifconfig.me)",
            Action::InstallAnonsurf => "Install AnonSurf (git)",
            Action::StartAnonsurf => "Start AnonSurf",
            Action::StopAnonsurf => "Stop AnonSurf",
            Action::InstallProtonVpn => "Install ProtonVPN CLI",
            Action::ProtonVpnLogin => "ProtonVPN Login",
            Action::ConnectProtonVpn => "Connect ProtonVPN (fast)",
            Action::DisconnectProtonVpn => "Disconnect ProtonVPN",
            Action::ClearHistory => "Clear Shell History",
            Action::StartFullAnonymous => "Start Full Anonymous Mode",
            Action::StopAll => "Stop All (Tor+VPN+AnonSurf)",
        }
    }

    /// Single-key shortcut shown next to the label.
    pub fn hotkey(&self) -> Option<char> {
        match self {
            Action::CheckTools => Some('c'),
            Action::SpoofMac => Some('m'),
            Action::StartTor => Some('t'),
            Action::StopTor => Some('T'),
            Action::ConfigureProxychains => Some('p'),
            Action::TestProxychains => Some('x'),
            Action::StartAnonsurf => Some('a'),
            Action::StopAnonsurf => Some('A'),
            Action::ConnectProtonVpn => Some('v'),
            Action::DisconnectProtonVpn => Some('V'),
            Action::StartFullAnonymous => Some('F'),
            Action::StopAll => Some('S'),
            _ => None,
        }
    }

    pub fn from_hotkey(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.hotkey() == Some(key))
    }

    /// Why this action cannot run with the given tools, if it cannot.
    ///
    /// An unknown availability (no probe has finished yet) enables everything.
    pub fn unavailable_reason(&self, availability: Option<&ToolAvailability>) -> Option<&'static str> {
        let availability = availability?;
        match self {
            Action::ProtonVpnLogin | Action::ConnectProtonVpn | Action::DisconnectProtonVpn
                if !availability.protonvpn =>
            {
                Some("protonvpn-cli not installed")
            }
            Action::StartAnonsurf | Action::StopAnonsurf if !availability.anonsurf => {
                Some("AnonSurf not installed")
            }
            _ => None,
        }
    }

    /// Actions that ask the user before anything runs.
    pub fn needs_confirmation(&self) -> bool {
        matches!(self, Action::ClearHistory)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Unit of work for one background task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    Action(Action),
    /// Confirmed install of the packages a probe found missing.
    InstallPackages(Vec<String>),
    ProtonVpnLogin(Credentials),
}

impl Job {
    /// The action this job is shown under in the UI.
    pub fn action(&self) -> Action {
        match self {
            Job::Action(action) => *action,
            Job::InstallPackages(_) => Action::CheckTools,
            Job::ProtonVpnLogin(_) => Action::ProtonVpnLogin,
        }
    }
}

impl From<Action> for Job {
    fn from(action: Action) -> Self {
        Job::Action(action)
    }
}

/// Run a job to completion, reporting start, finish and any error through the sink.
pub async fn execute(job: Job, ctx: &SessionContext) {
    let action = job.action();
    let span = info_span!("job", action = %action, run_id = %Uuid::new_v4());

    async {
        ctx.sink.started(action);
        if let Err(e) = run_job(job, ctx).await {
            ctx.sink.error(e.to_string());
        }
        ctx.sink.finished(action);
    }
    .instrument(span)
    .await;
}

/// Run a job on its own task. A panic inside it is reported instead of propagated.
pub fn spawn(job: Job, ctx: SessionContext) -> JoinHandle<()> {
    let sink = ctx.sink.clone();
    let action = job.action();
    let worker = tokio::spawn(async move { execute(job, &ctx).await });

    tokio::spawn(async move {
        if let Err(e) = worker.await {
            sink.error(format!("{} stopped unexpectedly: {}", action, e));
            sink.finished(action);
        }
    })
}

async fn run_job(job: Job, ctx: &SessionContext) -> Result<(), ActionError> {
    match job {
        Job::Action(action) => run_action(action, ctx).await,
        Job::InstallPackages(packages) => packages::install_and_recheck(ctx, &packages).await,
        Job::ProtonVpnLogin(credentials) => protonvpn::login(ctx, &credentials).await,
    }
}

async fn run_action(action: Action, ctx: &SessionContext) -> Result<(), ActionError> {
    match action {
        Action::CheckTools => packages::check_requirements(ctx).await.map(|_| ()),
        Action::SpoofMac => network::spoof_mac(ctx).await,
        Action::StartTor => tor::start(ctx).await,
        Action::StopTor => tor::stop(ctx).await,
        Action::ConfigureProxychains => proxychains::configure(ctx).await.map(|_| ()),
        Action::TestProxychains => proxychains::test_via_curl(ctx).await.map(|_| ()),
        Action::InstallAnonsurf => anonsurf::install(ctx).await,
        Action::StartAnonsurf => anonsurf::start(ctx).await,
        Action::StopAnonsurf => anonsurf::stop(ctx).await,
        Action::InstallProtonVpn => protonvpn::install(ctx).await,
        Action::ProtonVpnLogin => Err(ActionError::Cancelled(
            "ProtonVPN login needs a username and password".to_string(),
        )),
        Action::ConnectProtonVpn => protonvpn::connect(ctx).await,
        Action::DisconnectProtonVpn => protonvpn::disconnect(ctx).await,
        Action::ClearHistory => history::clear(ctx).await,
        Action::StartFullAnonymous => {
            orchestrator::start_full_anonymous(ctx).await;
            Ok(())
        }
        Action::StopAll => {
            orchestrator::stop_all(ctx).await;
            Ok(())
        }
    }
}

/// Fail with [`ActionError::ToolMissing`] unless `binary` is on PATH.
pub(crate) fn ensure_installed(ctx: &SessionContext, binary: &str) -> Result<(), ActionError> {
    if ctx.is_installed(binary) {
        Ok(())
    } else {
        Err(ActionError::ToolMissing(binary.to_string()))
    }
}
