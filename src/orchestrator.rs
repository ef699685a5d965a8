// ABOUTME: Full anonymous mode start sequence and the best-effort stop sequence
// Steps run in a fixed order; a failing step is logged and the sequence carries on

use crate::actions::{self, ActionError};
use crate::host::CommandSpec;
use crate::session::{Resource, SessionContext};
use crate::tools;
use std::fmt;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    SpoofMac,
    StartTor,
    ConfigureProxychains,
    EngageTunnel,
}

impl Step {
    pub const SEQUENCE: [Step; 4] = [
        Step::SpoofMac,
        Step::StartTor,
        Step::ConfigureProxychains,
        Step::EngageTunnel,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Step::SpoofMac => "MAC spoof",
            Step::StartTor => "Tor start",
            Step::ConfigureProxychains => "Proxychains config",
            Step::EngageTunnel => "System-wide tunnel",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which system-wide tunnel the final step engages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TunnelChoice {
    Anonsurf,
    ProtonVpn,
    None,
}

impl TunnelChoice {
    /// AnonSurf wins when both are present unless `prefer_vpn` is set.
    pub fn select(anonsurf: bool, vpn: bool, prefer_vpn: bool) -> Self {
        match (anonsurf, vpn) {
            (true, true) if prefer_vpn => TunnelChoice::ProtonVpn,
            (true, _) => TunnelChoice::Anonsurf,
            (false, true) => TunnelChoice::ProtonVpn,
            (false, false) => TunnelChoice::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub step: Step,
    pub error: Option<String>,
}

impl StepOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceReport {
    pub steps: Vec<StepOutcome>,
    pub tunnel: TunnelChoice,
}

impl SequenceReport {
    pub fn failed_steps(&self) -> Vec<Step> {
        self.steps
            .iter()
            .filter(|outcome| !outcome.succeeded())
            .map(|outcome| outcome.step)
            .collect()
    }
}

async fn engage_tunnel(ctx: &SessionContext) -> (TunnelChoice, Result<(), ActionError>) {
    let anonsurf = tools::anonsurf_present(ctx.host.as_ref(), &ctx.config);
    let vpn = ctx.is_installed(&ctx.config.protonvpn.binary);
    let choice = TunnelChoice::select(anonsurf, vpn, ctx.config.prefer_vpn);

    let result = match choice {
        TunnelChoice::Anonsurf => {
            ctx.sink
                .info("Using AnonSurf (system-wide) for traffic tunneling.");
            actions::anonsurf::start(ctx).await
        }
        TunnelChoice::ProtonVpn => {
            ctx.sink.info("Using ProtonVPN CLI for VPN.");
            actions::protonvpn::connect(ctx).await
        }
        TunnelChoice::None => {
            ctx.sink.warn(
                "No AnonSurf/ProtonVPN found; Tor+proxychains active but system traffic may leak.",
            );
            Ok(())
        }
    };
    (choice, result)
}

/// Spoof MAC, start Tor, configure proxychains, then engage one system-wide tunnel.
///
/// Every step is attempted regardless of earlier failures. Nothing is rolled back.
pub async fn start_full_anonymous(ctx: &SessionContext) -> SequenceReport {
    ctx.sink.info("Starting Full Anonymous Mode sequence...");

    let mut steps = Vec::with_capacity(Step::SEQUENCE.len());
    let mut tunnel = TunnelChoice::None;

    for (index, step) in Step::SEQUENCE.into_iter().enumerate() {
        if index > 0 {
            ctx.settle().await;
        }

        let result = match step {
            Step::SpoofMac => actions::network::spoof_mac(ctx).await,
            Step::StartTor => actions::tor::start(ctx).await,
            Step::ConfigureProxychains => actions::proxychains::configure(ctx).await.map(|_| ()),
            Step::EngageTunnel => {
                let (choice, result) = engage_tunnel(ctx).await;
                tunnel = choice;
                result
            }
        };

        let error = result.err().map(|e| e.to_string());
        if let Some(ref message) = error {
            ctx.sink
                .error(format!("{} failed: {}. Continuing.", step, message));
        }
        steps.push(StepOutcome { step, error });
    }

    let report = SequenceReport { steps, tunnel };
    info!(
        "Full anonymous sequence finished with {} failed step(s), tunnel {:?}",
        report.failed_steps().len(),
        report.tunnel
    );
    ctx.sink.info("Full Anonymous Mode sequence completed.");
    report
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopReport {
    /// Stop commands run, in order.
    pub attempted: Vec<String>,
    /// How many of them failed or exited nonzero.
    pub tolerated_failures: usize,
}

async fn attempt_stop(
    ctx: &SessionContext,
    resource: Resource,
    spec: CommandSpec,
    report: &mut StopReport,
) {
    let _turn = ctx.queues.acquire(resource).await;
    report.attempted.push(spec.to_string());

    let outcome = match ctx.run_quiet(&spec).await {
        Ok(output) if output.is_success() => return,
        Ok(output) => ActionError::CommandFailed {
            command: spec.to_string(),
            code: output.code,
        },
        Err(e) => e,
    };
    report.tolerated_failures += 1;
    ctx.sink.info(format!("[Info] {} (ignored)", outcome));
}

/// Stop AnonSurf and disconnect ProtonVPN when present, then stop Tor. Never fails.
pub async fn stop_all(ctx: &SessionContext) -> StopReport {
    ctx.sink.info("Stopping anonymity services...");
    let mut report = StopReport::default();

    if tools::anonsurf_present(ctx.host.as_ref(), &ctx.config) {
        let spec = CommandSpec::new(ctx.config.anonsurf.binary.as_str()).arg("stop");
        attempt_stop(ctx, Resource::Anonsurf, spec, &mut report).await;
    }

    if ctx.is_installed(&ctx.config.protonvpn.binary) {
        let spec = CommandSpec::new(ctx.config.protonvpn.binary.as_str()).arg("d");
        attempt_stop(ctx, Resource::Vpn, spec, &mut report).await;
    }

    let spec = CommandSpec::new("systemctl").args(["stop", ctx.config.tor.service.as_str()]);
    attempt_stop(ctx, Resource::TorService, spec, &mut report).await;

    ctx.sink
        .info("Stopped Tor/AnonSurf/ProtonVPN (if running).");
    report
}
