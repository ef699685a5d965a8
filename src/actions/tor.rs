// ABOUTME: Tor service lifecycle through systemctl
// Service state is read from `systemctl is-active` exit status

use super::ActionError;
use crate::host::CommandSpec;
use crate::session::{Resource, SessionContext};

fn systemctl<'a>(args: impl IntoIterator<Item = &'a str>) -> CommandSpec {
    CommandSpec::new("systemctl").args(args)
}

pub async fn is_active(ctx: &SessionContext) -> Result<bool, ActionError> {
    let output = ctx
        .host
        .run(&systemctl(["is-active", ctx.config.tor.service.as_str()]))
        .await?;
    Ok(output.is_success())
}

async fn report_state(ctx: &SessionContext) {
    match is_active(ctx).await {
        Ok(true) => ctx.sink.success("Tor service is active."),
        Ok(false) => ctx.sink.info("Tor service is not active."),
        Err(e) => ctx.sink.warn(format!("Could not query Tor service: {}", e)),
    }
}

pub async fn start(ctx: &SessionContext) -> Result<(), ActionError> {
    let _turn = ctx.queues.acquire(Resource::TorService).await;
    let service = ctx.config.tor.service.as_str();

    ctx.sink.info("Starting Tor service...");
    let started = ctx
        .run_checked(&systemctl(["enable", "--now", service]))
        .await;
    ctx.settle().await;
    report_state(ctx).await;
    started.map(|_| ())
}

pub async fn stop(ctx: &SessionContext) -> Result<(), ActionError> {
    let _turn = ctx.queues.acquire(Resource::TorService).await;

    ctx.sink.info("Stopping Tor service...");
    let stopped = ctx
        .run_checked(&systemctl(["stop", ctx.config.tor.service.as_str()]))
        .await;
    report_state(ctx).await;
    stopped.map(|_| ())
}
