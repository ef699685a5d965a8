// ABOUTME: ProtonVPN CLI install, login, connect and disconnect
// Login credentials go to the CLI over stdin and never into the status log

use super::{ensure_installed, packages, ActionError, Credentials};
use crate::host::CommandSpec;
use crate::session::{Resource, SessionContext};
use crate::tools;

fn protonvpn(ctx: &SessionContext) -> CommandSpec {
    CommandSpec::new(ctx.config.protonvpn.binary.as_str())
}

pub async fn install(ctx: &SessionContext) -> Result<(), ActionError> {
    let package = ctx.config.protonvpn.package.clone();
    ctx.sink
        .info(format!("Installing ProtonVPN CLI (apt: {})...", package));

    let result = packages::apt_install(ctx, &[package]).await;
    ctx.sink
        .availability(tools::probe(ctx.host.as_ref(), &ctx.config));
    result?;
    ctx.sink.success("ProtonVPN CLI installed.");
    Ok(())
}

pub async fn login(ctx: &SessionContext, credentials: &Credentials) -> Result<(), ActionError> {
    if !credentials.is_complete() {
        return Err(ActionError::Cancelled("ProtonVPN login cancelled.".to_string()));
    }
    let _turn = ctx.queues.acquire(Resource::Vpn).await;
    ensure_installed(ctx, &ctx.config.protonvpn.binary)?;

    ctx.sink.info("ProtonVPN CLI login...");
    let spec = protonvpn(ctx).arg("login").stdin(format!(
        "{}\n{}\n",
        credentials.username, credentials.password
    ));
    if let Err(e) = ctx.run_checked(&spec).await {
        ctx.sink
            .warn("ProtonVPN login may have failed. Check logs above.");
        return Err(e);
    }
    ctx.sink.success("ProtonVPN login completed.");
    Ok(())
}

pub async fn connect(ctx: &SessionContext) -> Result<(), ActionError> {
    let _turn = ctx.queues.acquire(Resource::Vpn).await;
    ensure_installed(ctx, &ctx.config.protonvpn.binary)?;

    ctx.sink
        .info("Connecting ProtonVPN (fastest free server)...");
    if let Err(e) = ctx.run_checked(&protonvpn(ctx).args(["c", "-f"])).await {
        ctx.sink
            .warn("ProtonVPN connect failed. Is protonvpn-cli installed and logged in?");
        return Err(e);
    }
    ctx.sink.success("ProtonVPN connected.");
    Ok(())
}

pub async fn disconnect(ctx: &SessionContext) -> Result<(), ActionError> {
    let _turn = ctx.queues.acquire(Resource::Vpn).await;
    ensure_installed(ctx, &ctx.config.protonvpn.binary)?;

    ctx.sink.info("Disconnecting ProtonVPN...");
    ctx.run_checked(&protonvpn(ctx).arg("d")).await?;
    ctx.sink.success("ProtonVPN disconnected.");
    Ok(())
}
