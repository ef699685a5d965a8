// ABOUTME: Tool checks and apt installs for missing packages
// A failed probe never installs on its own; the foreground asks first

use super::ActionError;
use crate::host::CommandSpec;
use crate::session::{Resource, SessionContext};
use crate::tools::{self, ToolAvailability};

/// Probe every tool, report it, and ask for confirmation if required ones are missing.
pub async fn check_requirements(ctx: &SessionContext) -> Result<ToolAvailability, ActionError> {
    ctx.sink.info("Checking required tools...");

    let availability = tools::probe(ctx.host.as_ref(), &ctx.config);
    availability.report(&ctx.config, &ctx.sink);
    ctx.sink.availability(availability.clone());

    if availability.all_required_present() {
        ctx.sink.success("Core required tools are installed.");
    } else {
        let packages = availability.missing_packages();
        ctx.sink.info(format!(
            "Missing tools detected: {}. Confirm to install (requires root).",
            packages.join(", ")
        ));
        ctx.sink.confirm_install(packages);
    }

    Ok(availability)
}

/// `apt-get update -y` followed by `apt-get install -y <packages>`.
pub async fn apt_install(ctx: &SessionContext, packages: &[String]) -> Result<(), ActionError> {
    let _turn = ctx.queues.acquire(Resource::PackageManager).await;

    ctx.run_checked(&CommandSpec::new("apt-get").args(["update", "-y"]))
        .await?;
    ctx.run_checked(
        &CommandSpec::new("apt-get")
            .args(["install", "-y"])
            .args(packages.iter().cloned()),
    )
    .await?;
    Ok(())
}

pub async fn install_and_recheck(ctx: &SessionContext, packages: &[String]) -> Result<(), ActionError> {
    if packages.is_empty() {
        return Ok(());
    }

    ctx.sink
        .info("Installing missing packages via apt (may take some time)...");
    match apt_install(ctx, packages).await {
        Ok(()) => ctx.sink.info("Installation finished. Re-checking tools..."),
        Err(e) => ctx
            .sink
            .error(format!("Some installs failed ({}); check logs above.", e)),
    }

    ctx.pause(ctx.config.install_recheck_delay()).await;
    check_requirements(ctx).await.map(|_| ())
}
