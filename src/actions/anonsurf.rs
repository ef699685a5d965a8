// ABOUTME: AnonSurf install from git plus start/stop of system-wide Tor tunnelling

use super::{ensure_installed, packages, ActionError};
use crate::host::CommandSpec;
use crate::session::{Resource, SessionContext};
use crate::tools;
use std::path::Path;

async fn make_executable(path: &Path) -> Result<(), ActionError> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = tokio::fs::metadata(path).await?.permissions();
    permissions.set_mode(permissions.mode() | 0o755);
    tokio::fs::set_permissions(path, permissions).await?;
    Ok(())
}

/// Clone (or pull) the AnonSurf repository and run its installer script.
pub async fn install(ctx: &SessionContext) -> Result<(), ActionError> {
    let _turn = ctx.queues.acquire(Resource::Anonsurf).await;
    let config = &ctx.config.anonsurf;
    let install_dir = config.install_dir.as_path();

    ctx.sink.info("Installing AnonSurf from repo...");

    if !ctx.is_installed("git") {
        ctx.sink.info("git not found, installing git...");
        if let Err(e) = packages::apt_install(ctx, &["git".to_string()]).await {
            ctx.sink.warn(format!("Installing git failed: {}", e));
        }
    }

    if ctx.host.path_exists(install_dir) {
        ctx.sink.info(format!(
            "{} already exists. Pulling latest...",
            install_dir.display()
        ));
        let pull = CommandSpec::new("git")
            .arg("-C")
            .arg(install_dir.display().to_string())
            .arg("pull");
        if let Err(e) = ctx.run_checked(&pull).await {
            ctx.sink
                .warn(format!("Pull failed ({}); using existing checkout.", e));
        }
    } else {
        ctx.run_checked(
            &CommandSpec::new("git")
                .arg("clone")
                .arg(config.repo.as_str())
                .arg(install_dir.display().to_string()),
        )
        .await?;
    }

    let installer = install_dir.join("installer.sh");
    if !ctx.host.path_exists(&installer) {
        return Err(ActionError::MissingFile(installer));
    }

    make_executable(&installer).await?;
    let result = ctx
        .run_checked(&CommandSpec::new(installer.display().to_string()).current_dir(install_dir))
        .await;
    if result.is_err() {
        ctx.sink.warn(
            "AnonSurf installer reported a problem. If any apt key issues appear, check network and try again.",
        );
    }
    result?;
    ctx.sink.info("Ran AnonSurf installer script.");

    ctx.pause(ctx.config.install_recheck_delay()).await;
    let availability = tools::probe(ctx.host.as_ref(), &ctx.config);
    if availability.anonsurf {
        ctx.sink.success("AnonSurf appears installed.");
    } else {
        ctx.sink
            .warn("AnonSurf not found after installation. See logs above.");
    }
    ctx.sink.availability(availability);
    Ok(())
}

fn ensure_present(ctx: &SessionContext) -> Result<(), ActionError> {
    if tools::anonsurf_present(ctx.host.as_ref(), &ctx.config) {
        Ok(())
    } else {
        ensure_installed(ctx, &ctx.config.anonsurf.binary)
    }
}

pub async fn start(ctx: &SessionContext) -> Result<(), ActionError> {
    let _turn = ctx.queues.acquire(Resource::Anonsurf).await;
    ensure_present(ctx)?;

    ctx.sink
        .info("Starting AnonSurf (system-wide Tor via iptables)...");
    ctx.run_checked(&CommandSpec::new(ctx.config.anonsurf.binary.as_str()).arg("start"))
        .await?;
    ctx.sink.success("AnonSurf started.");
    Ok(())
}

pub async fn stop(ctx: &SessionContext) -> Result<(), ActionError> {
    let _turn = ctx.queues.acquire(Resource::Anonsurf).await;
    ensure_present(ctx)?;

    ctx.sink.info("Stopping AnonSurf...");
    ctx.run_checked(&CommandSpec::new(ctx.config.anonsurf.binary.as_str()).arg("stop"))
        .await?;
    ctx.sink.success("AnonSurf stopped.");
    Ok(())
}
