// ABOUTME: Secure deletion of shell history files with shred

use super::ActionError;
use crate::host::CommandSpec;
use crate::session::{Resource, SessionContext};

/// Shred every configured history file that exists. Keeps going past failures
/// and returns the first one.
pub async fn clear(ctx: &SessionContext) -> Result<(), ActionError> {
    let _turn = ctx.queues.acquire(Resource::HistoryFiles).await;
    ctx.sink
        .info("Clearing bash/zsh histories (if present)...");

    let mut first_failure = None;
    for path in &ctx.config.history_paths {
        if !ctx.host.path_exists(path) {
            continue;
        }

        let spec = CommandSpec::new("shred")
            .arg("-u")
            .arg(path.display().to_string());
        match ctx.run_quiet(&spec).await {
            Ok(output) if output.is_success() => {
                ctx.sink.info(format!("Deleted {}", path.display()));
            }
            Ok(output) => {
                let err = ActionError::CommandFailed {
                    command: spec.to_string(),
                    code: output.code,
                };
                ctx.sink
                    .warn(format!("Could not delete {}", path.display()));
                first_failure.get_or_insert(err);
            }
            Err(e) => {
                ctx.sink
                    .warn(format!("Could not delete {}: {}", path.display(), e));
                first_failure.get_or_insert(e);
            }
        }
    }

    ctx.sink.info("History clear done.");
    first_failure.map_or(Ok(()), Err)
}
