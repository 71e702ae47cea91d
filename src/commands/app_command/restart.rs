use std::io::Write;
use tracing::{info, instrument};

use crate::context::CmdContext;
use crate::errors::{AppsError, AppsResult};

/// Restart the selected app
#[instrument(skip(ctx))]
pub async fn execute(ctx: &mut CmdContext) -> AppsResult<()> {
    let app_name = ctx.require_app_name()?;

    let app = ctx
        .client
        .restart_application(&app_name)
        .await
        .map_err(|e| AppsError::transport("Failed to restart app", e))?;

    info!("Restart requested for app '{}'", app.name);
    writeln!(ctx.out, "{} is being restarted", app.name)?;

    Ok(())
}
