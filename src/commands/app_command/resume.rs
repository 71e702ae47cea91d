use std::io::Write;
use tracing::{info, instrument};

use crate::context::CmdContext;
use crate::errors::{AppsError, AppsResult};

/// Resume the selected app
#[instrument(skip(ctx))]
pub async fn execute(ctx: &mut CmdContext) -> AppsResult<()> {
    let app_name = ctx.require_app_name()?;

    let app = ctx
        .client
        .resume_application(&app_name)
        .await
        .map_err(|e| AppsError::transport("Failed to resume app", e))?;

    info!("Resumed app '{}'", app.name);
    writeln!(ctx.out, "{} is now {}", app.name, app.status)?;

    Ok(())
}
