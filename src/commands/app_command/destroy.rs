use std::io::Write;
use tracing::{info, instrument};

use crate::confirm::confirm_action;
use crate::context::CmdContext;
use crate::errors::{AppsError, AppsResult};

/// Destroy an app, asking first unless `yes` is set
#[instrument(skip(ctx))]
pub async fn execute(ctx: &mut CmdContext, app_name: &str, yes: bool) -> AppsResult<()> {
    let proceed = confirm_action(
        ctx.prompter.as_ref(),
        ctx.out.as_mut(),
        yes,
        "Destroying an app is not reversible.",
        &format!("Destroy app {}?", app_name),
    )?;
    if !proceed {
        return Ok(());
    }

    ctx.client
        .delete_application(app_name)
        .await
        .map_err(|e| AppsError::transport("Failed to destroy app", e))?;

    info!("Destroyed app '{}'", app_name);
    writeln!(ctx.out, "Destroyed app {}", app_name)?;

    Ok(())
}
