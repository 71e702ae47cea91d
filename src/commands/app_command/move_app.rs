use std::io::Write;
use tracing::{info, instrument};

use crate::confirm::confirm_action;
use crate::context::CmdContext;
use crate::errors::{AppsError, AppsResult};
use crate::org_select::{select_organization, OrgSelection};

/// Move an app to another organization
#[instrument(skip(ctx))]
pub async fn execute(
    ctx: &mut CmdContext,
    app_name: &str,
    org_slug: Option<&str>,
    yes: bool,
) -> AppsResult<()> {
    let org = match select_organization(
        ctx.client.as_ref(),
        ctx.prompter.as_ref(),
        ctx.out.as_mut(),
        org_slug,
    )
    .await?
    {
        OrgSelection::Resolved(org) => org,
        OrgSelection::Cancelled => return Ok(()),
        OrgSelection::Failed(reason) => return Err(AppsError::OrganizationResolution(reason)),
    };

    let app = ctx
        .client
        .get_application(app_name)
        .await
        .map_err(|e| AppsError::transport("Error fetching app", e))?;

    let proceed = confirm_action(
        ctx.prompter.as_ref(),
        ctx.out.as_mut(),
        yes,
        "Are you sure you want to move this app?",
        &format!(
            "Move {} from {} to {}?",
            app_name, app.organization.slug, org.slug
        ),
    )?;
    if !proceed {
        return Ok(());
    }

    ctx.client
        .move_application(app_name, &org.id)
        .await
        .map_err(|e| AppsError::transport("Failed to move app", e))?;

    info!(
        "Moved app '{}' from {} to {}",
        app_name, app.organization.slug, org.slug
    );
    writeln!(ctx.out, "Successfully moved {} to {}", app_name, org.slug)?;

    Ok(())
}
