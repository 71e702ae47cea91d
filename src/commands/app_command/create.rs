use std::io::Write;
use tracing::{info, instrument};

use crate::cli::CreateArgs;
use crate::config;
use crate::context::CmdContext;
use crate::errors::{AppsError, AppsResult};
use crate::models::{AppConfig, Build};
use crate::org_select::{select_organization, OrgSelection};
use crate::params;
use crate::presenters::{self, AppInfo, RenderOptions};

/// Create a new app and write its config file
#[instrument(skip(ctx))]
pub async fn execute(ctx: &mut CmdContext, args: &CreateArgs) -> AppsResult<()> {
    let params = params::resolve_create_params(args)?;

    let mut app_config = AppConfig::new();
    if let Some(builder) = &params.builder {
        app_config.build = Some(Build::with_builder(builder));
    }

    let client = ctx.client.clone();
    let prompter = ctx.prompter.clone();

    let app_name =
        params::prompt_app_name(params.app_name.clone(), prompter.as_ref(), ctx.messages())?;

    let org = match select_organization(
        client.as_ref(),
        prompter.as_ref(),
        ctx.messages(),
        params.org_slug.as_deref(),
    )
    .await?
    {
        OrgSelection::Resolved(org) => org,
        OrgSelection::Cancelled => return Ok(()),
        OrgSelection::Failed(reason) => return Err(AppsError::OrganizationResolution(reason)),
    };

    let app = client
        .create_application(app_name.as_deref(), &org.id)
        .await
        .map_err(|e| AppsError::transport("Failed to create app", e))?;
    info!("Created app '{}' in {}", app.name, org.slug);

    app_config.app_name = app.name.clone();
    app_config.set_definition(app.config.definition.clone());
    if let Some(port) = params.internal_port {
        app_config.set_internal_port(port);
    }

    writeln!(ctx.messages(), "New app created")?;
    let options = RenderOptions {
        hide_header: true,
        vertical: true,
        json: ctx.json,
    };
    presenters::render(ctx.out.as_mut(), &AppInfo { app: &app }, options)?;

    // The app exists remotely from here on, a failed write is still an error
    let path = ctx.config_path();
    config::write_app_config(&path, &app_config)?;
    ctx.config_file = Some(path.clone());

    writeln!(ctx.messages(), "Wrote config file {}", path.display())?;

    Ok(())
}
