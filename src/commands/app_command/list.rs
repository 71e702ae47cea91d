use tracing::instrument;

use crate::context::CmdContext;
use crate::errors::{AppsError, AppsResult};
use crate::presenters::{self, AppList};

/// List all apps the caller can see
#[instrument(skip(ctx))]
pub async fn execute(ctx: &mut CmdContext) -> AppsResult<()> {
    let apps = ctx
        .client
        .list_applications()
        .await
        .map_err(|e| AppsError::transport("Failed to list apps", e))?;

    let options = ctx.render_options();
    presenters::render(ctx.out.as_mut(), &AppList { apps: &apps }, options)
}
