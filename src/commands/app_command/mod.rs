pub mod create;
pub mod destroy;
pub mod list;
pub mod move_app;
pub mod pause;
pub mod restart;
pub mod resume;

use tracing::info;

use crate::cli::AppsCommand;
use crate::context::CmdContext;
use crate::errors::{AppsError, AppsResult};

/// Run an `apps` subcommand.
///
/// A prompt the user aborted ends the command successfully.
pub async fn dispatch(ctx: &mut CmdContext, command: AppsCommand) -> AppsResult<()> {
    let result = match command {
        AppsCommand::List => list::execute(ctx).await,
        AppsCommand::Create(args) => create::execute(ctx, &args).await,
        AppsCommand::Destroy(args) => destroy::execute(ctx, &args.app_name, args.yes).await,
        AppsCommand::Move(args) => {
            move_app::execute(ctx, &args.app_name, args.org.as_deref(), args.yes).await
        }
        AppsCommand::Pause => pause::execute(ctx).await,
        AppsCommand::Resume => resume::execute(ctx).await,
        AppsCommand::Restart => restart::execute(ctx).await,
    };

    match result {
        Err(AppsError::Cancelled) => {
            info!("Command cancelled by user");
            Ok(())
        }
        other => other,
    }
}
