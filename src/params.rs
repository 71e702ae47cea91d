//! Resolution of command parameters from positional args, flags and prompts.

use std::io::Write;

use crate::cli::CreateArgs;
use crate::errors::{AppsError, AppsResult};
use crate::prompt::Prompter;

pub const APP_NAME_PROMPT: &str = "App Name (leave blank to use an auto-generated name)";

/// Parameters for `apps create` after flags and args are merged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateParams {
    /// `None` until a name is supplied or prompted for
    pub app_name: Option<String>,
    pub org_slug: Option<String>,
    pub internal_port: Option<u16>,
    pub builder: Option<String>,
}

/// Treat empty strings the same as a missing value
fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

/// Merge `apps create` args. Nothing is prompted for here.
pub fn resolve_create_params(args: &CreateArgs) -> AppsResult<CreateParams> {
    let internal_port = match non_empty(&args.port) {
        Some(port) => Some(parse_port(&port)?),
        None => None,
    };

    let app_name = resolve_app_name_sources(non_empty(&args.app_name), non_empty(&args.name))?;

    Ok(CreateParams {
        app_name,
        org_slug: non_empty(&args.org),
        internal_port,
        builder: non_empty(&args.builder),
    })
}

/// Pick the app name from the positional arg or the `--name` flag.
///
/// Supplying both is an error even when they're equal.
pub fn resolve_app_name_sources(
    positional: Option<String>,
    flag: Option<String>,
) -> AppsResult<Option<String>> {
    match (positional, flag) {
        (Some(positional), Some(flag)) => Err(AppsError::ConflictingInput { positional, flag }),
        (Some(name), None) | (None, Some(name)) => Ok(Some(name)),
        (None, None) => Ok(None),
    }
}

pub fn parse_port(value: &str) -> AppsResult<u16> {
    value.parse::<u16>().map_err(|_| {
        AppsError::InvalidInput(format!(
            "-p ports must be numeric (0-65535), got {:?}",
            value
        ))
    })
}

/// Return the resolved app name, asking for one when none was given.
///
/// An empty answer yields `None` so the control plane generates a name.
pub fn prompt_app_name(
    app_name: Option<String>,
    prompter: &dyn Prompter,
    out: &mut dyn Write,
) -> AppsResult<Option<String>> {
    if let Some(name) = app_name {
        writeln!(out, "Selected App Name: {}", name)?;
        return Ok(Some(name));
    }

    let answer = prompter.input(APP_NAME_PROMPT, true)?;
    if answer.is_empty() {
        Ok(None)
    } else {
        Ok(Some(answer))
    }
}
