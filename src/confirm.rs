use colored::Colorize;
use std::io::Write;
use tracing::debug;

use crate::errors::AppsResult;
use crate::prompt::{PromptError, Prompter};

/// Ask before a destructive action.
///
/// Returns `true` when the action may go ahead. With `skip` set no prompt is
/// shown. A "no" answer, or aborting the prompt, returns `false`: callers
/// should stop and report success without mutating anything.
pub fn confirm_action(
    prompter: &dyn Prompter,
    out: &mut dyn Write,
    skip: bool,
    warning: &str,
    question: &str,
) -> AppsResult<bool> {
    if skip {
        return Ok(true);
    }

    writeln!(out, "{}", warning.red())?;

    match prompter.confirm(question, false) {
        Ok(answer) => {
            debug!("Confirmation for {:?}: {}", question, answer);
            Ok(answer)
        }
        Err(PromptError::Interrupted) => Ok(false),
        Err(e) => Err(e.into()),
    }
}
