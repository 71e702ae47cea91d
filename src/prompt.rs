use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// The user aborted the prompt (Ctrl+C or Esc)
    #[error("prompt interrupted")]
    Interrupted,
    #[error("terminal error: {0}")]
    Terminal(#[source] std::io::Error),
}

impl From<dialoguer::Error> for PromptError {
    fn from(err: dialoguer::Error) -> Self {
        match err {
            dialoguer::Error::IO(e) if e.kind() == std::io::ErrorKind::Interrupted => {
                PromptError::Interrupted
            }
            dialoguer::Error::IO(e) => PromptError::Terminal(e),
        }
    }
}

/// Interactive questions a command may ask the user
pub trait Prompter: Send + Sync {
    /// Free-text input. With `allow_empty` an empty answer is accepted.
    fn input(&self, message: &str, allow_empty: bool) -> Result<String, PromptError>;

    fn confirm(&self, message: &str, default: bool) -> Result<bool, PromptError>;

    /// Pick one of `items`, returning its index
    fn select(&self, message: &str, items: &[String]) -> Result<usize, PromptError>;
}

/// Prompter backed by the user's terminal
#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl Prompter for TerminalPrompter {
    fn input(&self, message: &str, allow_empty: bool) -> Result<String, PromptError> {
        let value = Input::<String>::with_theme(&self.theme)
            .with_prompt(message)
            .allow_empty(allow_empty)
            .interact_text()?;
        Ok(value.trim().to_string())
    }

    fn confirm(&self, message: &str, default: bool) -> Result<bool, PromptError> {
        let answer = Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .default(default)
            .interact_opt()?;
        answer.ok_or(PromptError::Interrupted)
    }

    fn select(&self, message: &str, items: &[String]) -> Result<usize, PromptError> {
        let selection = Select::with_theme(&self.theme)
            .with_prompt(message)
            .items(items)
            .default(0)
            .interact_opt()?;
        selection.ok_or(PromptError::Interrupted)
    }
}
