//! Per-invocation context handed to every command.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::api_client::ControlPlane;
use crate::config;
use crate::errors::{AppsError, AppsResult};
use crate::presenters::RenderOptions;
use crate::prompt::Prompter;

/// Global options shared by all commands
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// App selected with `--app`
    pub app_name: Option<String>,
    /// Config file or directory given with `--config`
    pub config_path: Option<PathBuf>,
    pub json: bool,
}

pub struct CmdContext {
    pub client: Arc<dyn ControlPlane>,
    pub prompter: Arc<dyn Prompter>,
    pub out: Box<dyn Write>,
    /// Progress messages go here instead of `out` in JSON mode
    pub err: Box<dyn Write>,
    /// App given on the command line, if any
    pub app_name: Option<String>,
    /// Explicit app config file, `None` means resolve from `working_dir`
    pub config_file: Option<PathBuf>,
    pub working_dir: PathBuf,
    pub json: bool,
}

impl CmdContext {
    pub fn new(
        client: Arc<dyn ControlPlane>,
        prompter: Arc<dyn Prompter>,
        out: Box<dyn Write>,
        err: Box<dyn Write>,
        options: GlobalOptions,
        working_dir: PathBuf,
    ) -> Self {
        Self {
            client,
            prompter,
            out,
            err,
            app_name: options.app_name.filter(|name| !name.is_empty()),
            config_file: options
                .config_path
                .as_deref()
                .map(config::resolve_config_file_from_path),
            working_dir,
            json: options.json,
        }
    }

    /// Path of the app config file for this invocation
    pub fn config_path(&self) -> PathBuf {
        self.config_file
            .clone()
            .unwrap_or_else(|| config::resolve_config_file_from_path(&self.working_dir))
    }

    /// The app to operate on: `--app` first, then the local config file
    pub fn require_app_name(&self) -> AppsResult<String> {
        if let Some(name) = &self.app_name {
            return Ok(name.clone());
        }

        let path = self.config_path();
        let name = config::load_app_config(&path)?
            .map(|app_config| app_config.app_name)
            .filter(|name| !name.is_empty())
            .ok_or(AppsError::AppNameRequired)?;
        debug!("Using app {} from {}", name, path.display());

        Ok(name)
    }

    /// Sink for human-readable progress lines. In JSON mode stdout carries
    /// only the document, so these go to stderr.
    pub fn messages(&mut self) -> &mut dyn Write {
        if self.json {
            self.err.as_mut()
        } else {
            self.out.as_mut()
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            json: self.json,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::tests::test_utils::TestContext;

    #[test]
    fn test_app_flag_wins() {
        let mut test = TestContext::new(vec![]);
        std::fs::write(test.dir.path().join("hangar.toml"), "app = \"from-file\"\n").unwrap();
        test.ctx.app_name = Some("from-flag".to_string());

        assert_eq!(test.ctx.require_app_name().unwrap(), "from-flag");
    }

    #[test]
    fn test_app_name_from_config_file() {
        let test = TestContext::new(vec![]);
        std::fs::write(test.dir.path().join("hangar.toml"), "app = \"from-file\"\n").unwrap();

        assert_eq!(test.ctx.require_app_name().unwrap(), "from-file");
    }

    #[test]
    fn test_missing_app_name() {
        let test = TestContext::new(vec![]);

        let err = test.ctx.require_app_name().unwrap_err();

        assert!(matches!(err, AppsError::AppNameRequired));
    }
}
