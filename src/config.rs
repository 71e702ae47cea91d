use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::errors::{AppsError, AppsResult};
use crate::models::AppConfig;

/// Name of the per-app config file written into a project directory
pub const APP_CONFIG_FILE: &str = "hangar.toml";

pub const DEFAULT_API_BASE_URL: &str = "https://api.hangar.dev/v1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_base_url: String,
    #[serde(default)]
    pub access_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            access_token: None,
        }
    }
}

impl ClientConfig {
    /// Load client settings: defaults, then the user config file, then
    /// `HANGAR_*` environment variables.
    pub fn load() -> AppsResult<Self> {
        let path = Self::get_config_path();
        Self::load_from(path.as_deref())
    }

    pub fn load_from(path: Option<&Path>) -> AppsResult<Self> {
        let mut builder =
            config::Config::builder().set_default("api_base_url", DEFAULT_API_BASE_URL)?;

        if let Some(path) = path {
            debug!("Reading client config from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(false));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("HANGAR"))
            .build()?;

        Ok(settings.try_deserialize::<Self>()?)
    }

    fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hangar").join("config.toml"))
    }
}

/// Resolve the app config file for a path.
///
/// A path that already names a `.toml` file is used as is, anything else is
/// treated as a directory that should hold `hangar.toml`.
pub fn resolve_config_file_from_path(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if ext == "toml" => path.to_path_buf(),
        _ => path.join(APP_CONFIG_FILE),
    }
}

/// Read an app config file, returning `None` when it doesn't exist
pub fn load_app_config(path: &Path) -> AppsResult<Option<AppConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| AppsError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
    let config: AppConfig = toml::from_str(&contents)
        .map_err(|e| AppsError::Config(format!("Failed to parse {}: {}", path.display(), e)))?;

    Ok(Some(config))
}

/// Write an app config, replacing any existing file at `path`.
///
/// The content goes to a temp file in the same directory first and is
/// renamed over the target, so a failed write leaves the old file intact.
#[instrument(skip(app_config))]
pub fn write_app_config(path: &Path, app_config: &AppConfig) -> AppsResult<()> {
    let contents =
        toml::to_string_pretty(app_config).map_err(|e| AppsError::persistence(path, e))?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut file =
        tempfile::NamedTempFile::new_in(&dir).map_err(|e| AppsError::persistence(path, e))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| AppsError::persistence(path, e))?;
    set_file_mode(file.as_file(), path).map_err(|e| AppsError::persistence(path, e))?;
    file.persist(path)
        .map_err(|e| AppsError::persistence(path, e.error))?;

    info!("Wrote app config to {}", path.display());

    Ok(())
}

/// Temp files are created owner-only. Keep the mode of the file being
/// replaced, or use 0644 for a new one.
#[cfg(unix)]
fn set_file_mode(file: &fs::File, target: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = fs::metadata(target)
        .map(|metadata| metadata.permissions().mode() & 0o777)
        .unwrap_or(0o644);
    file.set_permissions(fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_file_mode(_file: &fs::File, _target: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::models::Build;

    #[test]
    fn test_resolve_config_file_from_directory() {
        let path = resolve_config_file_from_path(Path::new("/work/myapp"));
        assert_eq!(path, PathBuf::from("/work/myapp/hangar.toml"));
    }

    #[test]
    fn test_resolve_config_file_keeps_explicit_file() {
        let path = resolve_config_file_from_path(Path::new("/work/staging.toml"));
        assert_eq!(path, PathBuf::from("/work/staging.toml"));
    }

    #[test]
    fn test_write_then_load_app_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(APP_CONFIG_FILE);

        let mut app_config = AppConfig::new();
        app_config.app_name = "myapp".to_string();
        app_config.build = Some(Build::with_builder("paketobuildpacks/builder:base"));
        app_config.set_internal_port(8080);

        write_app_config(&path, &app_config).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("app = \"myapp\""));
        assert!(contents.contains("internal_port = 8080"));

        let loaded = load_app_config(&path).unwrap().unwrap();
        assert_eq!(loaded.app_name, "myapp");
        assert_eq!(loaded.internal_port(), Some(8080));
        assert_eq!(loaded.build, app_config.build);
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(APP_CONFIG_FILE);
        fs::write(&path, "app = \"old\"\nstale = true\n").unwrap();

        let mut app_config = AppConfig::new();
        app_config.app_name = "new".to_string();
        write_app_config(&path, &app_config).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("app = \"new\""));
        assert!(!contents.contains("stale"));
    }

    #[cfg(unix)]
    #[test]
    fn test_written_file_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(APP_CONFIG_FILE);

        write_app_config(&path, &AppConfig::new()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_overwrite_keeps_existing_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(APP_CONFIG_FILE);
        fs::write(&path, "app = \"old\"\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

        write_app_config(&path, &AppConfig::new()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join(APP_CONFIG_FILE);

        let err = write_app_config(&path, &AppConfig::new()).unwrap_err();

        assert!(matches!(err, AppsError::Persistence { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_load_missing_app_config() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_app_config(&dir.path().join(APP_CONFIG_FILE)).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_client_config_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "api_base_url = \"http://localhost:4000\"\naccess_token = \"abc\"\n",
        )
        .unwrap();

        let config = ClientConfig::load_from(Some(path.as_path())).unwrap();

        assert_eq!(config.api_base_url, "http://localhost:4000");
        assert_eq!(config.access_token.as_deref(), Some("abc"));
    }
}
