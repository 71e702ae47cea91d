use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque app definition carried through from the control plane
pub type Definition = toml::Table;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct App {
    pub id: String,
    pub name: String,
    pub status: AppStatus,
    pub organization: Organization,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub deployed: bool,
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub latest_deploy: Option<DateTime<Utc>>,
    #[serde(default)]
    pub config: RemoteConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    #[serde(default)]
    pub definition: Definition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppStatus {
    Pending,
    Running,
    Paused,
    Suspended,
    Dead,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for AppStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppStatus::Pending => write!(f, "pending"),
            AppStatus::Running => write!(f, "running"),
            AppStatus::Paused => write!(f, "paused"),
            AppStatus::Suspended => write!(f, "suspended"),
            AppStatus::Dead => write!(f, "dead"),
            AppStatus::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: OrgKind,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrgKind {
    Personal,
    #[default]
    Shared,
}

impl std::fmt::Display for OrgKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrgKind::Personal => write!(f, "personal"),
            OrgKind::Shared => write!(f, "shared"),
        }
    }
}

/// Build settings written to the local app config
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Build {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builder: Option<String>,
    /// Remaining build keys from the control plane, e.g. `image`
    #[serde(flatten)]
    pub settings: toml::Table,
}

impl Build {
    pub fn with_builder(builder: &str) -> Self {
        Self {
            builder: Some(builder.to_string()),
            ..Default::default()
        }
    }

    /// Fold a remote `[build]` table in. Local values win.
    fn merge(&mut self, remote: toml::Table) {
        for (key, value) in remote {
            if key == "builder" {
                if self.builder.is_none() {
                    self.builder = value.as_str().map(str::to_string);
                }
            } else {
                self.settings.entry(key).or_insert(value);
            }
        }
    }
}

/// Local app configuration, persisted as `hangar.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(rename = "app", default, skip_serializing_if = "String::is_empty")]
    pub app_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<Build>,
    #[serde(flatten)]
    pub definition: Definition,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the definition with one returned by the control plane.
    ///
    /// `app` is dropped from the incoming definition and a `[build]` table
    /// is merged into `self.build`, so neither key is written twice.
    pub fn set_definition(&mut self, mut definition: Definition) {
        definition.remove("app");
        if let Some(toml::Value::Table(remote)) = definition.remove("build") {
            self.build.get_or_insert_with(Build::default).merge(remote);
        }
        self.definition = definition;
    }

    /// Set `internal_port` on the first service, creating it if needed
    pub fn set_internal_port(&mut self, port: u16) {
        if !matches!(self.definition.get("services"), Some(toml::Value::Array(_))) {
            self.definition
                .insert("services".to_string(), toml::Value::Array(Vec::new()));
        }

        if let Some(toml::Value::Array(services)) = self.definition.get_mut("services") {
            let mut service = match services.first() {
                Some(toml::Value::Table(table)) => table.clone(),
                _ => toml::Table::new(),
            };
            service.insert(
                "internal_port".to_string(),
                toml::Value::Integer(i64::from(port)),
            );

            if services.is_empty() {
                services.push(toml::Value::Table(service));
            } else {
                services[0] = toml::Value::Table(service);
            }
        }
    }

    pub fn internal_port(&self) -> Option<i64> {
        self.definition
            .get("services")?
            .as_array()?
            .first()?
            .get("internal_port")?
            .as_integer()
    }
}
