use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::errors::{AppsError, AppsResult};
use crate::models::{App, Organization};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Request failed with status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Invalid app name {0:?}")]
    InvalidName(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Queries and mutations offered by the platform control plane
#[async_trait]
pub trait ControlPlane: Send + Sync {
    async fn list_applications(&self) -> ApiResult<Vec<App>>;
    async fn get_application(&self, name: &str) -> ApiResult<App>;
    /// Create an app. `None` lets the control plane generate a name.
    async fn create_application(&self, name: Option<&str>, org_id: &str) -> ApiResult<App>;
    async fn delete_application(&self, name: &str) -> ApiResult<()>;
    async fn move_application(&self, name: &str, org_id: &str) -> ApiResult<App>;
    async fn pause_application(&self, name: &str) -> ApiResult<App>;
    async fn resume_application(&self, name: &str) -> ApiResult<App>;
    async fn restart_application(&self, name: &str) -> ApiResult<App>;
    async fn list_organizations(&self) -> ApiResult<Vec<Organization>>;
}

/// REST client for the control plane
pub struct ApiClient {
    base_url: Url,
    access_token: String,
    client: Client,
}

impl ApiClient {
    /// Build a client, failing when no session token is configured
    pub fn new(config: ClientConfig) -> AppsResult<Self> {
        let access_token = config
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                AppsError::NotAuthenticated(
                    "no access token found, set HANGAR_ACCESS_TOKEN or add access_token \
                     to your hangar config.toml"
                        .to_string(),
                )
            })?;

        let base_url = Url::parse(&config.api_base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| {
                AppsError::Config(format!("invalid api_base_url {:?}", config.api_base_url))
            })?;

        Ok(Self {
            base_url,
            access_token,
            client: Client::new(),
        })
    }

    /// Append path segments to the base URL, percent-encoding each one
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// URL under `/apps/{name}`. Dot segments would be dropped by the URL
    /// parser and address a different resource, so they are rejected.
    fn app_url(&self, name: &str, rest: &[&str]) -> ApiResult<Url> {
        if matches!(name, "" | "." | "..") {
            return Err(ApiError::InvalidName(name.to_string()));
        }

        let mut segments = vec!["apps", name];
        segments.extend_from_slice(rest);
        Ok(self.url(&segments))
    }

    async fn send(&self, request: RequestBuilder, resource: &str) -> ApiResult<Response> {
        let response = request.bearer_auth(&self.access_token).send().await?;
        let status = response.status();
        debug!("{} -> {}", resource, status);

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(resource.to_string()));
        }

        let message = response.text().await?;
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        resource: &str,
    ) -> ApiResult<T> {
        let response = self.send(request, resource).await?;
        Ok(response.json::<T>().await?)
    }

    async fn app_action(&self, name: &str, action: &str) -> ApiResult<App> {
        let request = self.client.post(self.app_url(name, &[action])?);
        self.send_json(request, &format!("app {}", name)).await
    }
}

#[async_trait]
impl ControlPlane for ApiClient {
    #[instrument(skip(self))]
    async fn list_applications(&self) -> ApiResult<Vec<App>> {
        let request = self.client.get(self.url(&["apps"]));
        self.send_json(request, "apps").await
    }

    #[instrument(skip(self))]
    async fn get_application(&self, name: &str) -> ApiResult<App> {
        let request = self.client.get(self.app_url(name, &[])?);
        self.send_json(request, &format!("app {}", name)).await
    }

    #[instrument(skip(self))]
    async fn create_application(&self, name: Option<&str>, org_id: &str) -> ApiResult<App> {
        let request = self
            .client
            .post(self.url(&["apps"]))
            .json(&serde_json::json!({ "name": name, "organization_id": org_id }));
        self.send_json(request, "apps").await
    }

    #[instrument(skip(self))]
    async fn delete_application(&self, name: &str) -> ApiResult<()> {
        let request = self.client.delete(self.app_url(name, &[])?);
        self.send(request, &format!("app {}", name)).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn move_application(&self, name: &str, org_id: &str) -> ApiResult<App> {
        let request = self
            .client
            .post(self.app_url(name, &["move"])?)
            .json(&serde_json::json!({ "organization_id": org_id }));
        self.send_json(request, &format!("app {}", name)).await
    }

    #[instrument(skip(self))]
    async fn pause_application(&self, name: &str) -> ApiResult<App> {
        self.app_action(name, "pause").await
    }

    #[instrument(skip(self))]
    async fn resume_application(&self, name: &str) -> ApiResult<App> {
        self.app_action(name, "resume").await
    }

    #[instrument(skip(self))]
    async fn restart_application(&self, name: &str) -> ApiResult<App> {
        self.app_action(name, "restart").await
    }

    #[instrument(skip(self))]
    async fn list_organizations(&self) -> ApiResult<Vec<Organization>> {
        let request = self.client.get(self.url(&["organizations"]));
        self.send_json(request, "organizations").await
    }
}
