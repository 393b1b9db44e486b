use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::instrument;
use url::Url;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::{
    client::errors::{ClientError, ErrorBody},
    constants::ADMIN_TOKEN_HEADER,
    entities::{
        admin::{AdminStats, Analytics},
        contact::{ContactRequest, ContactResponse},
        project::{NewProject, Project, ProjectDeleted, ProjectQuery, UpdateProject, ViewRecorded},
    },
};

pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Admin password held only for the lifetime of a dashboard session and
/// attached per request. Wiped on drop.
#[derive(Clone)]
pub struct AdminCredential(Zeroizing<String>);

impl AdminCredential {
    pub fn new(token: impl Into<String>) -> Self {
        AdminCredential(Zeroizing::new(token.into()))
    }

    fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AdminCredential([REDACTED])")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub database: Option<String>,
}

/// Outcome of a bulk GitHub import.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub requested: usize,
    pub added: Vec<Project>,
    pub failed: Vec<(String, ClientError)>,
}

impl ImportReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn summary(&self) -> String {
        format!("Imported {} of {} repositories", self.added.len(), self.requested)
    }
}

/// Typed HTTP client for the showcase API.
#[derive(Debug, Clone)]
pub struct PortfolioClient {
    http: Client,
    base_url: Url,
    health_timeout: Duration,
}

impl PortfolioClient {
    /// `base_url` is the server origin, e.g. `http://localhost:4000`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder()
            .user_agent(concat!("portfolio-showcase/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(PortfolioClient { http, base_url, health_timeout: DEFAULT_HEALTH_TIMEOUT })
    }

    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(&format!("api/{}", path.trim_start_matches('/')))?)
    }

    fn authorized(request: RequestBuilder, credential: Option<&AdminCredential>) -> RequestBuilder {
        match credential {
            Some(credential) => request.header(ADMIN_TOKEN_HEADER, credential.expose()),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.canonical_reason().unwrap_or("Request failed").to_string(),
        };
        Err(ClientError::Status { status: status.as_u16(), message })
    }

    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        Self::send(self.http.get(self.endpoint("health")?)).await
    }

    /// Health check then project list, both inside the health timeout.
    #[instrument(skip(self, credential))]
    pub async fn connect(&self, credential: Option<&AdminCredential>) -> Result<Vec<Project>, ClientError> {
        let attempt = async {
            self.health().await?;
            self.list_projects(&ProjectQuery::default(), credential).await
        };

        tokio::time::timeout(self.health_timeout, attempt)
            .await
            .map_err(|_| ClientError::Timeout(self.health_timeout))?
    }

    pub async fn list_projects(
        &self,
        query: &ProjectQuery,
        credential: Option<&AdminCredential>,
    ) -> Result<Vec<Project>, ClientError> {
        let request = self.http.get(self.endpoint("projects")?).query(query);
        Self::send(Self::authorized(request, credential)).await
    }

    #[instrument(skip(self, project))]
    pub async fn create_project(&self, project: &NewProject) -> Result<Project, ClientError> {
        Self::send(self.http.post(self.endpoint("projects")?).json(project)).await
    }

    pub async fn delete_project(&self, id: Uuid) -> Result<ProjectDeleted, ClientError> {
        Self::send(self.http.delete(self.endpoint(&format!("projects/{}", id))?)).await
    }

    pub async fn update_project(&self, id: Uuid, patch: &UpdateProject) -> Result<Project, ClientError> {
        Self::send(self.http.patch(self.endpoint(&format!("projects/{}", id))?).json(patch)).await
    }

    /// Failures are logged and swallowed.
    pub async fn track_view(&self, id: Uuid) -> Option<i64> {
        let result: Result<ViewRecorded, ClientError> = async {
            Self::send(self.http.post(self.endpoint(&format!("projects/{}/view", id))?)).await
        }
        .await;

        match result {
            Ok(recorded) => Some(recorded.views),
            Err(e) => {
                tracing::debug!("View tracking for {} failed: {}", id, e);
                None
            }
        }
    }

    /// Records the view without making the caller wait for it.
    pub fn track_view_detached(&self, id: Uuid) {
        let client = self.clone();
        tokio::spawn(async move {
            client.track_view(id).await;
        });
    }

    pub async fn admin_stats(&self, credential: &AdminCredential) -> Result<AdminStats, ClientError> {
        let request = self.http.get(self.endpoint("admin/stats")?);
        Self::send(Self::authorized(request, Some(credential))).await
    }

    pub async fn admin_projects(&self, credential: &AdminCredential) -> Result<Vec<Project>, ClientError> {
        let request = self.http.get(self.endpoint("admin/projects")?);
        Self::send(Self::authorized(request, Some(credential))).await
    }

    pub async fn admin_analytics(
        &self,
        credential: &AdminCredential,
        days: Option<i64>,
    ) -> Result<Analytics, ClientError> {
        let mut request = self.http.get(self.endpoint("admin/analytics")?);
        if let Some(days) = days {
            request = request.query(&[("days", days)]);
        }
        Self::send(Self::authorized(request, Some(credential))).await
    }

    pub async fn sync_github(&self) -> Result<Vec<NewProject>, ClientError> {
        Self::send(self.http.post(self.endpoint("projects/sync-github")?)).await
    }

    /// One create call per candidate, in order. Individual failures are
    /// logged and collected; they do not stop the remaining imports.
    #[instrument(skip(self, candidates), fields(requested = candidates.len()))]
    pub async fn import_candidates(&self, candidates: &[NewProject]) -> ImportReport {
        let mut report = ImportReport { requested: candidates.len(), ..Default::default() };

        for candidate in candidates {
            let title = candidate.title.clone().unwrap_or_default();
            match self.create_project(candidate).await {
                Ok(project) => report.added.push(project),
                Err(e) => {
                    tracing::warn!("Import of {} failed: {}", title, e);
                    report.failed.push((title, e));
                }
            }
        }

        tracing::info!("{}", report.summary());
        report
    }

    pub async fn send_contact(&self, request: &ContactRequest) -> Result<ContactResponse, ClientError> {
        Self::send(self.http.post(self.endpoint("contact")?).json(request)).await
    }
}
