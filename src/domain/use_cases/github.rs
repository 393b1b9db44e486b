use std::sync::Arc;

use zeroize::Zeroizing;

use crate::{
    entities::{github::candidates_from, project::NewProject},
    errors::AppError,
    github::source::RepoSource,
};

pub const GITHUB_NOT_CONFIGURED: &str =
    "GitHub integration not configured. Set GITHUB_TOKEN and GITHUB_USERNAME in .env";

struct GithubCredentials {
    username: String,
    token: Zeroizing<String>,
}

/// Fetches repositories and maps them to project candidates without persisting.
pub struct GithubSyncHandler {
    source: Arc<dyn RepoSource>,
    credentials: Option<GithubCredentials>,
}

impl GithubSyncHandler {
    pub fn new(source: Arc<dyn RepoSource>, credentials: Option<(String, String)>) -> Self {
        GithubSyncHandler {
            source,
            credentials: credentials.map(|(username, token)| GithubCredentials {
                username,
                token: Zeroizing::new(token),
            }),
        }
    }

    pub async fn sync(&self) -> Result<Vec<NewProject>, AppError> {
        let credentials = self.credentials
            .as_ref()
            .ok_or_else(|| AppError::NotConfigured(GITHUB_NOT_CONFIGURED.to_string()))?;

        let repos = self.source
            .list_user_repos(&credentials.username, credentials.token.as_str())
            .await?;

        let candidates = candidates_from(&repos);
        tracing::info!(
            fetched = repos.len(),
            candidates = candidates.len(),
            "GitHub repositories mapped to project candidates"
        );

        Ok(candidates)
    }
}
