use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client};
use url::Url;

use crate::{
    entities::github::GithubRepo,
    errors::AppError,
    github::source::RepoSource,
};

const GITHUB_API_VERSION: &str = "2022-11-28";
const REPOS_PER_PAGE: &str = "100";

/// GitHub REST client for `GET /users/{username}/repos`.
#[derive(Clone)]
pub struct GithubClient {
    http: Client,
    api_base: Url,
}

impl GithubClient {
    pub fn new(api_base: &str) -> Result<Self, AppError> {
        let api_base = Url::parse(api_base)
            .map_err(|e| AppError::NotConfigured(format!("Invalid GitHub API URL: {}", e)))?;

        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(GithubClient { http, api_base })
    }

    pub fn repos_url(&self, username: &str) -> Result<Url, AppError> {
        let path = format!("users/{}/repos", urlencoding::encode(username));
        let mut url = self.api_base
            .join(&path)
            .map_err(|e| AppError::UpstreamError(format!("Invalid repos URL: {}", e)))?;

        url.query_pairs_mut()
            .append_pair("per_page", REPOS_PER_PAGE)
            .append_pair("sort", "updated");

        Ok(url)
    }
}

#[async_trait]
impl RepoSource for GithubClient {
    async fn list_user_repos(&self, username: &str, token: &str) -> Result<Vec<GithubRepo>, AppError> {
        let url = self.repos_url(username)?;

        let response = self.http
            .get(url)
            .bearer_auth(token)
            .header(header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamError(format!("GitHub API error: {}", status)));
        }

        Ok(response.json::<Vec<GithubRepo>>().await?)
    }
}
