use async_trait::async_trait;

use crate::{entities::github::GithubRepo, errors::AppError};

/// Lists a user's repositories from a code host.
#[async_trait]
pub trait RepoSource: Send + Sync {
    async fn list_user_repos(&self, username: &str, token: &str) -> Result<Vec<GithubRepo>, AppError>;
}
