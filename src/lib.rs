use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod client;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, middlewares, routes};
pub use infrastructure::{db, github, mail, utils, web};

use errors::AppError;
use github::{client::GithubClient, source::RepoSource};
use mail::{mailer::Mailer, smtp::SmtpMailer};
use repositories::{memory::InMemoryProjectRepo, project::ProjectRepository, sqlx_repo::SqlxProjectRepo};
use settings::AppConfig;
use use_cases::{
    admin::AdminHandler,
    admin_guard::AdminGuard,
    contact::ContactHandler,
    github::GithubSyncHandler,
    projects::ProjectHandler,
};

pub struct AppState {
    pub project_handler: ProjectHandler,
    pub admin_handler: AdminHandler,
    pub github_handler: GithubSyncHandler,
    pub contact_handler: ContactHandler,
    pub admin_guard: AdminGuard,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        project_repo: Arc<dyn ProjectRepository>,
        mailer: Arc<dyn Mailer>,
        repo_source: Arc<dyn RepoSource>,
    ) -> Self {
        AppState {
            project_handler: ProjectHandler::new(project_repo.clone()),
            admin_handler: AdminHandler::new(project_repo),
            github_handler: GithubSyncHandler::new(repo_source, config.github_credentials()),
            contact_handler: ContactHandler::new(mailer),
            admin_guard: AdminGuard::new(config.admin_secret()),
        }
    }

    /// Wires the production collaborators: the given store, SMTP and GitHub.
    pub fn with_store(config: &AppConfig, project_repo: Arc<dyn ProjectRepository>) -> Result<Self, AppError> {
        let mailer = SmtpMailer::new(config)?;
        let repo_source = GithubClient::new(&config.github_api_url)?;

        Ok(AppState::new(config, project_repo, Arc::new(mailer), Arc::new(repo_source)))
    }
}

/// Postgres unless the database URL selects the in-memory store.
pub async fn build_project_store(config: &AppConfig) -> Result<Arc<dyn ProjectRepository>, AppError> {
    if config.uses_memory_store() {
        tracing::warn!("Using the in-memory project store; data is lost on restart");
        return Ok(Arc::new(InMemoryProjectRepo::new()));
    }

    let pool = db::postgres::create_pool(&config.database_url).await?;
    db::postgres::run_migrations(&pool).await?;

    Ok(Arc::new(SqlxProjectRepo::new(pool)))
}
