use std::sync::Arc;

use crate::{
    entities::project::{NewProject, Project, ProjectDeleted, ProjectInsert, ProjectQuery, UpdateProject, ViewRecorded},
    errors::AppError,
    repositories::project::ProjectRepository,
    utils::valid_uuid::valid_uuid,
};

pub struct ProjectHandler {
    pub project_repo: Arc<dyn ProjectRepository>,
}

impl ProjectHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepository>) -> Self {
        ProjectHandler { project_repo }
    }

    /// Validates presence of title and description, then persists with defaults.
    pub async fn create_project(&self, request: NewProject) -> Result<Project, AppError> {
        let insert = ProjectInsert::try_from(request)?;
        self.project_repo.create_project(&insert).await
    }

    pub async fn delete_project(&self, id: &str) -> Result<ProjectDeleted, AppError> {
        let valid_id = valid_uuid(id)?;
        self.project_repo.delete_project(&valid_id).await?;

        Ok(ProjectDeleted {
            message: "Project deleted successfully".to_string(),
        })
    }

    pub async fn update_project(&self, id: &str, patch: &UpdateProject) -> Result<Project, AppError> {
        let valid_id = valid_uuid(id)?;
        self.project_repo.update_project(&valid_id, patch).await
    }

    pub async fn track_view(&self, id: &str) -> Result<ViewRecorded, AppError> {
        let valid_id = valid_uuid(id)?;
        let views = self.project_repo.record_view(&valid_id).await?;

        Ok(ViewRecorded { success: true, views })
    }

    /// Filters in-process over the full catalog. Drafts are kept only for admins.
    pub async fn list_projects(&self, query: &ProjectQuery, include_drafts: bool) -> Result<Vec<Project>, AppError> {
        let projects = self.project_repo.list_projects().await?;

        Ok(projects
            .into_iter()
            .filter(|p| include_drafts || !p.is_draft())
            .filter(|p| query.matches(p))
            .collect())
    }
}
