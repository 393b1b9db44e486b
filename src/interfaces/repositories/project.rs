use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    entities::{
        admin::{CountFilter, ViewedProject},
        project::{Project, ProjectInsert, UpdateProject},
        project_view::ProjectView,
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

/// Storage for projects and their view events.
///
/// Missing ids surface as [`AppError::StoreError`], the same as any other
/// store failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError>;
    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError>;
    async fn update_project(&self, id: &Uuid, patch: &UpdateProject) -> Result<Project, AppError>;
    /// Appends a view event and increments the counter as one unit; returns the new count.
    async fn record_view(&self, id: &Uuid) -> Result<i64, AppError>;
    async fn list_projects(&self) -> Result<Vec<Project>, AppError>;
    async fn list_projects_newest_first(&self) -> Result<Vec<Project>, AppError>;
    async fn count_projects(&self, filter: CountFilter) -> Result<i64, AppError>;
    async fn total_views(&self) -> Result<i64, AppError>;
    async fn most_viewed(&self, limit: i64) -> Result<Vec<ViewedProject>, AppError>;
    /// Newest first, at most `limit` events.
    async fn views_since(&self, since: DateTime<Utc>, limit: i64) -> Result<Vec<ProjectView>, AppError>;
    async fn check_connection(&self) -> Result<(), AppError>;
}

impl SqlxProjectRepo {
    pub fn new(pool: PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

fn published_predicate(filter: CountFilter) -> Option<bool> {
    match filter {
        CountFilter::All => None,
        CountFilter::Published => Some(true),
        CountFilter::Drafts => Some(false),
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError> {
        let created = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (
                title, description, link, image, images, tech, tags,
                category, published, github_stars, github_forks
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#
        )
        .bind(&project.title)
        .bind(&project.description)
        .bind(&project.link)
        .bind(&project.image)
        .bind(&project.images)
        .bind(&project.tech)
        .bind(&project.tags)
        .bind(&project.category)
        .bind(project.published)
        .bind(project.github_stars)
        .bind(project.github_forks)
        .fetch_one(&self.pool)
        .await?;

        Ok(created)
    }

    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::StoreError(format!("Project {} not found", id)));
        }

        Ok(())
    }

    async fn update_project(&self, id: &Uuid, patch: &UpdateProject) -> Result<Project, AppError> {
        // COALESCE keeps columns the patch leaves out; GREATEST keeps views monotonic
        let updated = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects SET
                published = COALESCE($1, published),
                views = GREATEST(views, COALESCE($2, views))
            WHERE id = $3
            RETURNING *
            "#
        )
        .bind(patch.published)
        .bind(patch.views)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::StoreError(format!("Project {} not found", id)))?;

        Ok(updated)
    }

    async fn record_view(&self, id: &Uuid) -> Result<i64, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO project_views (project_id) VALUES ($1)")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let views: i64 = sqlx::query_scalar(
            "UPDATE projects SET views = views + 1 WHERE id = $1 RETURNING views"
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(views)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<_, Project>(
            "SELECT * FROM projects ORDER BY created_at ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn list_projects_newest_first(&self) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<_, Project>(
            "SELECT * FROM projects ORDER BY created_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn count_projects(&self, filter: CountFilter) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM projects
            WHERE ($1::boolean IS NULL OR published = $1)
            "#
        )
        .bind(published_predicate(filter))
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn total_views(&self) -> Result<i64, AppError> {
        let total: i64 = sqlx::query_scalar("SELECT COALESCE(SUM(views), 0)::BIGINT FROM projects")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn most_viewed(&self, limit: i64) -> Result<Vec<ViewedProject>, AppError> {
        let projects = sqlx::query_as::<_, ViewedProject>(
            "SELECT id, title, views FROM projects ORDER BY views DESC, created_at DESC LIMIT $1"
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn views_since(&self, since: DateTime<Utc>, limit: i64) -> Result<Vec<ProjectView>, AppError> {
        let views = sqlx::query_as::<_, ProjectView>(
            r#"
            SELECT id, project_id, viewed_at
            FROM project_views
            WHERE viewed_at >= $1
            ORDER BY viewed_at DESC
            LIMIT $2
            "#
        )
        .bind(since)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(views)
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
