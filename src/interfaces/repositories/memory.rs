use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::{
    entities::{
        admin::{CountFilter, ViewedProject},
        project::{Project, ProjectInsert, UpdateProject},
        project_view::ProjectView,
    },
    errors::AppError,
    repositories::project::ProjectRepository,
};

#[derive(Debug, Clone)]
struct StoredProject {
    seq: u64,
    project: Project,
}

/// Process-local store used by the test suite and database-less development.
///
/// The counter increment and the event append happen while the project's
/// map entry is locked, so concurrent views of one project never lose updates.
#[derive(Clone, Default)]
pub struct InMemoryProjectRepo {
    projects: Arc<DashMap<Uuid, StoredProject>>,
    views: Arc<Mutex<Vec<ProjectView>>>,
    next_seq: Arc<AtomicU64>,
}

impl InMemoryProjectRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn not_found(id: &Uuid) -> AppError {
        AppError::StoreError(format!("Project {} not found", id))
    }

    /// Insertion order, which also orders equal timestamps.
    fn snapshot(&self) -> Vec<StoredProject> {
        let mut stored: Vec<StoredProject> = self.projects
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        stored.sort_by_key(|s| s.seq);
        stored
    }

    pub fn view_events(&self) -> Vec<ProjectView> {
        self.views.lock().clone()
    }
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepo {
    async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError> {
        let created = Project {
            id: Uuid::new_v4(),
            title: project.title.clone(),
            description: project.description.clone(),
            link: project.link.clone(),
            image: project.image.clone(),
            images: project.images.clone(),
            tech: project.tech.clone(),
            tags: project.tags.clone(),
            category: project.category.clone(),
            published: project.published,
            views: 0,
            github_stars: project.github_stars,
            github_forks: project.github_forks,
            created_at: Utc::now(),
        };

        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        self.projects.insert(created.id, StoredProject { seq, project: created.clone() });

        Ok(created)
    }

    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError> {
        self.projects.remove(id).ok_or_else(|| Self::not_found(id))?;
        self.views.lock().retain(|v| v.project_id != *id);
        Ok(())
    }

    async fn update_project(&self, id: &Uuid, patch: &UpdateProject) -> Result<Project, AppError> {
        let mut entry = self.projects.get_mut(id).ok_or_else(|| Self::not_found(id))?;
        let project = &mut entry.project;

        if let Some(published) = patch.published {
            project.published = published;
        }
        if let Some(views) = patch.views {
            project.views = project.views.max(views);
        }

        Ok(project.clone())
    }

    async fn record_view(&self, id: &Uuid) -> Result<i64, AppError> {
        let mut entry = self.projects.get_mut(id).ok_or_else(|| Self::not_found(id))?;

        self.views.lock().push(ProjectView {
            id: Uuid::new_v4(),
            project_id: *id,
            viewed_at: Utc::now(),
        });
        entry.project.views += 1;

        Ok(entry.project.views)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        Ok(self.snapshot().into_iter().map(|s| s.project).collect())
    }

    async fn list_projects_newest_first(&self) -> Result<Vec<Project>, AppError> {
        let mut stored = self.snapshot();
        stored.sort_by(|a, b| {
            b.project.created_at
                .cmp(&a.project.created_at)
                .then(b.seq.cmp(&a.seq))
        });
        Ok(stored.into_iter().map(|s| s.project).collect())
    }

    async fn count_projects(&self, filter: CountFilter) -> Result<i64, AppError> {
        let count = self.projects
            .iter()
            .filter(|entry| match filter {
                CountFilter::All => true,
                CountFilter::Published => entry.project.published,
                CountFilter::Drafts => !entry.project.published,
            })
            .count();

        Ok(count as i64)
    }

    async fn total_views(&self) -> Result<i64, AppError> {
        Ok(self.projects.iter().map(|entry| entry.project.views).sum())
    }

    async fn most_viewed(&self, limit: i64) -> Result<Vec<ViewedProject>, AppError> {
        let mut stored = self.snapshot();
        stored.sort_by(|a, b| {
            b.project.views
                .cmp(&a.project.views)
                .then(b.project.created_at.cmp(&a.project.created_at))
        });

        Ok(stored
            .into_iter()
            .take(limit.max(0) as usize)
            .map(|s| ViewedProject {
                id: s.project.id,
                title: s.project.title,
                views: s.project.views,
            })
            .collect())
    }

    async fn views_since(&self, since: DateTime<Utc>, limit: i64) -> Result<Vec<ProjectView>, AppError> {
        let views = self.views.lock();
        Ok(views
            .iter()
            .rev()
            .filter(|v| v.viewed_at >= since)
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        Ok(())
    }
}
