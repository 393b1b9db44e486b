use std::sync::Arc;

use chrono::{Duration, Utc};

use crate::{
    constants::{ANALYTICS_DAILY_WINDOW, ANALYTICS_MOST_VIEWED, ANALYTICS_RECENT_VIEW_CAP, DEFAULT_ANALYTICS_DAYS},
    entities::{
        admin::{views_by_date, AdminStats, Analytics, CountFilter},
        project::Project,
    },
    errors::AppError,
    repositories::project::ProjectRepository,
};

const MAX_ANALYTICS_DAYS: i64 = 365;

pub struct AdminHandler {
    pub project_repo: Arc<dyn ProjectRepository>,
}

impl AdminHandler {
    pub fn new(project_repo: Arc<dyn ProjectRepository>) -> Self {
        AdminHandler { project_repo }
    }

    pub async fn stats(&self) -> Result<AdminStats, AppError> {
        let (total, published, drafts, total_views) = futures::try_join!(
            self.project_repo.count_projects(CountFilter::All),
            self.project_repo.count_projects(CountFilter::Published),
            self.project_repo.count_projects(CountFilter::Drafts),
            self.project_repo.total_views(),
        )?;

        Ok(AdminStats { total, published, drafts, total_views })
    }

    /// Every project including drafts, newest first.
    pub async fn all_projects(&self) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_projects_newest_first().await
    }

    pub async fn analytics(&self, days: Option<i64>) -> Result<Analytics, AppError> {
        let days = days.unwrap_or(DEFAULT_ANALYTICS_DAYS).clamp(1, MAX_ANALYTICS_DAYS);
        let now = Utc::now();

        let (most_viewed, recent) = futures::try_join!(
            self.project_repo.most_viewed(ANALYTICS_MOST_VIEWED),
            self.project_repo.views_since(now - Duration::days(days), ANALYTICS_RECENT_VIEW_CAP),
        )?;

        Ok(Analytics {
            most_viewed,
            recent_views: recent.len() as i64,
            views_by_date: views_by_date(&recent, now, ANALYTICS_DAILY_WINDOW),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        entities::{admin::ViewedProject, project_view::ProjectView},
        repositories::project::MockProjectRepository,
    };
    use mockall::predicate::*;
    use uuid::Uuid;

    #[tokio::test]
    async fn stats_combine_counts_and_views() {
        let mut repo = MockProjectRepository::new();
        repo.expect_count_projects().with(eq(CountFilter::All)).returning(|_| Ok(3));
        repo.expect_count_projects().with(eq(CountFilter::Published)).returning(|_| Ok(2));
        repo.expect_count_projects().with(eq(CountFilter::Drafts)).returning(|_| Ok(1));
        repo.expect_total_views().returning(|| Ok(14));

        let stats = AdminHandler::new(Arc::new(repo)).stats().await.unwrap();
        assert_eq!(stats, AdminStats { total: 3, published: 2, drafts: 1, total_views: 14 });
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let mut repo = MockProjectRepository::new();
        repo.expect_count_projects().returning(|_| Err(AppError::StoreError("down".into())));
        repo.expect_total_views().returning(|| Ok(0));

        let result = AdminHandler::new(Arc::new(repo)).stats().await;
        assert!(matches!(result, Err(AppError::StoreError(_))));
    }

    #[tokio::test]
    async fn analytics_counts_recent_events() {
        let project_id = Uuid::new_v4();
        let mut repo = MockProjectRepository::new();
        repo.expect_most_viewed()
            .with(eq(10))
            .returning(move |_| Ok(vec![ViewedProject { id: project_id, title: "X".into(), views: 2 }]));
        repo.expect_views_since()
            .withf(|_, limit| *limit == 100)
            .returning(move |_, _| {
                Ok(vec![
                    ProjectView { id: Uuid::new_v4(), project_id, viewed_at: Utc::now() },
                    ProjectView { id: Uuid::new_v4(), project_id, viewed_at: Utc::now() },
                ])
            });

        let analytics = AdminHandler::new(Arc::new(repo)).analytics(None).await.unwrap();

        assert_eq!(analytics.most_viewed.len(), 1);
        assert_eq!(analytics.recent_views, 2);
        assert_eq!(analytics.views_by_date.len(), 7);
        assert_eq!(analytics.views_by_date.values().sum::<i64>(), 2);
    }
}
