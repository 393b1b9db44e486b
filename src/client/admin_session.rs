use uuid::Uuid;

use crate::{
    client::{
        api::{AdminCredential, ImportReport, PortfolioClient},
        errors::ClientError,
    },
    entities::{
        admin::{AdminStats, Analytics},
        project::{NewProject, Project, UpdateProject},
    },
};

/// Destructive operations wait here until the admin confirms them.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    Delete { id: Uuid, title: String },
    Import { candidates: Vec<NewProject> },
}

impl PendingAction {
    pub fn prompt(&self) -> String {
        match self {
            PendingAction::Delete { title, .. } => format!("Delete \"{}\"? This cannot be undone.", title),
            PendingAction::Import { candidates } => format!("Import {} repositories from GitHub?", candidates.len()),
        }
    }
}

#[derive(Debug)]
pub enum ActionOutcome {
    Deleted(Uuid),
    Imported(ImportReport),
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    pub stats: AdminStats,
    pub projects: Vec<Project>,
    pub analytics: Analytics,
    pub pending: Option<PendingAction>,
    pub notice: Option<String>,
}

#[derive(Debug, Default)]
pub enum AdminSession {
    #[default]
    LoggedOut,
    LoggedIn {
        credential: AdminCredential,
        dashboard: Box<Dashboard>,
    },
}

impl AdminSession {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, AdminSession::LoggedIn { .. })
    }

    pub fn credential(&self) -> Option<&AdminCredential> {
        match self {
            AdminSession::LoggedIn { credential, .. } => Some(credential),
            AdminSession::LoggedOut => None,
        }
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        match self {
            AdminSession::LoggedIn { dashboard, .. } => Some(dashboard),
            AdminSession::LoggedOut => None,
        }
    }

    async fn load_dashboard(client: &PortfolioClient, credential: &AdminCredential) -> Result<Dashboard, ClientError> {
        let (stats, projects, analytics) = futures::try_join!(
            client.admin_stats(credential),
            client.admin_projects(credential),
            client.admin_analytics(credential, None),
        )?;

        Ok(Dashboard { stats, projects, analytics, pending: None, notice: None })
    }

    /// A rejected password leaves the session logged out.
    pub async fn login(&mut self, client: &PortfolioClient, password: &str) -> Result<(), ClientError> {
        let credential = AdminCredential::new(password);
        let dashboard = Self::load_dashboard(client, &credential).await?;

        *self = AdminSession::LoggedIn { credential, dashboard: Box::new(dashboard) };
        Ok(())
    }

    /// Drops the credential and every fetched record.
    pub fn logout(&mut self) {
        *self = AdminSession::LoggedOut;
    }

    pub async fn refresh(&mut self, client: &PortfolioClient) -> Result<(), ClientError> {
        let AdminSession::LoggedIn { credential, dashboard } = self else {
            return Ok(());
        };

        let mut fresh = Self::load_dashboard(client, credential).await?;
        fresh.notice = dashboard.notice.take();
        **dashboard = fresh;
        Ok(())
    }

    /// Replaces any earlier pending action.
    pub fn request(&mut self, action: PendingAction) {
        if let AdminSession::LoggedIn { dashboard, .. } = self {
            dashboard.pending = Some(action);
        }
    }

    pub fn cancel(&mut self) {
        if let AdminSession::LoggedIn { dashboard, .. } = self {
            dashboard.pending = None;
        }
    }

    pub async fn set_published(&mut self, client: &PortfolioClient, id: Uuid, published: bool) -> Result<(), ClientError> {
        let AdminSession::LoggedIn { dashboard, .. } = self else {
            return Ok(());
        };

        let updated = client.update_project(id, &UpdateProject::publish(published)).await?;
        if let Some(project) = dashboard.projects.iter_mut().find(|p| p.id == id) {
            *project = updated;
        }
        Ok(())
    }

    /// Runs the pending action, then refreshes the dashboard. A failed
    /// refresh is logged; the outcome of the action is still returned.
    pub async fn confirm(&mut self, client: &PortfolioClient) -> Result<Option<ActionOutcome>, ClientError> {
        let AdminSession::LoggedIn { dashboard, .. } = self else {
            return Ok(None);
        };
        let Some(action) = dashboard.pending.take() else {
            return Ok(None);
        };

        let outcome = match action {
            PendingAction::Delete { id, .. } => {
                client.delete_project(id).await?;
                dashboard.projects.retain(|p| p.id != id);
                ActionOutcome::Deleted(id)
            }
            PendingAction::Import { candidates } => {
                let report = client.import_candidates(&candidates).await;
                dashboard.notice = Some(report.summary());
                ActionOutcome::Imported(report)
            }
        };

        if let Err(e) = self.refresh(client).await {
            tracing::warn!("Dashboard refresh after action failed: {}", e);
        }
        Ok(Some(outcome))
    }
}
