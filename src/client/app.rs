use uuid::Uuid;

use crate::{
    client::{
        admin_session::AdminSession,
        api::PortfolioClient,
        errors::ClientError,
        forms::{AddProjectForm, ContactForm},
        gallery::Gallery,
        pipeline::{self, TechGroup},
        preferences::{PreferenceStore, Preferences, Theme},
        router::Router,
        view_state::{ViewMode, ViewState},
    },
    entities::project::Project,
};

pub const BACKEND_UNAVAILABLE: &str = "Backend unavailable. Please try again later.";

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadStatus {
    #[default]
    Loading,
    Ready,
    /// Banner text shown instead of the project grid.
    Unavailable(String),
}

/// What the projects page renders for the current state.
#[derive(Debug)]
pub struct ProjectsView<'a> {
    pub tag_options: Vec<String>,
    pub matching: usize,
    pub page: usize,
    pub page_count: usize,
    pub items: Vec<&'a Project>,
    pub groups: Vec<TechGroup<'a>>,
}

/// Everything the showcase front end keeps between renders.
#[derive(Debug, Default)]
pub struct ShowcaseApp {
    pub projects: Vec<Project>,
    pub status: LoadStatus,
    pub view: ViewState,
    pub preferences: Preferences,
    pub admin: AdminSession,
    pub add_form: AddProjectForm,
    pub contact_form: ContactForm,
    pub gallery: Gallery,
    pub router: Router,
}

impl ShowcaseApp {
    /// Restores the view from the location's query string.
    pub fn at_location(location: &str) -> Self {
        let query = location.split_once('?').map(|(_, q)| q).unwrap_or_default();
        ShowcaseApp {
            view: ViewState::from_query(query),
            router: Router::new(location),
            ..Default::default()
        }
    }

    pub async fn load(&mut self, client: &PortfolioClient) {
        self.status = LoadStatus::Loading;

        match client.connect(self.admin.credential()).await {
            Ok(projects) => {
                self.projects = projects;
                self.status = LoadStatus::Ready;
            }
            Err(e) => {
                tracing::warn!("Could not load projects: {}", e);
                self.status = LoadStatus::Unavailable(BACKEND_UNAVAILABLE.to_string());
            }
        }
    }

    pub fn is_admin(&self) -> bool {
        self.admin.is_logged_in()
    }

    pub fn projects_view(&self) -> ProjectsView<'_> {
        let visible = pipeline::visible(&self.projects, self.is_admin());
        let tag_options = pipeline::tag_options(visible.iter().copied());
        let filtered = pipeline::filter(visible, self.view.tag(), self.view.search());
        let sorted = pipeline::sort(filtered, self.view.sort());

        let page = pipeline::clamp_page(self.view.page(), sorted.len());
        let (items, groups) = match self.view.view_mode() {
            ViewMode::Grid => (pipeline::paginate(&sorted, page).to_vec(), Vec::new()),
            ViewMode::Grouped => (Vec::new(), pipeline::group_by_tech(&sorted)),
        };

        ProjectsView {
            tag_options,
            matching: sorted.len(),
            page,
            page_count: pipeline::page_count(sorted.len()),
            items,
            groups,
        }
    }

    /// Mirrors the view state into the current history entry.
    pub fn sync_location(&mut self) {
        let path = self.router.pathname();
        let query = self.view.to_query();
        let location = if query.is_empty() { path } else { format!("{}?{}", path, query) };
        self.router.replace(&location);
    }

    /// Returns the external link to open; the view is recorded in the background.
    pub fn open_project(&self, client: &PortfolioClient, id: Uuid) -> Option<String> {
        let project = self.projects.iter().find(|p| p.id == id)?;
        client.track_view_detached(id);
        project.link.clone()
    }

    pub async fn toggle_theme(&mut self, store: &PreferenceStore) -> Result<Theme, ClientError> {
        self.preferences.theme = self.preferences.theme.toggled();
        store.save(&self.preferences).await?;
        Ok(self.preferences.theme)
    }
}
