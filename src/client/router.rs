//! Path-based page routing with an in-process history stack.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Projects,
    ProjectDetail { slug: String },
    About,
    Resume,
    Contact,
    Admin,
    NotFound { path: String },
}

/// Drops the query and fragment, then any trailing slashes. The root stays `/`.
pub fn normalize_path(location: &str) -> String {
    let path = location.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/');

    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

impl Route {
    pub fn resolve(location: &str) -> Route {
        let path = normalize_path(location);
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["projects"] => Route::Projects,
            ["projects", slug] => Route::ProjectDetail { slug: (*slug).to_string() },
            ["about"] => Route::About,
            ["resume"] => Route::Resume,
            ["contact"] => Route::Contact,
            ["admin"] => Route::Admin,
            _ => Route::NotFound { path },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".into(),
            Route::Projects => "/projects".into(),
            Route::ProjectDetail { slug } => format!("/projects/{}", slug),
            Route::About => "/about".into(),
            Route::Resume => "/resume".into(),
            Route::Contact => "/contact".into(),
            Route::Admin => "/admin".into(),
            Route::NotFound { path } => path.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Router {
    history: Vec<String>,
}

impl Default for Router {
    fn default() -> Self {
        Router::new("/")
    }
}

impl Router {
    pub fn new(initial: &str) -> Self {
        Router { history: vec![initial.to_string()] }
    }

    /// Full location including any query string.
    pub fn location(&self) -> &str {
        self.history.last().map(String::as_str).unwrap_or("/")
    }

    pub fn pathname(&self) -> String {
        normalize_path(self.location())
    }

    pub fn route(&self) -> Route {
        Route::resolve(self.location())
    }

    /// Pushes only when the location differs; returns whether it did.
    pub fn navigate(&mut self, to: &str) -> bool {
        if to == self.location() {
            return false;
        }
        self.history.push(to.to_string());
        true
    }

    /// Rewrites the current entry, e.g. when filters change the query string.
    pub fn replace(&mut self, to: &str) {
        match self.history.last_mut() {
            Some(current) => *current = to.to_string(),
            None => self.history.push(to.to_string()),
        }
    }

    /// The first entry is never popped.
    pub fn back(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            true
        } else {
            false
        }
    }

    /// Nav link highlighting: exact when `end`, otherwise exact or a
    /// descendant path.
    pub fn is_active(&self, to: &str, end: bool) -> bool {
        let current = self.pathname();
        let target = normalize_path(to);

        if current == target {
            return true;
        }
        if end {
            return false;
        }
        current
            .strip_prefix(&target)
            .is_some_and(|rest| rest.starts_with('/'))
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }
}
