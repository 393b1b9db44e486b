use serde::{Deserialize, Serialize};

use crate::entities::project::NewProject;

pub const GITHUB_CATEGORY: &str = "GitHub";
pub const GITHUB_TAG: &str = "github";

/// Subset of the GitHub "list repositories for a user" payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubRepo {
    pub name: String,
    pub description: Option<String>,
    pub html_url: String,
    pub language: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub stargazers_count: i64,
    #[serde(default)]
    pub forks_count: i64,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub archived: bool,
}

impl GithubRepo {
    /// Project-shaped candidate; the caller decides whether to persist it.
    pub fn to_candidate(&self) -> NewProject {
        NewProject {
            title: Some(self.name.clone()),
            description: Some(
                self.description
                    .clone()
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| "No description".to_string()),
            ),
            link: Some(self.html_url.clone()),
            image: None,
            images: vec![],
            tech: vec![self.language.clone().unwrap_or_else(|| "Other".to_string())],
            tags: vec![GITHUB_TAG.to_string()],
            category: Some(GITHUB_CATEGORY.to_string()),
            published: None,
            github_stars: Some(clamp_count(self.stargazers_count)),
            github_forks: Some(clamp_count(self.forks_count)),
        }
    }
}

fn clamp_count(count: i64) -> i32 {
    i32::try_from(count.max(0)).unwrap_or(i32::MAX)
}

/// Forks are never offered for import.
pub fn candidates_from(repos: &[GithubRepo]) -> Vec<NewProject> {
    repos.iter()
        .filter(|repo| !repo.fork)
        .map(GithubRepo::to_candidate)
        .collect()
}
