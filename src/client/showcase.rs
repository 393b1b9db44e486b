//! Public showcase list: GitHub repositories enriched with hand-written
//! case studies, or the case studies alone when GitHub is unreachable.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use slug::slugify;

use crate::{
    client::{errors::ClientError, pipeline::Searchable},
    entities::github::GithubRepo,
};

pub const FORK_TAG: &str = "Fork";
pub const ARCHIVED_TAG: &str = "Archived";
const NO_DESCRIPTION: &str = "No description provided.";

static BUNDLED_CATALOG: &str = include_str!("../../data/case_studies.json");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseStudyLinks {
    #[serde(default)]
    pub demo: Option<String>,
    #[serde(default)]
    pub repo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudy {
    pub slug: String,
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub problem: String,
    #[serde(default)]
    pub solution: String,
    #[serde(default)]
    pub stack: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub challenges: String,
    #[serde(default)]
    pub results: String,
    #[serde(default)]
    pub links: CaseStudyLinks,
    #[serde(default)]
    pub featured: bool,
    /// GitHub repository this study describes, when it differs from the slug.
    #[serde(default)]
    pub repo_name: Option<String>,
    #[serde(default)]
    pub screenshots: Vec<String>,
}

impl CaseStudy {
    fn describes(&self, repo_name: &str) -> bool {
        match &self.repo_name {
            Some(name) => name.eq_ignore_ascii_case(repo_name),
            None => self.slug == slugify(repo_name),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CaseStudyCatalog {
    studies: Vec<CaseStudy>,
}

impl CaseStudyCatalog {
    pub fn from_json(raw: &str) -> Result<Self, ClientError> {
        let studies: Vec<CaseStudy> = serde_json::from_str(raw)
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(CaseStudyCatalog { studies })
    }

    /// The catalog shipped with the crate.
    pub fn bundled() -> Result<Self, ClientError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn studies(&self) -> &[CaseStudy] {
        &self.studies
    }

    pub fn by_slug(&self, slug: &str) -> Option<&CaseStudy> {
        self.studies.iter().find(|s| s.slug == slug)
    }

    pub fn by_repo_name(&self, repo_name: &str) -> Option<&CaseStudy> {
        self.studies.iter().find(|s| s.describes(repo_name))
    }

    pub fn featured(&self) -> impl Iterator<Item = &CaseStudy> {
        self.studies.iter().filter(|s| s.featured)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowcaseItem {
    pub title: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub repo_url: String,
    pub stars: i64,
    pub updated_at: String,
    pub slug: Option<String>,
    pub screenshots: Vec<String>,
    pub case_study: Option<CaseStudy>,
}

impl Searchable for ShowcaseItem {
    fn title(&self) -> &str {
        &self.title
    }

    fn summary(&self) -> &str {
        &self.summary
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

fn push_unique(tags: &mut Vec<String>, tag: &str) {
    if !tags.iter().any(|t| t == tag) {
        tags.push(tag.to_string());
    }
}

/// Case-study text wins over repository metadata. Tags are the case-study
/// tags followed by language, topics and status markers, without repeats.
pub fn merge_repo(repo: &GithubRepo, catalog: &CaseStudyCatalog) -> ShowcaseItem {
    let study = catalog.by_repo_name(&repo.name);

    let mut tags = Vec::new();
    let repo_tags = repo.language.iter()
        .chain(repo.topics.iter())
        .map(String::as_str)
        .chain(repo.fork.then_some(FORK_TAG))
        .chain(repo.archived.then_some(ARCHIVED_TAG));
    for tag in study.iter().flat_map(|s| s.tags.iter().map(String::as_str)).chain(repo_tags) {
        if !tag.is_empty() {
            push_unique(&mut tags, tag);
        }
    }

    ShowcaseItem {
        title: study.map_or_else(|| repo.name.clone(), |s| s.title.clone()),
        summary: study
            .map(|s| s.summary.clone())
            .or_else(|| repo.description.clone().filter(|d| !d.is_empty()))
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        tags,
        repo_url: repo.html_url.clone(),
        stars: repo.stargazers_count,
        updated_at: repo.updated_at.clone().unwrap_or_default(),
        slug: study.map(|s| s.slug.clone()),
        screenshots: study.map(|s| s.screenshots.clone()).unwrap_or_default(),
        case_study: study.cloned(),
    }
}

pub fn merge_repos(repos: &[GithubRepo], catalog: &CaseStudyCatalog) -> Vec<ShowcaseItem> {
    repos.iter().map(|repo| merge_repo(repo, catalog)).collect()
}

/// Used when the GitHub listing cannot be fetched.
pub fn local_fallback(catalog: &CaseStudyCatalog) -> Vec<ShowcaseItem> {
    let now = Utc::now().to_rfc3339();

    catalog.studies
        .iter()
        .map(|study| ShowcaseItem {
            title: study.title.clone(),
            summary: study.summary.clone(),
            tags: study.tags.clone(),
            repo_url: study.links.repo.clone().unwrap_or_default(),
            stars: 0,
            updated_at: now.clone(),
            slug: Some(study.slug.clone()),
            screenshots: study.screenshots.clone(),
            case_study: Some(study.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::github::tests::repo;

    #[test]
    fn bundled_catalog_parses() {
        let catalog = CaseStudyCatalog::bundled().unwrap();
        assert_eq!(catalog.studies().len(), 3);
        assert_eq!(catalog.featured().count(), 2);
        assert!(catalog.by_slug("developer-portfolio-platform").is_some());
    }

    #[test]
    fn repo_names_match_by_slug() {
        let catalog = CaseStudyCatalog::bundled().unwrap();
        let study = catalog.by_repo_name("SaaS Analytics Dashboard").unwrap();
        assert_eq!(study.slug, "saas-analytics-dashboard");
        assert!(catalog.by_repo_name("dotfiles").is_none());
    }

    #[test]
    fn case_study_fields_win_and_tags_union() {
        let catalog = CaseStudyCatalog::bundled().unwrap();
        let mut source = repo("saas-analytics-dashboard", false);
        source.language = Some("TypeScript".into());
        source.topics = vec!["dashboard".into()];
        source.archived = true;

        let item = merge_repo(&source, &catalog);

        assert_eq!(item.title, "SaaS Analytics Dashboard");
        assert_eq!(item.slug.as_deref(), Some("saas-analytics-dashboard"));
        assert_eq!(item.tags, vec!["React", "TypeScript", "Data Viz", "dashboard", "Archived"]);
        assert_eq!(item.stars, 12);
        assert!(item.case_study.is_some());
    }

    #[test]
    fn plain_repo_keeps_its_own_metadata() {
        let mut source = repo("dotfiles", true);
        source.description = Some(String::new());

        let item = merge_repo(&source, &CaseStudyCatalog::default());

        assert_eq!(item.title, "dotfiles");
        assert_eq!(item.summary, NO_DESCRIPTION);
        assert_eq!(item.tags, vec!["Rust", "Fork"]);
        assert!(item.slug.is_none());
    }

    #[test]
    fn fallback_lists_every_case_study() {
        let catalog = CaseStudyCatalog::bundled().unwrap();
        let items = local_fallback(&catalog);

        assert_eq!(items.len(), catalog.studies().len());
        assert!(items.iter().all(|i| i.stars == 0 && i.case_study.is_some()));
    }
}
