//! Derived views over a snapshot of the project list.
//!
//! Each stage is a total function: visibility → filter → sort → group or
//! paginate. Stages borrow from the snapshot and never mutate it.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{constants::PROJECTS_PER_PAGE, entities::project::Project};

pub const ALL_TAGS: &str = "All";
pub const UNTAGGED_GROUP: &str = "Untagged";

/// Anything the list filters can match against.
pub trait Searchable {
    fn title(&self) -> &str;
    fn summary(&self) -> &str;
    fn tags(&self) -> &[String];

    fn has_tag_ci(&self, tag: &str) -> bool {
        let wanted = tag.to_lowercase();
        self.tags().iter().any(|t| t.to_lowercase() == wanted)
    }

    fn matches_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title().to_lowercase().contains(&needle)
            || self.summary().to_lowercase().contains(&needle)
    }
}

impl Searchable for Project {
    fn title(&self) -> &str {
        &self.title
    }

    fn summary(&self) -> &str {
        &self.description
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Newest,
    Oldest,
    Name,
    Tech,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::Oldest => "oldest",
            SortKey::Name => "name",
            SortKey::Tech => "tech",
        }
    }

    pub fn parse(raw: &str) -> Option<SortKey> {
        match raw.trim().to_lowercase().as_str() {
            "newest" => Some(SortKey::Newest),
            "oldest" => Some(SortKey::Oldest),
            "name" => Some(SortKey::Name),
            "tech" => Some(SortKey::Tech),
            _ => None,
        }
    }
}

/// Drafts are only visible while an admin credential is held.
pub fn visible(projects: &[Project], is_admin: bool) -> Vec<&Project> {
    projects.iter().filter(|p| is_admin || p.published).collect()
}

/// `None` or `"All"` disables the tag filter; an empty search matches everything.
pub fn filter<'a, T: Searchable>(items: Vec<&'a T>, tag: Option<&str>, search: &str) -> Vec<&'a T> {
    let tag = tag.filter(|t| !t.is_empty() && *t != ALL_TAGS);
    let search = search.trim();

    items
        .into_iter()
        .filter(|item| tag.is_none_or(|t| item.has_tag_ci(t)))
        .filter(|item| search.is_empty() || item.matches_text(search))
        .collect()
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Stable: equal keys keep their incoming order.
pub fn sort<'a>(mut projects: Vec<&'a Project>, key: SortKey) -> Vec<&'a Project> {
    match key {
        SortKey::Newest => projects.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Oldest => projects.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        SortKey::Name => projects.sort_by(|a, b| compare_text(&a.title, &b.title)),
        SortKey::Tech => projects.sort_by(|a, b| compare_text(&a.tech.join(", "), &b.tech.join(", "))),
    }
    projects
}

pub fn page_count(total: usize) -> usize {
    total.div_ceil(PROJECTS_PER_PAGE)
}

/// Pages are 1-based; out-of-range pages clamp to the nearest valid one.
pub fn clamp_page(page: usize, total: usize) -> usize {
    page.clamp(1, page_count(total).max(1))
}

pub fn paginate<T>(items: &[T], page: usize) -> &[T] {
    let page = clamp_page(page, items.len());
    let start = (page - 1) * PROJECTS_PER_PAGE;
    let end = (start + PROJECTS_PER_PAGE).min(items.len());
    &items[start.min(end)..end]
}

#[derive(Debug, Clone, PartialEq)]
pub struct TechGroup<'a> {
    pub label: String,
    pub projects: Vec<&'a Project>,
}

/// One group per tech token; a project with several tokens appears in each.
pub fn group_by_tech<'a>(projects: &[&'a Project]) -> Vec<TechGroup<'a>> {
    let mut groups: Vec<TechGroup<'a>> = Vec::new();

    for project in projects {
        let labels: Vec<&str> = if project.tech.is_empty() {
            vec![UNTAGGED_GROUP]
        } else {
            project.tech.iter().map(String::as_str).collect()
        };

        for label in labels {
            match groups.iter_mut().find(|g| g.label == label) {
                Some(group) => group.projects.push(project),
                None => groups.push(TechGroup { label: label.to_string(), projects: vec![project] }),
            }
        }
    }

    groups.sort_by(|a, b| compare_text(&a.label, &b.label).then_with(|| a.label.cmp(&b.label)));
    groups
}

/// `"All"` followed by every distinct tag in first-seen order.
pub fn tag_options<'a, T: Searchable + 'a>(items: impl IntoIterator<Item = &'a T>) -> Vec<String> {
    let mut options = vec![ALL_TAGS.to_string()];
    for tag in items.into_iter().flat_map(|item| item.tags()) {
        if !options.contains(tag) {
            options.push(tag.clone());
        }
    }
    options
}
