use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    constants::DEFAULT_CATEGORY,
    entities::string_list::{comma_list, image_list, pipe_list},
    errors::AppError,
};

// ───── Database Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub link: Option<String>,
    pub image: Option<String>,
    #[serde(default, deserialize_with = "image_list")]
    pub images: Vec<String>,
    #[serde(default, deserialize_with = "comma_list")]
    pub tech: Vec<String>,
    #[serde(default, deserialize_with = "pipe_list")]
    pub tags: Vec<String>,
    pub category: String,
    pub published: bool,
    pub views: i64,
    pub github_stars: Option<i32>,
    pub github_forks: Option<i32>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Project {
    /// Case-insensitive membership in the project's own tag list.
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.trim().to_lowercase();
        self.tags.iter().any(|t| t.trim().to_lowercase() == wanted)
    }

    /// Case-insensitive substring match on title or description.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }

    pub fn is_draft(&self) -> bool {
        !self.published
    }

    pub fn all_images(&self) -> Vec<String> {
        self.image.iter()
            .chain(self.images.iter())
            .filter(|s| !s.is_empty())
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ProjectInsert {
    pub title: String,
    pub description: String,
    pub link: Option<String>,
    pub image: Option<String>,
    pub images: Vec<String>,
    pub tech: Vec<String>,
    pub tags: Vec<String>,
    pub category: String,
    pub published: bool,
    pub github_stars: Option<i32>,
    pub github_forks: Option<i32>,
}

// ───── Request Models ────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewProject {
    #[validate(
        required(message = "title is required"),
        length(min = 1, message = "title is required")
    )]
    pub title: Option<String>,

    #[validate(
        required(message = "description is required"),
        length(min = 1, message = "description is required")
    )]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, deserialize_with = "image_list")]
    pub images: Vec<String>,

    #[serde(default, deserialize_with = "comma_list")]
    pub tech: Vec<String>,

    #[serde(default, deserialize_with = "pipe_list")]
    pub tags: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_stars: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_forks: Option<i32>,
}

impl NewProject {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        NewProject {
            title: Some(title.into()),
            description: Some(description.into()),
            ..Default::default()
        }
    }
}

pub const MISSING_PROJECT_FIELDS: &str = "Title and description are required";

impl TryFrom<NewProject> for ProjectInsert {
    type Error = AppError;

    fn try_from(req: NewProject) -> Result<Self, Self::Error> {
        req.validate()
            .map_err(|e| AppError::validation(MISSING_PROJECT_FIELDS, e))?;

        let (Some(title), Some(description)) = (req.title, req.description) else {
            // validate() rejects both None cases above
            return Err(AppError::InternalError(MISSING_PROJECT_FIELDS.into()));
        };

        Ok(ProjectInsert {
            title,
            description,
            link: non_empty(req.link),
            image: non_empty(req.image),
            images: req.images,
            tech: req.tech,
            tags: req.tags,
            category: non_empty(req.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            published: req.published != Some(false),
            github_stars: req.github_stars,
            github_forks: req.github_forks,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Publish toggle and counter override from the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateProject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<bool>,

    /// Applied as `max(current, views)`: the counter never goes down.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<i64>,
}

impl UpdateProject {
    pub fn publish(published: bool) -> Self {
        UpdateProject { published: Some(published), views: None }
    }

    pub fn is_empty(&self) -> bool {
        self.published.is_none() && self.views.is_none()
    }
}

/// Query string of `GET /api/projects`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectQuery {
    /// Comma-separated, even though stored tags are pipe-separated.
    pub tags: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
}

impl ProjectQuery {
    pub fn requested_tags(&self) -> Vec<String> {
        self.tags
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| t.split(',').map(|tag| tag.trim().to_lowercase()).collect())
            .unwrap_or_default()
    }

    pub fn matches(&self, project: &Project) -> bool {
        let tags = self.requested_tags();
        if !tags.is_empty() && !tags.iter().any(|tag| project.has_tag(tag)) {
            return false;
        }

        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            if project.category != category {
                return false;
            }
        }

        match self.search.as_deref().filter(|s| !s.is_empty()) {
            Some(search) => project.matches_search(search),
            None => true,
        }
    }
}

// ───── Response Models ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewRecorded {
    pub success: bool,
    pub views: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectDeleted {
    pub message: String,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn sample_project(title: &str, tags: &[&str]) -> Project {
        Project {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: format!("About {}", title),
            link: None,
            image: None,
            images: vec![],
            tech: vec![],
            tags: tags.iter().map(|t| t.to_string()).collect(),
            category: DEFAULT_CATEGORY.to_string(),
            published: true,
            views: 0,
            github_stars: None,
            github_forks: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn insert_applies_defaults() {
        let insert = ProjectInsert::try_from(NewProject::new("X", "Y")).unwrap();

        assert_eq!(insert.category, "Other");
        assert!(insert.published);
    }

    #[test]
    fn only_explicit_false_makes_a_draft() {
        let mut req = NewProject::new("X", "Y");
        req.published = Some(false);
        assert!(!ProjectInsert::try_from(req).unwrap().published);

        let mut req = NewProject::new("X", "Y");
        req.published = Some(true);
        assert!(ProjectInsert::try_from(req).unwrap().published);
    }

    #[test]
    fn empty_category_falls_back_to_other() {
        let mut req = NewProject::new("X", "Y");
        req.category = Some(String::new());
        assert_eq!(ProjectInsert::try_from(req).unwrap().category, "Other");
    }

    #[test]
    fn missing_fields_are_reported_by_name() {
        let req = NewProject { title: Some("X".into()), description: Some(String::new()), ..Default::default() };

        match ProjectInsert::try_from(req) {
            Err(AppError::ValidationError { summary, details }) => {
                assert_eq!(summary, MISSING_PROJECT_FIELDS);
                assert_eq!(details.len(), 1);
                assert_eq!(details[0].field, "description");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn request_accepts_legacy_string_fields() {
        let req: NewProject = serde_json::from_value(serde_json::json!({
            "title": "X",
            "description": "Y",
            "tags": "a|b",
            "tech": "Rust,SQL",
            "images": "[\"1.png\"]"
        }))
        .unwrap();

        assert_eq!(req.tags, vec!["a", "b"]);
        assert_eq!(req.tech, vec!["Rust", "SQL"]);
        assert_eq!(req.images, vec!["1.png"]);
    }

    #[test]
    fn query_splits_tags_on_commas() {
        let query = ProjectQuery { tags: Some(" A, web ".into()), ..Default::default() };
        assert_eq!(query.requested_tags(), vec!["a", "web"]);

        // a pipe in the query is not a separator
        let query = ProjectQuery { tags: Some("a|b".into()), ..Default::default() };
        assert!(!query.matches(&sample_project("P", &["a", "b"])));
    }

    #[test]
    fn query_combines_tag_category_and_search() {
        let mut project = sample_project("Rust Parser", &["Compilers"]);
        project.category = "Tools".into();

        let query = ProjectQuery {
            tags: Some("compilers".into()),
            search: Some("PARSER".into()),
            category: Some("Tools".into()),
        };
        assert!(query.matches(&project));

        let query = ProjectQuery { category: Some("tools".into()), ..Default::default() };
        assert!(!query.matches(&project), "category match is exact");
    }

    #[test]
    fn serialized_project_uses_wire_names() {
        let json = serde_json::to_value(sample_project("X", &["a"])).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("github_stars").is_some());
        assert_eq!(json["tags"], serde_json::json!(["a"]));
    }
}
