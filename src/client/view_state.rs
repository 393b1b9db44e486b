use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::client::pipeline::{SortKey, ALL_TAGS};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    Grouped,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::Grouped => "grouped",
        }
    }

    pub fn parse(raw: &str) -> Option<ViewMode> {
        match raw.trim().to_lowercase().as_str() {
            "grid" => Some(ViewMode::Grid),
            "grouped" => Some(ViewMode::Grouped),
            _ => None,
        }
    }
}

/// Filters and paging of the projects page, shareable as a query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    tag: Option<String>,
    search: String,
    sort: SortKey,
    view_mode: ViewMode,
    page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            tag: None,
            search: String::new(),
            sort: SortKey::default(),
            view_mode: ViewMode::default(),
            page: 1,
        }
    }
}

impl ViewState {
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// `"All"` and the empty string clear the filter.
    pub fn set_tag(&mut self, tag: Option<&str>) {
        let tag = tag
            .map(str::trim)
            .filter(|t| !t.is_empty() && *t != ALL_TAGS)
            .map(str::to_string);
        if tag != self.tag {
            self.tag = tag;
            self.page = 1;
        }
    }

    pub fn set_search(&mut self, search: &str) {
        if search != self.search {
            self.search = search.to_string();
            self.page = 1;
        }
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        if sort != self.sort {
            self.sort = sort;
            self.page = 1;
        }
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Default values are left out, so the default state is an empty string.
    pub fn to_query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());

        if let Some(tag) = &self.tag {
            query.append_pair("tag", tag);
        }
        if !self.search.is_empty() {
            query.append_pair("search", &self.search);
        }
        if self.sort != SortKey::default() {
            query.append_pair("sort", self.sort.as_str());
        }
        if self.view_mode != ViewMode::default() {
            query.append_pair("view", self.view_mode.as_str());
        }
        if self.page > 1 {
            query.append_pair("page", &self.page.to_string());
        }

        query.finish()
    }

    /// Unknown keys and unparsable values fall back to the defaults.
    pub fn from_query(query: &str) -> Self {
        let mut state = ViewState::default();
        let mut page = 1;

        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match key.as_ref() {
                "tag" => state.set_tag(Some(value.as_ref())),
                "search" => state.search = value.into_owned(),
                "sort" => state.sort = SortKey::parse(&value).unwrap_or_default(),
                "view" => state.view_mode = ViewMode::parse(&value).unwrap_or_default(),
                "page" => page = value.parse::<usize>().unwrap_or(1),
                _ => {}
            }
        }

        state.set_page(page);
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_has_empty_query() {
        assert_eq!(ViewState::default().to_query(), "");
        assert_eq!(ViewState::from_query(""), ViewState::default());
    }

    #[test]
    fn query_round_trips_non_default_state() {
        let mut state = ViewState::default();
        state.set_tag(Some("Data Viz"));
        state.set_search("dash & board");
        state.set_sort(SortKey::Name);
        state.set_view_mode(ViewMode::Grouped);
        state.set_page(3);

        let query = state.to_query();
        assert!(query.contains("tag=Data+Viz"));
        assert_eq!(ViewState::from_query(&format!("?{}", query)), state);
    }

    #[test]
    fn changing_filters_resets_page() {
        let mut state = ViewState::default();

        state.set_page(4);
        state.set_tag(Some("rust"));
        assert_eq!(state.page(), 1);

        state.set_page(4);
        state.set_search("cli");
        assert_eq!(state.page(), 1);

        state.set_page(4);
        state.set_sort(SortKey::Oldest);
        assert_eq!(state.page(), 1);

        state.set_page(4);
        state.set_view_mode(ViewMode::Grouped);
        state.set_sort(SortKey::Oldest);
        assert_eq!(state.page(), 4, "unchanged values and view mode keep the page");
    }

    #[test]
    fn all_tag_clears_filter() {
        let mut state = ViewState::default();
        state.set_tag(Some("rust"));
        state.set_tag(Some(ALL_TAGS));
        assert_eq!(state.tag(), None);
    }

    #[test]
    fn garbage_values_fall_back_to_defaults() {
        let state = ViewState::from_query("sort=random&view=list&page=-2&utm=x");
        assert_eq!(state, ViewState::default());
    }
}
