use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::project_view::ProjectView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountFilter {
    All,
    Published,
    Drafts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total: i64,
    pub published: i64,
    pub drafts: i64,
    pub total_views: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ViewedProject {
    pub id: Uuid,
    pub title: String,
    pub views: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub most_viewed: Vec<ViewedProject>,
    pub recent_views: i64,
    pub views_by_date: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsQuery {
    pub days: Option<i64>,
}

/// Zero-filled `YYYY-MM-DD` buckets for the `days` UTC dates ending at `now`,
/// with each event counted in its own date when that date is in range.
pub fn views_by_date(events: &[ProjectView], now: DateTime<Utc>, days: i64) -> BTreeMap<String, i64> {
    let mut buckets: BTreeMap<String, i64> = (0..days)
        .map(|offset| ((now - Duration::days(offset)).format("%Y-%m-%d").to_string(), 0))
        .collect();

    for event in events {
        let key = event.viewed_at.format("%Y-%m-%d").to_string();
        if let Some(count) = buckets.get_mut(&key) {
            *count += 1;
        }
    }

    buckets
}
