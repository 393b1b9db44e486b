use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

pub const DEFAULT_CATEGORY: &str = "Other";

pub const PROJECTS_PER_PAGE: usize = 9;

/// Matches the window of the analytics query used before it was disabled.
pub const DEFAULT_ANALYTICS_DAYS: i64 = 30;
pub const ANALYTICS_RECENT_VIEW_CAP: i64 = 100;
pub const ANALYTICS_MOST_VIEWED: i64 = 10;
pub const ANALYTICS_DAILY_WINDOW: i64 = 7;
