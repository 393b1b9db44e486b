pub mod admin;
pub mod admin_guard;
pub mod contact;
pub mod extractors;
pub mod github;
pub mod projects;
