pub mod admin;
pub mod contact;
pub mod github;
pub mod project;
pub mod project_view;
pub mod string_list;
