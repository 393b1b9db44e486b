pub mod admin;
pub mod contact;
pub mod github;
pub mod home;
pub mod projects;
pub mod system;
