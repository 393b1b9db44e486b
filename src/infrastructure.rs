pub mod db;
pub mod github;
pub mod mail;
pub mod utils;
pub mod web;
