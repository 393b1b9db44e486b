//! Front-end state for the showcase: an HTTP client for the API plus the
//! pure view logic the pages are rendered from.

pub mod admin_session;
pub mod api;
pub mod app;
pub mod errors;
pub mod forms;
pub mod gallery;
pub mod pipeline;
pub mod preferences;
pub mod router;
pub mod showcase;
pub mod view_state;

pub use api::{AdminCredential, ImportReport, PortfolioClient};
pub use app::{LoadStatus, ShowcaseApp};
pub use errors::ClientError;
