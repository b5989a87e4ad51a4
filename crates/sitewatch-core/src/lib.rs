// sitewatch-core: per-website monitoring state between sitewatch-api and consumers (CLI/TUI).

pub mod api;
pub mod config;
pub mod convert;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod monitor;
pub mod registration;
pub mod report;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use api::WebsiteApi;
pub use config::{ClientConfig, TlsVerification};
pub use dashboard::{Dashboard, DashboardPhase};
pub use error::CoreError;
pub use monitor::{MonitorController, MonitorState, MonitorStatus, POLL_INTERVAL};
pub use registration::RegistrationForm;
pub use report::ReportSummary;
pub use store::WebsiteStore;
pub use stream::WebsiteStream;

pub use sitewatch_api::GraphqlClient;

pub use model::{DisplayState, NewWebsite, Report, StatusSample, Website, WebsiteId};
