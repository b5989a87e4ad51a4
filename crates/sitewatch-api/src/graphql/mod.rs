// GraphQL surface of the downtime-alert service.

pub mod client;
pub mod operations;
pub mod types;

pub use client::GraphqlClient;
pub use operations::Operation;
pub use types::{CreateWebsiteVars, ReportNode, StatusCheck, WebsiteNode, WireTimestamp};
