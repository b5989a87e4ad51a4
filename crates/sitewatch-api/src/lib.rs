// sitewatch-api: Async Rust client for the downtime-alert GraphQL service

pub mod error;
pub mod graphql;
pub mod transport;

pub use error::Error;
pub use graphql::{
    CreateWebsiteVars, GraphqlClient, ReportNode, StatusCheck, WebsiteNode, WireTimestamp,
};
pub use transport::{TlsMode, TransportConfig};
