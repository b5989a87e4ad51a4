// ── Runtime connection configuration ──
//
// These types describe *how* to reach the downtime-alert backend. They
// never touch disk: the CLI/TUI builds a `ClientConfig` from
// `sitewatch-config` (plus flag overrides) and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use sitewatch_api::transport::{TlsMode, TransportConfig};
use sitewatch_api::GraphqlClient;

use crate::error::CoreError;

/// Hosted backend used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "https://downtime-alert.herokuapp.com";

/// Path of the GraphQL endpoint below the service root.
pub const DEFAULT_GRAPHQL_PATH: &str = "/graphql";

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-hosted backends with self-signed certs).
    DangerAcceptInvalid,
}

/// Everything needed to build a backend client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service root (e.g., `https://downtime-alert.herokuapp.com`).
    pub url: Url,
    /// GraphQL path appended to `url`.
    pub graphql_path: String,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            graphql_path: DEFAULT_GRAPHQL_PATH.into(),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Build the GraphQL client described by this config.
    pub fn build_client(&self) -> Result<GraphqlClient, CoreError> {
        let transport = TransportConfig {
            tls: tls_to_transport(&self.tls),
            timeout: self.timeout,
        };
        Ok(GraphqlClient::new(
            self.url.clone(),
            &self.graphql_path,
            &transport,
        )?)
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
