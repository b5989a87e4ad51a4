// GraphQL HTTP client
//
// Wraps `reqwest::Client` with endpoint construction, `{data, errors}`
// envelope unwrapping, and one typed method per remote operation.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use url::Url;

use super::operations::{self, Operation};
use super::types::{
    CreateWebsiteVars, NoVars, ReportNode, StatusCheck, WebsiteIdVars, WebsiteNode,
};
use crate::error::Error;
use crate::transport::TransportConfig;

/// Standard GraphQL response envelope.
#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

/// Request body sent for every operation.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestBody<'a, V: Serialize> {
    operation_name: &'a str,
    query: &'a str,
    variables: &'a V,
}

/// Async client for the downtime-alert GraphQL service.
///
/// All operations go to a single endpoint (`{base}/graphql` by default).
/// Methods return the unwrapped root field; the envelope is stripped
/// before the caller sees it.
#[derive(Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    base_url: Url,
    endpoint: Url,
}

impl GraphqlClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// `base_url` is the service root (pinged for liveness); `graphql_path`
    /// is appended to it to form the operation endpoint.
    pub fn new(
        base_url: Url,
        graphql_path: &str,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, base_url, graphql_path)
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        graphql_path: &str,
    ) -> Result<Self, Error> {
        let endpoint = endpoint_url(&base_url, graphql_path)?;
        Ok(Self {
            http,
            base_url,
            endpoint,
        })
    }

    /// The service root URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The GraphQL endpoint URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    // ── Liveness ─────────────────────────────────────────────────────

    /// Plain GET against the service root.
    ///
    /// Any HTTP answer counts as "awake" and its status is returned; only
    /// a transport failure is an error. Hosted backends that sleep when
    /// idle take a while to answer the first request.
    pub async fn ping(&self) -> Result<u16, Error> {
        debug!("GET {}", self.base_url);
        let resp = self.http.get(self.base_url.clone()).send().await?;
        Ok(resp.status().as_u16())
    }

    // ── Operations ───────────────────────────────────────────────────

    pub async fn get_websites(&self) -> Result<Vec<WebsiteNode>, Error> {
        self.execute(&operations::GET_WEBSITES, &NoVars {}).await
    }

    pub async fn check_status(&self, website_id: &str) -> Result<StatusCheck, Error> {
        self.execute(&operations::CHECK_STATUS, &WebsiteIdVars { website_id })
            .await
    }

    pub async fn create_website(&self, vars: &CreateWebsiteVars<'_>) -> Result<WebsiteNode, Error> {
        self.execute(&operations::CREATE_WEBSITE, vars).await
    }

    /// Returns the server's boolean verdict; `false` means nothing was deleted.
    pub async fn delete_website(&self, website_id: &str) -> Result<bool, Error> {
        self.execute(&operations::DELETE_WEBSITE, &WebsiteIdVars { website_id })
            .await
    }

    /// The immediate check result, or `None` when the server ran none.
    pub async fn start_monitoring(&self, website_id: &str) -> Result<Option<StatusCheck>, Error> {
        self.execute(&operations::START_MONITORING, &WebsiteIdVars { website_id })
            .await
    }

    pub async fn stop_monitoring(&self, website_id: &str) -> Result<WebsiteNode, Error> {
        self.execute(&operations::STOP_MONITORING, &WebsiteIdVars { website_id })
            .await
    }

    pub async fn get_report(&self, website_id: &str) -> Result<ReportNode, Error> {
        self.execute(&operations::GET_REPORT, &WebsiteIdVars { website_id })
            .await
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// POST one operation and decode its root field.
    async fn execute<V, T>(&self, op: &Operation, variables: &V) -> Result<T, Error>
    where
        V: Serialize + Sync,
        T: DeserializeOwned,
    {
        debug!(operation = op.name, "POST {}", self.endpoint);

        let body = RequestBody {
            operation_name: op.name,
            query: op.document,
            variables,
        };
        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        trace!(operation = op.name, %status, "response received");

        parse_envelope(op, status, &text)
    }
}

/// Unwrap `{data, errors}`, returning the operation's root field.
///
/// GraphQL servers report validation failures as HTTP 400 with an
/// `errors` array, so errors are inspected before the status code.
fn parse_envelope<T: DeserializeOwned>(
    op: &Operation,
    status: reqwest::StatusCode,
    body: &str,
) -> Result<T, Error> {
    let envelope = serde_json::from_str::<Envelope>(body);

    if let Ok(Envelope { errors, .. }) = &envelope {
        if let Some(first) = errors.first() {
            return Err(Error::GraphQl {
                message: first.message.clone(),
                all: errors.iter().map(|e| e.message.clone()).collect(),
            });
        }
    }

    if !status.is_success() {
        return Err(Error::Http {
            status: status.as_u16(),
            body: preview(body).to_owned(),
        });
    }

    let envelope = envelope.map_err(|e| Error::Deserialization {
        message: format!("{e} (body preview: {:?})", preview(body)),
        body: body.to_owned(),
    })?;

    let value = envelope
        .data
        .and_then(|mut data| data.remove(op.field))
        .ok_or(Error::MissingData {
            operation: op.name,
        })?;

    serde_json::from_value(value).map_err(|e| Error::Deserialization {
        message: format!("{}: {e}", op.field),
        body: body.to_owned(),
    })
}

fn preview(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

/// Join the GraphQL path onto the service root.
fn endpoint_url(base: &Url, graphql_path: &str) -> Result<Url, Error> {
    let base = base.as_str().trim_end_matches('/');
    let path = graphql_path.trim_start_matches('/');
    Ok(Url::parse(&format!("{base}/{path}"))?)
}
