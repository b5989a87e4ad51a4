// Wire types for the downtime-alert GraphQL schema.
//
// Field names follow the server's camelCase (including its `monitered`
// spelling). Everything here is a faithful mirror of the JSON; domain
// normalisation happens in `sitewatch-core`.

use serde::{Deserialize, Deserializer, Serialize};

/// A website node as returned by `getWebsites`, `createWebsite` and
/// `stopMonitoring`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteNode {
    #[serde(deserialize_with = "de_graphql_id")]
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub monitered: Option<bool>,
    #[serde(default)]
    pub latest_status: Option<i32>,
}

/// One health-check result (`checkStatus`, `startMonitoring`, report history).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCheck {
    pub status_code: i32,
    #[serde(default)]
    pub timestamp: Option<WireTimestamp>,
}

/// Timestamps arrive either as epoch-millisecond numbers, numeric strings,
/// or RFC 3339 text depending on the server's scalar serialisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireTimestamp {
    Millis(i64),
    Fractional(f64),
    Text(String),
}

/// Payload of the `getReport` mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportNode {
    #[serde(deserialize_with = "de_graphql_id")]
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub history: Vec<StatusCheck>,
}

// ── Variables ────────────────────────────────────────────────────────

/// Variables for every operation keyed on a single website.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteIdVars<'a> {
    pub website_id: &'a str,
}

/// Variables for `createWebsite`. Absent optionals are sent as `null`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateWebsiteVars<'a> {
    pub url: &'a str,
    pub email: Option<&'a str>,
    pub title: Option<&'a str>,
}

/// Operations without variables.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NoVars {}

// ── Helpers ──────────────────────────────────────────────────────────

/// GraphQL `ID` is serialised as a string but some servers emit integers.
fn de_graphql_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
