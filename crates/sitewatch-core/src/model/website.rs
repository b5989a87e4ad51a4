// ── Website domain types ──

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned opaque website identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WebsiteId(String);

impl WebsiteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WebsiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WebsiteId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for WebsiteId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A registered website, mirrored from the server.
///
/// `monitered` keeps the server's spelling. The client never invents
/// `monitered` or `latest_status`; both come from the last server answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Website {
    pub id: WebsiteId,
    pub url: String,
    pub title: Option<String>,
    pub monitered: bool,
    pub latest_status: Option<i32>,
}

impl Website {
    /// Title when set, otherwise the url.
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.url)
    }
}

/// A validated registration, ready to send as `createWebsite`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWebsite {
    pub url: String,
    pub title: Option<String>,
    pub email: Option<String>,
}
