// ── API-to-domain type conversions ──
//
// Bridges raw `sitewatch_api` wire types into canonical `sitewatch_core::model`
// types. Missing optionals get the server's implied defaults and
// unparseable timestamps become `None`.

use chrono::{DateTime, Utc};

use sitewatch_api::{ReportNode, StatusCheck, WebsiteNode, WireTimestamp};

use crate::model::{Report, StatusSample, Website, WebsiteId};

// ── Helpers ────────────────────────────────────────────────────────

/// Epoch-millisecond number or string, or RFC 3339 text.
fn parse_timestamp(raw: Option<&WireTimestamp>) -> Option<DateTime<Utc>> {
    match raw? {
        WireTimestamp::Millis(ms) => DateTime::from_timestamp_millis(*ms),
        #[allow(clippy::cast_possible_truncation)]
        WireTimestamp::Fractional(ms) => DateTime::from_timestamp_millis(ms.round() as i64),
        WireTimestamp::Text(text) => text
            .parse::<i64>()
            .ok()
            .and_then(DateTime::from_timestamp_millis)
            .or_else(|| {
                DateTime::parse_from_rfc3339(text)
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc))
            }),
    }
}

// ── Conversions ────────────────────────────────────────────────────

impl From<WebsiteNode> for Website {
    fn from(node: WebsiteNode) -> Self {
        Self {
            id: WebsiteId::from(node.id),
            url: node.url,
            title: node.title.filter(|t| !t.is_empty()),
            monitered: node.monitered.unwrap_or(false),
            latest_status: node.latest_status,
        }
    }
}

impl From<StatusCheck> for StatusSample {
    fn from(check: StatusCheck) -> Self {
        Self {
            status_code: check.status_code,
            timestamp: parse_timestamp(check.timestamp.as_ref()),
        }
    }
}

impl From<ReportNode> for Report {
    fn from(node: ReportNode) -> Self {
        Self {
            website_id: WebsiteId::from(node.id),
            url: node.url,
            history: node.history.into_iter().map(StatusSample::from).collect(),
        }
    }
}
