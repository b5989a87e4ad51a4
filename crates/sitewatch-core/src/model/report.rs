// ── Report domain type ──

use serde::{Deserialize, Serialize};

use super::status::StatusSample;
use super::website::WebsiteId;

/// Full check history for one website, as returned by `getReport`.
///
/// Consumed once by the aggregator; never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub website_id: WebsiteId,
    pub url: String,
    pub history: Vec<StatusSample>,
}
