// ── Report aggregation ──
//
// Reduces a report's check history to two counters. Code 200 counts as
// uptime, every other code as downtime.

use serde::Serialize;

use crate::model::{Report, StatusSample, WebsiteId};

/// Uptime/downtime counts for one website's history.
///
/// Order-independent: any permutation of the history gives the same
/// summary, and `uptime + downtime` equals the history length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub website_id: WebsiteId,
    pub url: String,
    pub uptime: usize,
    pub downtime: usize,
}

impl ReportSummary {
    pub const UPTIME_LABEL: &'static str = "Uptime";
    pub const DOWNTIME_LABEL: &'static str = "Downtime";

    pub fn from_report(report: &Report) -> Self {
        let (uptime, downtime) = tally(&report.history);
        Self {
            website_id: report.website_id.clone(),
            url: report.url.clone(),
            uptime,
            downtime,
        }
    }

    pub fn total(&self) -> usize {
        self.uptime + self.downtime
    }

    /// `("Uptime", n)` and `("Downtime", m)`, in display order.
    pub fn counters(&self) -> [(&'static str, usize); 2] {
        [
            (Self::UPTIME_LABEL, self.uptime),
            (Self::DOWNTIME_LABEL, self.downtime),
        ]
    }

    /// Share of healthy checks, or `None` for an empty history.
    #[allow(clippy::cast_precision_loss)]
    pub fn uptime_ratio(&self) -> Option<f64> {
        let total = self.total();
        (total > 0).then(|| self.uptime as f64 / total as f64)
    }

    pub fn title(&self) -> String {
        format!("Downtime Report: {}", self.url)
    }
}

fn tally(history: &[StatusSample]) -> (usize, usize) {
    history.iter().fold((0, 0), |(up, down), sample| {
        if sample.is_healthy() {
            (up + 1, down)
        } else {
            (up, down + 1)
        }
    })
}
