// ── Monitoring status types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::website::Website;

/// HTTP status code the server reports for a healthy site.
pub const HEALTHY_STATUS: i32 = 200;

/// What the dashboard shows for one website.
///
/// `Unmonitored` holds exactly when the website is not being polled.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    #[strum(to_string = "not monitored")]
    Unmonitored,
    #[strum(to_string = "up")]
    Up,
    #[strum(to_string = "down")]
    Down,
}

impl DisplayState {
    /// Initial state for a website as the server last described it.
    pub fn from_website(website: &Website) -> Self {
        if !website.monitered {
            Self::Unmonitored
        } else if website.latest_status == Some(HEALTHY_STATUS) {
            Self::Up
        } else {
            Self::Down
        }
    }

    /// `Up` for 200, `Down` for anything else.
    pub fn from_status_code(code: i32) -> Self {
        if code == HEALTHY_STATUS {
            Self::Up
        } else {
            Self::Down
        }
    }

    pub fn is_monitored(self) -> bool {
        self != Self::Unmonitored
    }

    /// One-line explanation shown next to the status light.
    pub fn description(self) -> &'static str {
        match self {
            Self::Up => "This website is up and running.",
            Self::Down => "This website is currently down.",
            Self::Unmonitored => "This website is not being monitered.",
        }
    }
}

/// One health-check result recorded by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSample {
    pub status_code: i32,
    /// `None` when the server sent no timestamp or one we could not parse.
    pub timestamp: Option<DateTime<Utc>>,
}

impl StatusSample {
    pub fn new(status_code: i32) -> Self {
        Self {
            status_code,
            timestamp: None,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status_code == HEALTHY_STATUS
    }

    pub fn display_state(&self) -> DisplayState {
        DisplayState::from_status_code(self.status_code)
    }
}
