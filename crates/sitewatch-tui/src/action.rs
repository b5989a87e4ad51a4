//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::fmt;

use sitewatch_core::dashboard::MonitorArena;
use sitewatch_core::{DashboardPhase, GraphqlClient, NewWebsite, ReportSummary, WebsiteId};

/// Controllers for every listed website, in list order.
pub type Monitors = MonitorArena<GraphqlClient>;

/// Notification severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A toast notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Error,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: NotificationLevel::Info,
        }
    }
}

/// Pending confirmation action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteWebsite { id: WebsiteId, name: String },
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteWebsite { name, .. } => {
                write!(f, "Delete {name}? Its history will be lost.")
            }
        }
    }
}

/// Which panel receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Monitors,
    Register,
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),
    Focus(Focus),

    // ── Data Events (from the dashboard) ──────────────────────────
    PhaseChanged(DashboardPhase),
    BackendUnreachable(String),
    MonitorsUpdated(Monitors),

    // ── Monitor Commands ──────────────────────────────────────────
    RequestStart(WebsiteId),
    RequestStop(WebsiteId),
    RequestReport(WebsiteId),
    RequestDelete(WebsiteId),
    Register(NewWebsite),

    // ── Report ────────────────────────────────────────────────────
    ShowReport(ReportSummary),
    CloseReport,

    // ── Confirm Dialog ────────────────────────────────────────────
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,

    // ── Notifications ─────────────────────────────────────────────
    Notify(Notification),
    DismissNotification,
}
