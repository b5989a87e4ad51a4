// ── Per-website monitoring ──
//
// `state` is the pure transition table; `controller` wraps it with the
// remote calls and the cancellable poll timer.

mod controller;
mod state;

pub use controller::{MonitorController, MonitorStatus, POLL_INTERVAL};
pub use state::MonitorState;
