// ── Monitor state machine ──
//
//   Unmonitored --start ok(200)-------> Up
//   Unmonitored --start ok(!=200|none)-> Down
//   Up/Down     --tick 200-------------> Up     (no-op if already Up)
//   Up/Down     --tick !=200-----------> Down   (no-op if already Down)
//   Up/Down     --stop ok--------------> Unmonitored
//
// No I/O here; the controller performs the remote call between
// `begin_*` and `finish_*`.

use crate::error::CoreError;
use crate::model::{DisplayState, StatusSample, Website};

/// Display state plus the in-flight start flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorState {
    display: DisplayState,
    starting: bool,
}

impl MonitorState {
    pub fn new(display: DisplayState) -> Self {
        Self {
            display,
            starting: false,
        }
    }

    pub fn from_website(website: &Website) -> Self {
        Self::new(DisplayState::from_website(website))
    }

    pub fn display(&self) -> DisplayState {
        self.display
    }

    /// A start mutation is in flight; start and stop are both disabled.
    pub fn is_pending(&self) -> bool {
        self.starting
    }

    pub fn can_start(&self) -> bool {
        !self.starting && self.display == DisplayState::Unmonitored
    }

    pub fn can_stop(&self) -> bool {
        !self.starting && self.display.is_monitored()
    }

    // ── Start ────────────────────────────────────────────────────────

    pub fn begin_start(&mut self, id: &str) -> Result<(), CoreError> {
        if self.starting {
            return Err(CoreError::Busy { id: id.to_owned() });
        }
        if self.display.is_monitored() {
            return Err(CoreError::InvalidTransition {
                state: self.display,
                action: "start monitoring",
            });
        }
        self.starting = true;
        Ok(())
    }

    /// Apply a successful start. A missing sample leaves the site `Down`.
    pub fn finish_start(&mut self, sample: Option<&StatusSample>) -> DisplayState {
        self.starting = false;
        self.display = sample.map_or(DisplayState::Down, StatusSample::display_state);
        self.display
    }

    /// The start mutation failed; stay `Unmonitored`.
    pub fn abort_start(&mut self) {
        self.starting = false;
    }

    // ── Stop ─────────────────────────────────────────────────────────

    pub fn ensure_can_stop(&self, id: &str) -> Result<(), CoreError> {
        if self.starting {
            return Err(CoreError::Busy { id: id.to_owned() });
        }
        if !self.display.is_monitored() {
            return Err(CoreError::InvalidTransition {
                state: self.display,
                action: "stop monitoring",
            });
        }
        Ok(())
    }

    pub fn finish_stop(&mut self) {
        self.display = DisplayState::Unmonitored;
    }

    // ── Poll ─────────────────────────────────────────────────────────

    /// Apply a poll result. Returns `true` only when `display` changed.
    ///
    /// Results while `Unmonitored` (or mid-start) are ignored.
    pub fn apply_sample(&mut self, sample: &StatusSample) -> bool {
        if self.starting || !self.display.is_monitored() {
            return false;
        }
        let next = sample.display_state();
        if next == self.display {
            return false;
        }
        self.display = next;
        true
    }
}
