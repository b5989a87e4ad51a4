//! Data bridge: connects the [`Dashboard`] to TUI actions.
//!
//! Runs as a background task. Drives the startup sequence, then forwards
//! every phase transition and arena change as an [`Action`] through the
//! TUI's action channel. Per-website status is read straight from the
//! controllers at render time.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use sitewatch_core::{CoreError, Dashboard, DashboardPhase, GraphqlClient};

use crate::action::{Action, Notification};

pub async fn spawn_data_bridge(
    dashboard: Dashboard<GraphqlClient>,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut phase = dashboard.subscribe_phase();
    let mut monitors = dashboard.subscribe_monitors();
    let _ = action_tx.send(Action::PhaseChanged(*phase.borrow_and_update()));

    let startup = dashboard.start();
    tokio::pin!(startup);
    let mut started = false;

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            result = &mut startup, if !started => {
                started = true;
                if let Some(action) = startup_outcome(result, dashboard.phase()) {
                    let _ = action_tx.send(action);
                }
            }
            Ok(()) = phase.changed() => {
                let current = *phase.borrow_and_update();
                let _ = action_tx.send(Action::PhaseChanged(current));
            }
            Ok(()) = monitors.changed() => {
                let arena = monitors.borrow_and_update().clone();
                let _ = action_tx.send(Action::MonitorsUpdated(arena));
            }
        }
    }

    debug!("data bridge stopped");
}

/// What, if anything, to tell the user once startup has settled.
fn startup_outcome(result: Result<(), CoreError>, phase: DashboardPhase) -> Option<Action> {
    let err = result.err()?;
    warn!(error = %err, %phase, "dashboard startup failed");
    Some(if phase == DashboardPhase::WaitingForBackend {
        Action::BackendUnreachable(err.to_string())
    } else {
        Action::Notify(Notification::error(format!(
            "Could not load websites: {err}"
        )))
    })
}
