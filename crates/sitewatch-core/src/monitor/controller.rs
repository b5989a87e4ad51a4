// ── Per-website monitor controller ──
//
// One instance per website, keyed by id. Wraps the pure `MonitorState`
// with the remote calls, publishes a `MonitorStatus` through a watch
// channel, and owns the cancellable poll timer. The timer exists exactly
// while the display state is monitored.

use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use super::state::MonitorState;
use crate::api::WebsiteApi;
use crate::error::CoreError;
use crate::model::{DisplayState, Website, WebsiteId};
use crate::report::ReportSummary;
use crate::store::WebsiteStore;

/// Fixed status-check cadence while a website is monitored.
pub const POLL_INTERVAL: Duration = Duration::from_secs(10 * 60);

// ── MonitorStatus ────────────────────────────────────────────────

/// What presentation renders for one website.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorStatus {
    pub display: DisplayState,
    /// A start is in flight; both start and stop controls are disabled.
    pub pending: bool,
}

impl MonitorStatus {
    pub fn tooltip(&self) -> &'static str {
        if self.pending {
            "Checking..."
        } else {
            self.display.description()
        }
    }

    pub fn can_start(&self) -> bool {
        !self.pending && self.display == DisplayState::Unmonitored
    }

    pub fn can_stop(&self) -> bool {
        !self.pending && self.display.is_monitored()
    }
}

impl From<&MonitorState> for MonitorStatus {
    fn from(state: &MonitorState) -> Self {
        Self {
            display: state.display(),
            pending: state.is_pending(),
        }
    }
}

// ── MonitorController ────────────────────────────────────────────

/// Owns one website's display state and poll timer.
///
/// Cheaply cloneable via `Arc<MonitorInner>`. The controller's lifetime
/// token is a child of the dashboard's, so dashboard shutdown stops every
/// timer. After [`retire()`](Self::retire) every in-flight result resolves
/// to [`CoreError::Discarded`].
pub struct MonitorController<A: WebsiteApi> {
    inner: Arc<MonitorInner<A>>,
}

impl<A: WebsiteApi> Clone for MonitorController<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: WebsiteApi> fmt::Debug for MonitorController<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonitorController")
            .field("id", &self.inner.website.id)
            .field("status", &self.status())
            .field("retired", &self.is_retired())
            .finish_non_exhaustive()
    }
}

struct MonitorInner<A: WebsiteApi> {
    website: Website,
    api: Arc<A>,
    store: Arc<WebsiteStore>,
    shared: Mutex<Shared>,
    status: watch::Sender<MonitorStatus>,
    lifetime: CancellationToken,
}

struct Shared {
    machine: MonitorState,
    timer: Option<PollTimer>,
    /// Bumped each time a timer is armed; poll results carry the epoch
    /// they were issued under.
    epoch: u64,
}

#[derive(Clone)]
struct PollTimer {
    epoch: u64,
    cancel: CancellationToken,
}

impl<A: WebsiteApi> MonitorController<A> {
    /// Derive the initial state from `website`. A website the server is
    /// already monitoring gets its poll timer armed immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(
        website: Website,
        api: Arc<A>,
        store: Arc<WebsiteStore>,
        parent: &CancellationToken,
    ) -> Self {
        let machine = MonitorState::from_website(&website);
        let lifetime = parent.child_token();
        let timer = machine.display().is_monitored().then(|| PollTimer {
            epoch: 1,
            cancel: lifetime.child_token(),
        });
        let (status, _) = watch::channel(MonitorStatus::from(&machine));

        let inner = Arc::new(MonitorInner {
            website,
            api,
            store,
            shared: Mutex::new(Shared {
                machine,
                timer: timer.clone(),
                epoch: u64::from(timer.is_some()),
            }),
            status,
            lifetime,
        });

        debug!(
            id = %inner.website.id,
            state = %machine.display(),
            "monitor initialised"
        );
        if let Some(timer) = timer {
            spawn_poll(&inner, timer);
        }

        Self { inner }
    }

    // ── Accessors ────────────────────────────────────────────────

    pub fn id(&self) -> &WebsiteId {
        &self.inner.website.id
    }

    /// The website as it was when this controller was created.
    pub fn website(&self) -> &Website {
        &self.inner.website
    }

    pub fn status(&self) -> MonitorStatus {
        *self.inner.status.borrow()
    }

    pub fn display(&self) -> DisplayState {
        self.status().display
    }

    /// Subscribe to status changes. Identical poll results publish nothing.
    pub fn subscribe(&self) -> watch::Receiver<MonitorStatus> {
        self.inner.status.subscribe()
    }

    /// Whether a live poll timer is armed.
    pub async fn is_polling(&self) -> bool {
        let shared = self.inner.shared.lock().await;
        shared
            .timer
            .as_ref()
            .is_some_and(|t| !t.cancel.is_cancelled())
    }

    pub fn is_retired(&self) -> bool {
        self.inner.lifetime.is_cancelled()
    }

    // ── Operations ───────────────────────────────────────────────

    /// Send `startMonitoring`. Only valid while `Unmonitored` and idle.
    ///
    /// A 200 sample yields `Up`; any other code, or no sample, yields
    /// `Down`. On failure the website stays `Unmonitored`.
    pub async fn start_monitoring(&self) -> Result<DisplayState, CoreError> {
        let inner = &self.inner;
        let id = &inner.website.id;
        inner.ensure_live()?;
        {
            let mut shared = inner.shared.lock().await;
            shared.machine.begin_start(id.as_str())?;
            inner.publish(&shared);
        }

        info!(%id, "starting monitoring");
        let result = inner.api.start_monitoring(id).await;

        let mut shared = inner.shared.lock().await;
        if inner.lifetime.is_cancelled() {
            shared.machine.abort_start();
            return Err(inner.discarded());
        }
        match result {
            Ok(sample) => {
                if sample.is_none() {
                    warn!(%id, "startMonitoring returned no status; showing as down");
                }
                let state = shared.machine.finish_start(sample.as_ref());
                sync_timer(inner, &mut shared);
                inner.publish(&shared);
                info!(%id, %state, "monitoring started");
                Ok(state)
            }
            Err(e) => {
                shared.machine.abort_start();
                inner.publish(&shared);
                warn!(%id, error = %e, "startMonitoring failed");
                Err(e)
            }
        }
    }

    /// Send `stopMonitoring`. Only valid while monitored and idle.
    ///
    /// On success the poll timer is cancelled before this returns; a tick
    /// already in flight completes but its result is dropped.
    pub async fn stop_monitoring(&self) -> Result<(), CoreError> {
        let inner = &self.inner;
        let id = &inner.website.id;
        inner.ensure_live()?;
        inner.shared.lock().await.machine.ensure_can_stop(id.as_str())?;

        info!(%id, "stopping monitoring");
        let result = inner.api.stop_monitoring(id).await;

        let mut shared = inner.shared.lock().await;
        if inner.lifetime.is_cancelled() {
            return Err(inner.discarded());
        }
        let updated = result.inspect_err(|e| warn!(%id, error = %e, "stopMonitoring failed"))?;

        shared.machine.finish_stop();
        sync_timer(inner, &mut shared);
        inner.publish(&shared);
        drop(shared);

        inner.store.update(updated);
        info!(%id, "monitoring stopped");
        Ok(())
    }

    /// Fetch the check history and aggregate it. Never touches `display`.
    pub async fn request_report(&self) -> Result<ReportSummary, CoreError> {
        let inner = &self.inner;
        inner.ensure_live()?;

        debug!(id = %inner.website.id, "requesting report");
        let result = inner.api.get_report(&inner.website.id).await;
        if inner.lifetime.is_cancelled() {
            return Err(inner.discarded());
        }
        Ok(ReportSummary::from_report(&result?))
    }

    /// Send `deleteWebsite`. On success the website leaves the store and
    /// this controller is retired; on a `false` answer or an error it
    /// stays live.
    pub async fn delete(&self) -> Result<(), CoreError> {
        let inner = &self.inner;
        let id = &inner.website.id;
        inner.ensure_live()?;

        info!(%id, "deleting website");
        let result = inner.api.delete_website(id).await;
        if inner.lifetime.is_cancelled() {
            return Err(inner.discarded());
        }
        if !result? {
            return Err(CoreError::Rejected {
                message: format!("backend did not delete website {id}"),
            });
        }

        inner.store.remove(id);
        self.retire();
        Ok(())
    }

    /// Cancel the poll timer and discard every later result.
    pub fn retire(&self) {
        if !self.inner.lifetime.is_cancelled() {
            debug!(id = %self.inner.website.id, "retiring monitor");
            self.inner.lifetime.cancel();
        }
    }
}

impl<A: WebsiteApi> MonitorInner<A> {
    fn ensure_live(&self) -> Result<(), CoreError> {
        if self.lifetime.is_cancelled() {
            Err(self.discarded())
        } else {
            Ok(())
        }
    }

    fn discarded(&self) -> CoreError {
        trace!(id = %self.website.id, "discarding result for retired monitor");
        CoreError::Discarded {
            id: self.website.id.to_string(),
        }
    }

    fn publish(&self, shared: &Shared) {
        let next = MonitorStatus::from(&shared.machine);
        self.status.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }

    /// One status check issued under `epoch`.
    async fn poll_once(&self, epoch: u64) {
        let id = &self.website.id;
        debug!(%id, epoch, "checking status");

        let sample = match self.api.check_status(id).await {
            Ok(sample) => sample,
            Err(e) => {
                warn!(%id, error = %e, "status check failed");
                return;
            }
        };

        let mut shared = self.shared.lock().await;
        let current_epoch = shared.timer.as_ref().map(|t| t.epoch);
        if self.lifetime.is_cancelled() || current_epoch != Some(epoch) {
            trace!(%id, epoch, "discarding stale poll result");
            return;
        }
        if shared.machine.apply_sample(&sample) {
            info!(%id, state = %shared.machine.display(), "status changed");
            self.publish(&shared);
        }
    }
}

// ── Poll timer ───────────────────────────────────────────────────

/// Arm or cancel the timer so that it exists iff `display` is monitored.
fn sync_timer<A: WebsiteApi>(inner: &Arc<MonitorInner<A>>, shared: &mut Shared) {
    let monitored = shared.machine.display().is_monitored();
    match (monitored, shared.timer.is_some()) {
        (true, false) => {
            shared.epoch += 1;
            let timer = PollTimer {
                epoch: shared.epoch,
                cancel: inner.lifetime.child_token(),
            };
            shared.timer = Some(timer.clone());
            spawn_poll(inner, timer);
        }
        (false, true) => {
            if let Some(timer) = shared.timer.take() {
                timer.cancel.cancel();
            }
        }
        _ => {}
    }
}

fn spawn_poll<A: WebsiteApi>(inner: &Arc<MonitorInner<A>>, timer: PollTimer) {
    debug!(id = %inner.website.id, epoch = timer.epoch, "arming poll timer");
    let first_tick = Instant::now() + POLL_INTERVAL;
    tokio::spawn(poll_task(Arc::downgrade(inner), timer, first_tick));
}

async fn poll_task<A: WebsiteApi>(
    inner: Weak<MonitorInner<A>>,
    timer: PollTimer,
    first_tick: Instant,
) {
    let mut interval = time::interval_at(first_tick, POLL_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            () = timer.cancel.cancelled() => break,
            _ = interval.tick() => {
                let Some(inner) = inner.upgrade() else { break };
                inner.poll_once(timer.epoch).await;
            }
        }
    }

    trace!(epoch = timer.epoch, "poll timer stopped");
}
