// ── Dashboard coordinator ──
//
// Startup sequence (liveness ping, list load) plus the arena of monitor
// controllers keyed by website id. The arena follows the store: new ids
// get a controller, removed ids have theirs retired, surviving ids keep
// the controller they already have.

use std::sync::{Arc, Weak};

use indexmap::IndexMap;
use strum::Display;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::WebsiteApi;
use crate::error::CoreError;
use crate::model::{NewWebsite, WebsiteId};
use crate::monitor::MonitorController;
use crate::store::WebsiteStore;

/// Monitor controllers in list order.
pub type MonitorArena<A> = Arc<IndexMap<WebsiteId, MonitorController<A>>>;

/// Where the dashboard is in its startup sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DashboardPhase {
    /// Liveness ping pending or failed. There is no retry; the dashboard
    /// waits here until restarted.
    #[strum(to_string = "waiting for backend")]
    WaitingForBackend,
    #[strum(to_string = "loading")]
    Loading,
    #[strum(to_string = "ready")]
    Ready,
}

/// Owns the website store and one `MonitorController` per website.
///
/// Cheaply cloneable via `Arc<DashboardInner>`.
pub struct Dashboard<A: WebsiteApi> {
    inner: Arc<DashboardInner<A>>,
}

impl<A: WebsiteApi> Clone for Dashboard<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct DashboardInner<A: WebsiteApi> {
    api: Arc<A>,
    store: Arc<WebsiteStore>,
    phase: watch::Sender<DashboardPhase>,
    monitors: watch::Sender<MonitorArena<A>>,
    cancel: CancellationToken,
}

impl<A: WebsiteApi> Dashboard<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self::with_store(api, Arc::new(WebsiteStore::new()))
    }

    pub fn with_store(api: Arc<A>, store: Arc<WebsiteStore>) -> Self {
        let (phase, _) = watch::channel(DashboardPhase::WaitingForBackend);
        let (monitors, _) = watch::channel(Arc::new(IndexMap::new()));
        Self {
            inner: Arc::new(DashboardInner {
                api,
                store,
                phase,
                monitors,
                cancel: CancellationToken::new(),
            }),
        }
    }

    // ── Accessors ────────────────────────────────────────────────

    pub fn api(&self) -> &Arc<A> {
        &self.inner.api
    }

    pub fn store(&self) -> &Arc<WebsiteStore> {
        &self.inner.store
    }

    pub fn phase(&self) -> DashboardPhase {
        *self.inner.phase.borrow()
    }

    pub fn subscribe_phase(&self) -> watch::Receiver<DashboardPhase> {
        self.inner.phase.subscribe()
    }

    /// Current arena snapshot, in list order.
    pub fn monitors(&self) -> MonitorArena<A> {
        self.inner.monitors.borrow().clone()
    }

    /// Notified whenever a controller is added or retired.
    pub fn subscribe_monitors(&self) -> watch::Receiver<MonitorArena<A>> {
        self.inner.monitors.subscribe()
    }

    pub fn monitor(&self, id: &WebsiteId) -> Option<MonitorController<A>> {
        self.inner.monitors.borrow().get(id).cloned()
    }

    // ── Startup ──────────────────────────────────────────────────

    /// Probe liveness, load the list, and start following the store.
    ///
    /// If the backend cannot be reached the phase stays
    /// `WaitingForBackend` and the ping error is returned. A failed list
    /// load still reaches `Ready` (with nothing to show) and returns the
    /// load error for presentation to surface.
    pub async fn start(&self) -> Result<(), CoreError> {
        self.set_phase(DashboardPhase::WaitingForBackend);
        match self.ping_backend().await {
            Ok(status) => info!(status, "backend is awake"),
            Err(e) => {
                warn!(error = %e, "backend unreachable; waiting");
                return Err(e);
            }
        }

        self.set_phase(DashboardPhase::Loading);
        let loaded = self.load().await;
        spawn_reconciler(&self.inner);
        self.set_phase(DashboardPhase::Ready);
        loaded.map(|_| ())
    }

    /// Plain GET against the service root. Any HTTP status counts.
    pub async fn ping_backend(&self) -> Result<u16, CoreError> {
        debug!("pinging backend");
        self.inner.api.ping().await
    }

    /// Fetch the website list into the store. Returns the entry count.
    pub async fn load(&self) -> Result<usize, CoreError> {
        match self.inner.api.list_websites().await {
            Ok(websites) => {
                let count = websites.len();
                self.inner.store.replace_all(websites);
                self.inner.reconcile();
                info!(count, "websites loaded");
                Ok(count)
            }
            Err(e) => {
                warn!(error = %e, "failed to load websites");
                Err(e)
            }
        }
    }

    /// Bring the arena in line with the store now.
    pub fn reconcile(&self) {
        self.inner.reconcile();
    }

    // ── Operations ───────────────────────────────────────────────

    /// Send `createWebsite`, append the result to the store, and return
    /// its new controller.
    pub async fn register(&self, website: &NewWebsite) -> Result<MonitorController<A>, CoreError> {
        info!(url = %website.url, "registering website");
        let created = self.inner.api.create_website(website).await?;
        let id = created.id.clone();

        if !self.inner.store.append(created) {
            warn!(%id, "created website was already listed");
        }
        self.inner.reconcile();

        self.monitor(&id)
            .ok_or_else(|| CoreError::WebsiteNotFound { id: id.to_string() })
    }

    /// Delete through the website's controller and drop it from the arena.
    pub async fn delete_website(&self, id: &WebsiteId) -> Result<(), CoreError> {
        let monitor = self
            .monitor(id)
            .ok_or_else(|| CoreError::WebsiteNotFound { id: id.to_string() })?;
        monitor.delete().await?;
        self.inner.reconcile();
        Ok(())
    }

    /// Stop every poll timer and the store follower.
    pub fn shutdown(&self) {
        info!("shutting down dashboard");
        self.inner.cancel.cancel();
    }

    fn set_phase(&self, phase: DashboardPhase) {
        self.inner.phase.send_if_modified(|current| {
            if *current == phase {
                return false;
            }
            debug!(from = %current, to = %phase, "dashboard phase");
            *current = phase;
            true
        });
    }
}

impl<A: WebsiteApi> DashboardInner<A> {
    fn reconcile(&self) {
        if self.cancel.is_cancelled() {
            return;
        }
        let websites = self.store.snapshot();

        self.monitors.send_if_modified(|arena| {
            let unchanged = arena.len() == websites.len()
                && arena.keys().zip(websites.iter()).all(|(id, w)| id == &w.id);
            if unchanged {
                return false;
            }

            let mut previous = (**arena).clone();
            let mut next = IndexMap::with_capacity(websites.len());
            for website in &*websites {
                let monitor = previous.shift_remove(&website.id).unwrap_or_else(|| {
                    MonitorController::new(
                        (**website).clone(),
                        Arc::clone(&self.api),
                        Arc::clone(&self.store),
                        &self.cancel,
                    )
                });
                next.insert(website.id.clone(), monitor);
            }
            for (id, retired) in previous {
                debug!(%id, "website left the list");
                retired.retire();
            }

            *arena = Arc::new(next);
            true
        });
    }
}

/// Follow store changes until shutdown.
fn spawn_reconciler<A: WebsiteApi>(inner: &Arc<DashboardInner<A>>) {
    let weak: Weak<DashboardInner<A>> = Arc::downgrade(inner);
    let mut websites = inner.store.subscribe();
    let cancel = inner.cancel.clone();

    tokio::spawn(async move {
        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                changed = websites.changed() => {
                    let (Some(_), Some(inner)) = (changed, weak.upgrade()) else { break };
                    inner.reconcile();
                }
            }
        }
        debug!("store follower stopped");
    });
}
