#![allow(clippy::unwrap_used)]
// Monitor controller behavior against a scripted backend, on paused time.

mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use common::{FakeApi, website};
use sitewatch_core::{
    CoreError, DisplayState, MonitorController, POLL_INTERVAL, Website, WebsiteId, WebsiteStore,
};

// ── Helpers ─────────────────────────────────────────────────────────

struct Harness {
    api: Arc<FakeApi>,
    store: Arc<WebsiteStore>,
    root: CancellationToken,
}

impl Harness {
    fn new(websites: Vec<Website>) -> Self {
        let store = Arc::new(WebsiteStore::new());
        store.replace_all(websites.clone());
        Self {
            api: Arc::new(FakeApi::with_websites(websites)),
            store,
            root: CancellationToken::new(),
        }
    }

    fn monitor(&self, id: &str) -> MonitorController<FakeApi> {
        let website = (*self.store.get(&WebsiteId::from(id)).unwrap()).clone();
        MonitorController::new(
            website,
            Arc::clone(&self.api),
            Arc::clone(&self.store),
            &self.root,
        )
    }
}

/// Let spawned tasks run until they block.
async fn settle() {
    sleep(Duration::from_millis(1)).await;
}

// ── Timer lifecycle ─────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn monitored_site_polls_every_ten_minutes() {
    let h = Harness::new(vec![website("w1", true, Some(200))]);
    let monitor = h.monitor("w1");

    assert_eq!(monitor.display(), DisplayState::Up);
    assert!(monitor.is_polling().await);

    sleep(POLL_INTERVAL - Duration::from_secs(1)).await;
    assert_eq!(h.api.checks(), 0, "first tick waits a full interval");

    sleep(Duration::from_secs(2)).await;
    assert_eq!(h.api.checks(), 1);

    sleep(POLL_INTERVAL).await;
    assert_eq!(h.api.checks(), 2);
}

#[tokio::test(start_paused = true)]
async fn unmonitored_site_never_polls() {
    let h = Harness::new(vec![website("w1", false, Some(200))]);
    let monitor = h.monitor("w1");

    assert_eq!(monitor.display(), DisplayState::Unmonitored);
    assert!(!monitor.is_polling().await);

    sleep(POLL_INTERVAL * 3).await;
    assert_eq!(h.api.checks(), 0);
}

#[tokio::test(start_paused = true)]
async fn start_poll_stop_end_to_end() {
    let h = Harness::new(vec![website("w1", false, None)]);
    let monitor = h.monitor("w1");
    h.api.set_start(Ok(Some(200)));

    assert_eq!(monitor.start_monitoring().await.unwrap(), DisplayState::Up);
    assert!(monitor.is_polling().await);

    h.api.set_status(500);
    sleep(POLL_INTERVAL + Duration::from_secs(1)).await;
    assert_eq!(h.api.checks(), 1);
    assert_eq!(monitor.display(), DisplayState::Down);

    monitor.stop_monitoring().await.unwrap();
    assert_eq!(monitor.display(), DisplayState::Unmonitored);
    assert!(!monitor.is_polling().await);

    sleep(POLL_INTERVAL * 6).await;
    assert_eq!(h.api.checks(), 1, "no ticks after stop");

    let cached = h.store.get(&WebsiteId::from("w1")).unwrap();
    assert!(!cached.monitered);
}

#[tokio::test(start_paused = true)]
async fn restart_rearms_timer() {
    let h = Harness::new(vec![website("w1", true, Some(200))]);
    let monitor = h.monitor("w1");

    monitor.stop_monitoring().await.unwrap();
    sleep(POLL_INTERVAL / 2).await;

    monitor.start_monitoring().await.unwrap();
    sleep(POLL_INTERVAL - Duration::from_secs(1)).await;
    assert_eq!(h.api.checks(), 0, "new timer counts from the restart");

    sleep(Duration::from_secs(2)).await;
    assert_eq!(h.api.checks(), 1);
}

// ── Start ───────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn start_with_error_code_or_no_sample_is_down() {
    let h = Harness::new(vec![website("w1", false, None), website("w2", false, None)]);

    h.api.set_start(Ok(Some(503)));
    let first = h.monitor("w1");
    assert_eq!(first.start_monitoring().await.unwrap(), DisplayState::Down);

    h.api.set_start(Ok(None));
    let second = h.monitor("w2");
    assert_eq!(second.start_monitoring().await.unwrap(), DisplayState::Down);
    assert!(second.is_polling().await);
}

#[tokio::test(start_paused = true)]
async fn failed_start_stays_unmonitored() {
    let h = Harness::new(vec![website("w1", false, None)]);
    let monitor = h.monitor("w1");
    h.api.set_start(Err("backend exploded"));

    let err = monitor.start_monitoring().await.unwrap_err();

    assert_eq!(err.to_string(), "backend exploded");
    assert_eq!(monitor.display(), DisplayState::Unmonitored);
    assert!(!monitor.status().pending);
    assert!(!monitor.is_polling().await);
}

#[tokio::test(start_paused = true)]
async fn no_timer_while_start_is_pending() {
    let h = Harness::new(vec![website("w1", false, None)]);
    let monitor = h.monitor("w1");
    let release = h.api.gate_next_start();

    let task = tokio::spawn({
        let monitor = monitor.clone();
        async move { monitor.start_monitoring().await }
    });
    settle().await;

    let status = monitor.status();
    assert!(status.pending);
    assert_eq!(status.tooltip(), "Checking...");
    assert!(!status.can_start() && !status.can_stop());
    assert!(!monitor.is_polling().await);

    assert!(matches!(
        monitor.start_monitoring().await,
        Err(CoreError::Busy { .. })
    ));
    assert!(matches!(
        monitor.stop_monitoring().await,
        Err(CoreError::Busy { .. })
    ));

    sleep(POLL_INTERVAL * 2).await;
    assert_eq!(h.api.checks(), 0);
    assert_eq!(h.api.start_calls.load(Ordering::SeqCst), 1);

    release.send(()).unwrap();
    assert_eq!(task.await.unwrap().unwrap(), DisplayState::Up);
    assert!(!monitor.status().pending);
    assert!(monitor.is_polling().await);
}

#[tokio::test(start_paused = true)]
async fn invalid_transitions_send_nothing() {
    let h = Harness::new(vec![website("up", true, Some(200)), website("off", false, None)]);

    let up = h.monitor("up");
    assert!(matches!(
        up.start_monitoring().await,
        Err(CoreError::InvalidTransition { .. })
    ));

    let off = h.monitor("off");
    assert!(matches!(
        off.stop_monitoring().await,
        Err(CoreError::InvalidTransition { .. })
    ));

    assert_eq!(h.api.start_calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.api.stop_calls.load(Ordering::SeqCst), 0);
}

// ── Poll ────────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn identical_poll_results_publish_nothing() {
    let h = Harness::new(vec![website("w1", true, Some(200))]);
    let monitor = h.monitor("w1");
    let mut rx = monitor.subscribe();
    rx.borrow_and_update();

    h.api.set_status(200);
    sleep(POLL_INTERVAL * 3 + Duration::from_secs(1)).await;
    assert_eq!(h.api.checks(), 3);
    assert!(!rx.has_changed().unwrap());

    h.api.set_status(503);
    sleep(POLL_INTERVAL).await;
    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().display, DisplayState::Down);

    sleep(POLL_INTERVAL).await;
    assert!(!rx.has_changed().unwrap());
}

#[tokio::test(start_paused = true)]
async fn stop_discards_in_flight_tick() {
    let h = Harness::new(vec![website("w1", true, Some(200))]);
    let monitor = h.monitor("w1");
    h.api.set_status(500);
    let release = h.api.gate_next_check();

    sleep(POLL_INTERVAL + Duration::from_secs(1)).await;
    assert_eq!(h.api.checks(), 1, "tick is in flight");
    assert_eq!(monitor.display(), DisplayState::Up);

    monitor.stop_monitoring().await.unwrap();
    release.send(()).unwrap();
    settle().await;

    assert_eq!(monitor.display(), DisplayState::Unmonitored);
    assert!(!monitor.is_polling().await);
}

#[tokio::test(start_paused = true)]
async fn tick_from_superseded_timer_is_ignored() {
    let h = Harness::new(vec![website("w1", true, Some(200))]);
    let monitor = h.monitor("w1");
    h.api.set_status(500);
    let release = h.api.gate_next_check();

    sleep(POLL_INTERVAL + Duration::from_secs(1)).await;
    monitor.stop_monitoring().await.unwrap();
    h.api.set_start(Ok(Some(200)));
    monitor.start_monitoring().await.unwrap();

    release.send(()).unwrap();
    settle().await;

    assert_eq!(monitor.display(), DisplayState::Up, "old tick must not win");
    assert!(monitor.is_polling().await);
}

// ── Stop / report / delete ──────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn failed_stop_keeps_polling() {
    let h = Harness::new(vec![website("w1", true, Some(200))]);
    let monitor = h.monitor("w1");
    *h.api.stop_error.lock().unwrap() = Some("nope".into());

    assert!(monitor.stop_monitoring().await.is_err());
    assert_eq!(monitor.display(), DisplayState::Up);
    assert!(monitor.is_polling().await);
}

#[tokio::test(start_paused = true)]
async fn report_leaves_state_alone() {
    let h = Harness::new(vec![website("w1", true, Some(503))]);
    let monitor = h.monitor("w1");
    *h.api.report_codes.lock().unwrap() = vec![200, 500, 200, 0];

    let summary = monitor.request_report().await.unwrap();

    assert_eq!((summary.uptime, summary.downtime), (2, 2));
    assert_eq!(summary.title(), "Downtime Report: http://w1.example");
    assert_eq!(monitor.display(), DisplayState::Down);
}

#[tokio::test(start_paused = true)]
async fn delete_removes_entry_and_retires() {
    let h = Harness::new(vec![
        website("a", false, None),
        website("b", true, Some(200)),
        website("c", false, None),
    ]);
    let monitor = h.monitor("b");

    monitor.delete().await.unwrap();

    let ids: Vec<String> = h.store.snapshot().iter().map(|w| w.id.to_string()).collect();
    assert_eq!(ids, vec!["a", "c"]);
    assert!(monitor.is_retired());
    assert!(!monitor.is_polling().await);
    assert!(monitor.start_monitoring().await.unwrap_err().is_discarded());

    sleep(POLL_INTERVAL * 2).await;
    assert_eq!(h.api.checks(), 0);
}

#[tokio::test(start_paused = true)]
async fn delete_discards_in_flight_tick() {
    let h = Harness::new(vec![website("w1", true, Some(200))]);
    let monitor = h.monitor("w1");
    h.api.set_status(500);
    let release = h.api.gate_next_check();
    let mut rx = monitor.subscribe();
    rx.borrow_and_update();

    sleep(POLL_INTERVAL + Duration::from_secs(1)).await;
    assert_eq!(h.api.checks(), 1, "tick is in flight");

    monitor.delete().await.unwrap();
    release.send(()).unwrap();
    settle().await;

    assert_eq!(monitor.display(), DisplayState::Up, "late sample must not land");
    assert!(!rx.has_changed().unwrap_or(false));
    assert!(monitor.is_retired());
    assert!(!monitor.is_polling().await);
    assert_eq!(h.store.len(), 0);

    sleep(POLL_INTERVAL * 3).await;
    assert_eq!(h.api.checks(), 1);
}

#[tokio::test(start_paused = true)]
async fn refused_delete_keeps_controller() {
    let h = Harness::new(vec![website("a", false, None)]);
    let monitor = h.monitor("a");
    *h.api.delete_answer.lock().unwrap() = Some(false);

    let err = monitor.delete().await.unwrap_err();

    assert!(matches!(err, CoreError::Rejected { .. }));
    assert_eq!(h.store.len(), 1);
    assert!(!monitor.is_retired());
}

#[tokio::test(start_paused = true)]
async fn retire_during_start_discards_result() {
    let h = Harness::new(vec![website("w1", false, None)]);
    let monitor = h.monitor("w1");
    let release = h.api.gate_next_start();

    let task = tokio::spawn({
        let monitor = monitor.clone();
        async move { monitor.start_monitoring().await }
    });
    settle().await;

    monitor.retire();
    release.send(()).unwrap();

    assert!(task.await.unwrap().unwrap_err().is_discarded());
    assert!(!monitor.is_polling().await);
}
