#![allow(clippy::unwrap_used)]
// Dashboard startup, registration and deletion against a scripted backend.

mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tokio::time::sleep;

use common::{FakeApi, website};
use sitewatch_core::{
    CoreError, Dashboard, DashboardPhase, DisplayState, NewWebsite, POLL_INTERVAL,
    RegistrationForm, WebsiteId,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn dashboard(api: FakeApi) -> (Arc<FakeApi>, Dashboard<FakeApi>) {
    let api = Arc::new(api);
    (Arc::clone(&api), Dashboard::new(api))
}

fn arena_ids(dashboard: &Dashboard<FakeApi>) -> Vec<String> {
    dashboard
        .monitors()
        .keys()
        .map(ToString::to_string)
        .collect()
}

fn store_ids(dashboard: &Dashboard<FakeApi>) -> Vec<String> {
    dashboard
        .store()
        .snapshot()
        .iter()
        .map(|w| w.id.to_string())
        .collect()
}

// ── Startup ─────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn unreachable_backend_keeps_waiting() {
    let api = FakeApi::with_websites(vec![website("a", false, None)]);
    *api.ping_fails.lock().unwrap() = true;
    let (_, dashboard) = dashboard(api);

    let err = dashboard.start().await.unwrap_err();

    assert!(matches!(err, CoreError::ConnectionFailed { .. }));
    assert_eq!(dashboard.phase(), DashboardPhase::WaitingForBackend);
    assert!(dashboard.monitors().is_empty());
    assert!(dashboard.store().is_empty());
}

#[tokio::test(start_paused = true)]
async fn start_builds_one_controller_per_website() {
    let (_, dashboard) = dashboard(FakeApi::with_websites(vec![
        website("a", false, Some(200)),
        website("b", true, Some(200)),
        website("c", true, Some(502)),
    ]));

    dashboard.start().await.unwrap();

    assert_eq!(dashboard.phase(), DashboardPhase::Ready);
    assert_eq!(arena_ids(&dashboard), vec!["a", "b", "c"]);
    let states: Vec<DisplayState> = dashboard.monitors().values().map(|m| m.display()).collect();
    assert_eq!(
        states,
        vec![DisplayState::Unmonitored, DisplayState::Up, DisplayState::Down]
    );
}

#[tokio::test(start_paused = true)]
async fn failed_load_shows_nothing() {
    let api = FakeApi::with_websites(vec![website("a", false, None)]);
    *api.list_fails.lock().unwrap() = true;
    let (_, dashboard) = dashboard(api);

    let err = dashboard.start().await.unwrap_err();

    assert_eq!(err.to_string(), "list failed");
    assert_eq!(dashboard.phase(), DashboardPhase::Ready);
    assert!(dashboard.monitors().is_empty());
}

#[tokio::test(start_paused = true)]
async fn empty_list_is_ready_and_empty() {
    let (_, dashboard) = dashboard(FakeApi::default());

    dashboard.start().await.unwrap();

    assert_eq!(dashboard.phase(), DashboardPhase::Ready);
    assert!(dashboard.monitors().is_empty());
}

// ── Registration ────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn registration_appends_once_and_adds_controller() {
    let (api, dashboard) = dashboard(FakeApi::with_websites(vec![website("a", false, None)]));
    dashboard.start().await.unwrap();

    let mut form = RegistrationForm {
        url: " http://new.example ".into(),
        title: "New".into(),
        email: String::new(),
    };
    let submission = form.take_submission().unwrap();
    let monitor = dashboard.register(&submission).await.unwrap();

    assert_eq!(form, RegistrationForm::default());
    assert_eq!(monitor.id().as_str(), "new-1");
    assert_eq!(monitor.display(), DisplayState::Unmonitored);
    assert_eq!(store_ids(&dashboard), vec!["a", "new-1"]);
    assert_eq!(arena_ids(&dashboard), vec!["a", "new-1"]);
    assert_eq!(
        api.created.lock().unwrap().as_slice(),
        &[NewWebsite {
            url: "http://new.example".into(),
            title: Some("New".into()),
            email: None,
        }]
    );
}

#[tokio::test(start_paused = true)]
async fn rejected_registration_sends_nothing() {
    let (api, dashboard) = dashboard(FakeApi::with_websites(vec![website("a", false, None)]));
    dashboard.start().await.unwrap();

    let mut bad_email = RegistrationForm {
        url: "http://new.example".into(),
        title: String::new(),
        email: "nobody@nowhere".into(),
    };
    assert!(matches!(
        bad_email.take_submission(),
        Err(CoreError::InvalidEmail)
    ));
    assert_eq!(bad_email.email, "nobody@nowhere");

    let mut no_url = RegistrationForm::default();
    assert!(!no_url.can_submit());
    assert!(matches!(no_url.take_submission(), Err(CoreError::EmptyUrl)));

    assert_eq!(api.create_calls.load(Ordering::SeqCst), 0);
    assert_eq!(store_ids(&dashboard), vec!["a"]);
}

#[tokio::test(start_paused = true)]
async fn failed_create_leaves_list_untouched() {
    let api = FakeApi::with_websites(vec![website("a", false, None)]);
    *api.create_error.lock().unwrap() = Some("duplicate url".into());
    let (_, dashboard) = dashboard(api);
    dashboard.start().await.unwrap();

    let err = dashboard
        .register(&NewWebsite {
            url: "http://a.example".into(),
            title: None,
            email: None,
        })
        .await
        .err()
        .unwrap();

    assert_eq!(err.to_string(), "duplicate url");
    assert_eq!(store_ids(&dashboard), vec!["a"]);
    assert_eq!(arena_ids(&dashboard), vec!["a"]);
}

// ── Deletion & reconciliation ───────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn delete_drops_one_controller_and_keeps_survivors() {
    let (_, dashboard) = dashboard(FakeApi::with_websites(vec![
        website("a", false, None),
        website("b", true, Some(200)),
        website("c", false, None),
    ]));
    dashboard.start().await.unwrap();

    // Survivors keep their controller: `a`'s local Up state must persist.
    let a = dashboard.monitor(&WebsiteId::from("a")).unwrap();
    a.start_monitoring().await.unwrap();
    let b = dashboard.monitor(&WebsiteId::from("b")).unwrap();

    dashboard.delete_website(&WebsiteId::from("b")).await.unwrap();

    assert_eq!(store_ids(&dashboard), vec!["a", "c"]);
    assert_eq!(arena_ids(&dashboard), vec!["a", "c"]);
    assert!(b.is_retired());
    assert_eq!(
        dashboard.monitor(&WebsiteId::from("a")).unwrap().display(),
        DisplayState::Up
    );
}

#[tokio::test(start_paused = true)]
async fn delete_unknown_id_is_not_found() {
    let (api, dashboard) = dashboard(FakeApi::default());
    dashboard.start().await.unwrap();

    let err = dashboard
        .delete_website(&WebsiteId::from("ghost"))
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::WebsiteNotFound { .. }));
    assert_eq!(api.delete_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn store_changes_reach_the_arena() {
    let (_, dashboard) = dashboard(FakeApi::with_websites(vec![website("a", false, None)]));
    dashboard.start().await.unwrap();

    dashboard.store().append(website("z", false, None));
    sleep(Duration::from_millis(1)).await;

    assert_eq!(arena_ids(&dashboard), vec!["a", "z"]);

    dashboard.store().remove(&WebsiteId::from("a"));
    sleep(Duration::from_millis(1)).await;

    assert_eq!(arena_ids(&dashboard), vec!["z"]);
}

#[tokio::test(start_paused = true)]
async fn shutdown_stops_every_timer() {
    let (api, dashboard) = dashboard(FakeApi::with_websites(vec![
        website("a", true, Some(200)),
        website("b", true, Some(500)),
    ]));
    dashboard.start().await.unwrap();

    dashboard.shutdown();
    sleep(POLL_INTERVAL * 2).await;

    assert_eq!(api.checks(), 0);
    assert!(dashboard.monitors().values().all(|m| m.is_retired()));
}
