//! Application core: event loop, focus management, action dispatch.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use sitewatch_core::{
    CoreError, Dashboard, GraphqlClient, MonitorController, NewWebsite, ReportSummary, WebsiteId,
};

use crate::action::{Action, ConfirmAction, Focus, Notification, NotificationLevel};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::screens::{monitors::MonitorsScreen, register::RegisterScreen};
use crate::theme;
use crate::tui::Tui;
use crate::widgets::report_chart::ReportChart;

/// How long a toast stays on screen.
const TOAST_TTL: Duration = Duration::from_secs(5);

const REGISTER_HEIGHT: u16 = 6;
const CARD_MIN_HEIGHT: u16 = 8;

pub fn toast_expired(shown_at: Instant, now: Instant) -> bool {
    now.saturating_duration_since(shown_at) >= TOAST_TTL
}

/// Top-level application state and event loop.
pub struct App {
    dashboard: Dashboard<GraphqlClient>,
    running: bool,
    focus: Focus,
    monitors: MonitorsScreen,
    register: RegisterScreen,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Cancellation token for the data bridge task.
    data_cancel: CancellationToken,
    /// Pending confirmation dialog (blocks other input while active).
    pending_confirm: Option<ConfirmAction>,
    /// Active notification toast with display timestamp.
    notification: Option<(Notification, Instant)>,
    report: Option<ReportSummary>,
}

impl App {
    pub fn new(dashboard: Dashboard<GraphqlClient>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            dashboard,
            running: true,
            focus: Focus::default(),
            monitors: MonitorsScreen::new(),
            register: RegisterScreen::new(),
            action_tx,
            action_rx,
            data_cancel: CancellationToken::new(),
            pending_confirm: None,
            notification: None,
            report: None,
        }
    }

    /// Run the main event loop.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        {
            let dashboard = self.dashboard.clone();
            let cancel = self.data_cancel.clone();
            let tx = self.action_tx.clone();
            tokio::spawn(async move {
                crate::data_bridge::spawn_data_bridge(dashboard, tx, cancel).await;
            });
        }

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!("TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        self.data_cancel.cancel();
        self.dashboard.shutdown();
        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Overlays capture input first, then
    /// global keys, then the focused panel.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.pending_confirm.is_some() {
            return Ok(match key.code {
                KeyCode::Char('y' | 'Y') => Some(Action::ConfirmYes),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::ConfirmNo),
                _ => None,
            });
        }

        if self.report.is_some() {
            return Ok(Some(Action::CloseReport));
        }

        if self.register.focused() {
            return self.register.handle_key_event(key);
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::Focus(Focus::Register)));
            }
            (KeyModifiers::NONE, KeyCode::Esc) => {
                return Ok(Some(Action::DismissNotification));
            }
            _ => {}
        }

        self.monitors.handle_key_event(key)
    }

    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,
            Action::Render => {}
            Action::Resize(w, h) => debug!(width = w, height = h, "terminal resized"),

            Action::Tick => {
                if self
                    .notification
                    .as_ref()
                    .is_some_and(|(_, shown_at)| toast_expired(*shown_at, Instant::now()))
                {
                    self.notification = None;
                }
                self.monitors.update(action)?;
            }

            Action::Focus(focus) => {
                debug!(?focus, "focus changed");
                self.focus = *focus;
                self.monitors.set_focused(*focus == Focus::Monitors);
                self.register.set_focused(*focus == Focus::Register);
            }

            Action::PhaseChanged(_)
            | Action::BackendUnreachable(_)
            | Action::MonitorsUpdated(_) => {
                if let Some(follow_up) = self.monitors.update(action)? {
                    self.action_tx.send(follow_up)?;
                }
            }

            // ── Command pipeline ──────────────────────────────────────
            Action::RequestStart(id) => self.start_monitoring(id),
            Action::RequestStop(id) => self.stop_monitoring(id),
            Action::RequestReport(id) => self.request_report(id),
            Action::RequestDelete(id) => {
                let name = self.website_name(id);
                self.action_tx
                    .send(Action::ShowConfirm(ConfirmAction::DeleteWebsite {
                        id: id.clone(),
                        name,
                    }))?;
            }
            Action::Register(website) => self.register_website(website.clone()),

            Action::ShowReport(summary) => self.report = Some(summary.clone()),
            Action::CloseReport => self.report = None,

            Action::ShowConfirm(confirm) => self.pending_confirm = Some(confirm.clone()),
            Action::ConfirmYes => {
                if let Some(confirm) = self.pending_confirm.take() {
                    self.execute_confirm(confirm);
                }
            }
            Action::ConfirmNo => self.pending_confirm = None,

            Action::Notify(notification) => {
                self.notification = Some((notification.clone(), Instant::now()));
            }
            Action::DismissNotification => self.notification = None,
        }
        Ok(())
    }

    fn website_name(&self, id: &WebsiteId) -> String {
        self.dashboard.monitor(id).map_or_else(
            || id.to_string(),
            |m| m.website().display_name().to_owned(),
        )
    }

    // ── Command execution ─────────────────────────────────────────

    /// Run `op` against the website's controller in the background and
    /// turn its outcome into an action. Discarded results are dropped.
    fn spawn_monitor_op<F, Fut, T, G>(&self, id: &WebsiteId, op: F, on_ok: G)
    where
        F: FnOnce(MonitorController<GraphqlClient>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, CoreError>> + Send + 'static,
        T: Send + 'static,
        G: FnOnce(T, String) -> Action + Send + 'static,
    {
        let Some(monitor) = self.dashboard.monitor(id) else {
            let _ = self
                .action_tx
                .send(Action::Notify(Notification::error(format!("Unknown website {id}"))));
            return;
        };
        let name = monitor.website().display_name().to_owned();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match op(monitor).await {
                Ok(value) => {
                    let _ = tx.send(on_ok(value, name));
                }
                Err(e) => {
                    if let Some(action) = failure_action(&e) {
                        let _ = tx.send(action);
                    }
                }
            }
        });
    }

    fn start_monitoring(&self, id: &WebsiteId) {
        self.spawn_monitor_op(
            id,
            |monitor| async move { monitor.start_monitoring().await },
            |state, name| Action::Notify(Notification::success(format!("{name} is {state}"))),
        );
    }

    fn stop_monitoring(&self, id: &WebsiteId) {
        self.spawn_monitor_op(
            id,
            |monitor| async move { monitor.stop_monitoring().await },
            |(), name| Action::Notify(Notification::info(format!("Stopped monitoring {name}"))),
        );
    }

    fn request_report(&self, id: &WebsiteId) {
        self.spawn_monitor_op(
            id,
            |monitor| async move { monitor.request_report().await },
            |summary, _| Action::ShowReport(summary),
        );
    }

    fn execute_confirm(&self, confirm: ConfirmAction) {
        match confirm {
            ConfirmAction::DeleteWebsite { id, name } => {
                let dashboard = self.dashboard.clone();
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    match dashboard.delete_website(&id).await {
                        Ok(()) => {
                            let _ = tx.send(Action::Notify(Notification::success(format!(
                                "Deleted {name}"
                            ))));
                        }
                        Err(e) => {
                            if let Some(action) = failure_action(&e) {
                                let _ = tx.send(action);
                            }
                        }
                    }
                });
            }
        }
    }

    fn register_website(&self, website: NewWebsite) {
        let dashboard = self.dashboard.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match dashboard.register(&website).await {
                Ok(monitor) => {
                    let name = monitor.website().display_name().to_owned();
                    let _ = tx.send(Action::Notify(Notification::success(format!(
                        "Registered {name}"
                    ))));
                    let _ = tx.send(Action::Focus(Focus::Monitors));
                }
                Err(e) => {
                    if let Some(action) = failure_action(&e) {
                        let _ = tx.send(action);
                    }
                }
            }
        });
    }

    // ── Rendering ─────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let [header_area, cards_area, register_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(CARD_MIN_HEIGHT),
            Constraint::Length(REGISTER_HEIGHT),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_header(frame, header_area);
        self.monitors.render(frame, cards_area);
        self.register.render(frame, register_area);
        self.render_status_bar(frame, status_area);

        if let Some((ref notification, _)) = self.notification {
            render_notification(frame, area, notification);
        }
        if let Some(ref summary) = self.report {
            frame.render_widget(ReportChart::new(summary), ReportChart::area(area));
        }
        if let Some(ref confirm) = self.pending_confirm {
            render_confirm_dialog(frame, area, confirm);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(" sitewatch ", theme::title_style()),
            Span::styled(
                format!("│ {}", self.dashboard.api().base_url()),
                theme::key_hint(),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let hints: &[(&str, &str)] = match self.focus {
            Focus::Monitors => &[
                ("←↑↓→", "select"),
                ("Tab", "register"),
                ("Esc", "dismiss"),
                ("q", "quit"),
            ],
            Focus::Register => &[("Enter", "submit"), ("Esc", "back"), ("Ctrl+C", "quit")],
        };
        let mut spans = vec![Span::raw(" ")];
        for (key, label) in hints {
            spans.push(Span::styled(*key, theme::key_hint_key()));
            spans.push(Span::styled(format!(" {label}  "), theme::key_hint()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

/// The action to dispatch for a failed background operation, if any.
fn failure_action(err: &CoreError) -> Option<Action> {
    if err.is_discarded() {
        debug!(error = %err, "result discarded");
        return None;
    }
    if err.is_validation() {
        debug!(error = %err, "operation refused locally");
    } else {
        warn!(error = %err, "operation failed");
    }
    Some(Action::Notify(Notification::error(err.to_string())))
}

/// Render a centered confirmation dialog.
fn render_confirm_dialog(frame: &mut Frame, area: Rect, confirm: &ConfirmAction) {
    let width = 56u16.min(area.width.saturating_sub(4));
    let height = 5u16;

    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    let dialog_area = Rect::new(area.x + x, area.y + y, width, height);

    frame.render_widget(Clear, dialog_area);

    let block = Block::default()
        .title(" Confirm ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::ELECTRIC_YELLOW))
        .style(Style::default().bg(theme::BG_DARK));

    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let text = vec![
        Line::from(Span::styled(format!("  {confirm}"), theme::body())),
        Line::from(""),
        Line::from(vec![
            Span::styled("  y ", theme::key_hint_key()),
            Span::styled("confirm    ", theme::key_hint()),
            Span::styled("n ", theme::key_hint_key()),
            Span::styled("cancel", theme::key_hint()),
        ]),
    ];
    frame.render_widget(Paragraph::new(text), inner);
}

/// Render a notification toast in the bottom-right corner.
fn render_notification(frame: &mut Frame, area: Rect, notification: &Notification) {
    let msg_len = u16::try_from(notification.message.chars().count()).unwrap_or(u16::MAX);
    let width = msg_len.saturating_add(6).clamp(20, 60).min(area.width);
    let height = 3u16;

    let x = area.width.saturating_sub(width + 1);
    let y = area.height.saturating_sub(height + 1);
    let toast_area = Rect::new(area.x + x, area.y + y, width, height);

    let (border_color, icon) = match notification.level {
        NotificationLevel::Success => (theme::SUCCESS_GREEN, "✓"),
        NotificationLevel::Error => (theme::ERROR_RED, "✗"),
        NotificationLevel::Info => (theme::NEON_CYAN, "·"),
    };

    frame.render_widget(Clear, toast_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme::BG_DARK));

    let inner = block.inner(toast_area);
    frame.render_widget(block, toast_area);

    let line = Line::from(vec![
        Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
        Span::styled(notification.message.as_str(), theme::body()),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}
