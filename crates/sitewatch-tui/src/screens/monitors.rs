//! Monitor cards: one card per website with its status light, title, url,
//! tooltip and key hints. Shows a waiting indicator until the backend is
//! awake and the list has loaded.

use std::cell::Cell;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};
use throbber_widgets_tui::{Throbber, ThrobberState};

use sitewatch_core::{DashboardPhase, GraphqlClient, MonitorController, WebsiteId};

use crate::action::{Action, Monitors};
use crate::component::Component;
use crate::theme;
use crate::widgets::status_light::status_light;

const CARD_WIDTH: u16 = 38;
const CARD_HEIGHT: u16 = 6;

/// How many cards fit side by side in `width` columns. Never zero.
pub fn grid_columns(width: u16) -> usize {
    usize::from((width / CARD_WIDTH).max(1))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// Move a grid selection, clamping at the edges.
pub fn move_selection(selected: usize, len: usize, columns: usize, dir: Direction) -> usize {
    if len == 0 {
        return 0;
    }
    let columns = columns.max(1);
    let last = len - 1;
    match dir {
        Direction::Left => selected.saturating_sub(1),
        Direction::Right => (selected + 1).min(last),
        Direction::Up => selected.checked_sub(columns).unwrap_or(selected),
        Direction::Down => {
            let below = selected + columns;
            if below <= last { below } else { selected }
        }
    }
}

/// First grid row to draw so that `selected_row` stays visible.
fn first_visible_row(selected_row: usize, visible_rows: usize) -> usize {
    selected_row.saturating_sub(visible_rows.max(1) - 1)
}

pub struct MonitorsScreen {
    focused: bool,
    phase: DashboardPhase,
    unreachable: Option<String>,
    monitors: Monitors,
    selected: usize,
    /// Column count from the last render; key navigation uses it.
    columns: Cell<usize>,
    throbber_state: ThrobberState,
}

impl MonitorsScreen {
    pub fn new() -> Self {
        Self {
            focused: true,
            phase: DashboardPhase::WaitingForBackend,
            unreachable: None,
            monitors: Monitors::default(),
            selected: 0,
            columns: Cell::new(1),
            throbber_state: ThrobberState::default(),
        }
    }

    pub fn selected_monitor(&self) -> Option<&MonitorController<GraphqlClient>> {
        self.monitors.get_index(self.selected).map(|(_, m)| m)
    }

    fn selected_id(&self) -> Option<WebsiteId> {
        self.selected_monitor().map(|m| m.id().clone())
    }

    fn set_monitors(&mut self, monitors: Monitors) {
        let previous = self.selected_id();
        self.selected = previous
            .and_then(|id| monitors.get_index_of(&id))
            .unwrap_or_else(|| self.selected.min(monitors.len().saturating_sub(1)));
        self.monitors = monitors;
    }

    fn command_for(&self, key: char) -> Option<Action> {
        let monitor = self.selected_monitor()?;
        let status = monitor.status();
        let id = monitor.id().clone();
        match key {
            's' if status.can_start() => Some(Action::RequestStart(id)),
            'x' if status.can_stop() => Some(Action::RequestStop(id)),
            'r' => Some(Action::RequestReport(id)),
            'd' => Some(Action::RequestDelete(id)),
            _ => None,
        }
    }

    // ── Rendering ─────────────────────────────────────────────────

    fn render_waiting(&self, frame: &mut Frame, area: Rect) {
        let [_, spinner_area, detail_area, _] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(0),
        ])
        .areas(area);

        if let Some(reason) = &self.unreachable {
            let lines = vec![
                Line::from(Span::styled(
                    "  The backend did not answer.",
                    Style::default().fg(theme::ERROR_RED),
                )),
                Line::from(Span::styled(format!("  {reason}"), theme::key_hint())),
                Line::from(Span::styled(
                    "  Restart sitewatch-tui to try again.",
                    theme::key_hint(),
                )),
            ];
            frame.render_widget(Paragraph::new(lines), spinner_area.union(detail_area));
            return;
        }

        let label = if self.phase == DashboardPhase::Loading {
            "  Loading websites..."
        } else {
            "  Waking up the backend..."
        };
        let throbber = Throbber::default()
            .label(label)
            .style(Style::default().fg(theme::NEON_CYAN))
            .throbber_style(Style::default().fg(theme::ELECTRIC_PURPLE));
        frame.render_stateful_widget(throbber, spinner_area, &mut self.throbber_state.clone());

        frame.render_widget(
            Paragraph::new(Span::styled(
                "  A sleeping backend can take a little while to start.",
                theme::key_hint(),
            )),
            detail_area,
        );
    }

    fn render_empty(frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled("  No websites yet. Press ", theme::body()),
            Span::styled("Tab", theme::key_hint_key()),
            Span::styled(" to register one.", theme::body()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_grid(&self, frame: &mut Frame, area: Rect) {
        let columns = grid_columns(area.width);
        self.columns.set(columns);

        let visible_rows = usize::from((area.height / CARD_HEIGHT).max(1));
        let first_row = first_visible_row(self.selected / columns, visible_rows);
        let width = area.width / u16::try_from(columns).unwrap_or(1);

        for (index, (_, monitor)) in self
            .monitors
            .iter()
            .enumerate()
            .skip(first_row * columns)
            .take(visible_rows * columns)
        {
            let row = index / columns - first_row;
            let col = index % columns;
            let (Ok(row), Ok(col)) = (u16::try_from(row), u16::try_from(col)) else {
                continue;
            };
            let card = Rect::new(
                area.x + col * width,
                area.y + row * CARD_HEIGHT,
                width,
                CARD_HEIGHT,
            )
            .intersection(area);
            self.render_card(frame, card, monitor, index == self.selected);
        }
    }

    fn render_card(
        &self,
        frame: &mut Frame,
        area: Rect,
        monitor: &MonitorController<GraphqlClient>,
        selected: bool,
    ) {
        let status = monitor.status();
        let website = monitor.website();

        let border = if selected && self.focused {
            theme::card_selected()
        } else if selected {
            theme::border_focused()
        } else {
            theme::border_default()
        };
        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                status_light(status),
                Span::styled(format!(" {} ", website.display_name()), theme::title_style()),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let hint = |key: &'static str, label: &'static str, enabled: bool| {
            let (key_style, label_style) = if enabled {
                (theme::key_hint_key(), theme::key_hint())
            } else {
                (theme::key_disabled(), theme::key_disabled())
            };
            [
                Span::styled(key, key_style),
                Span::styled(label, label_style),
            ]
        };
        let mut hints = Vec::with_capacity(8);
        hints.extend(hint("s", " start  ", status.can_start()));
        hints.extend(hint("x", " stop  ", status.can_stop()));
        hints.extend(hint("r", " report  ", true));
        hints.extend(hint("d", " delete", true));

        let lines = vec![
            Line::from(Span::styled(website.url.clone(), theme::body())),
            Line::from(Span::styled(
                status.tooltip(),
                Style::default().fg(if status.pending {
                    theme::ELECTRIC_YELLOW
                } else {
                    theme::state_color(status.display)
                }),
            )),
            Line::from(""),
            Line::from(hints),
        ];
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

impl Component for MonitorsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers != KeyModifiers::NONE && key.modifiers != KeyModifiers::SHIFT {
            return Ok(None);
        }
        let (selected, len, columns) = (self.selected, self.monitors.len(), self.columns.get());
        let step = |dir| move_selection(selected, len, columns, dir);

        let action = match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected = step(Direction::Left);
                None
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.selected = step(Direction::Right);
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = step(Direction::Up);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = step(Direction::Down);
                None
            }
            KeyCode::Char(c @ ('s' | 'x' | 'r' | 'd')) => self.command_for(c),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::PhaseChanged(phase) => self.phase = *phase,
            Action::BackendUnreachable(reason) => self.unreachable = Some(reason.clone()),
            Action::MonitorsUpdated(monitors) => self.set_monitors(monitors.clone()),
            Action::Tick => self.throbber_state.calc_next(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Websites ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.phase != DashboardPhase::Ready {
            self.render_waiting(frame, inner);
        } else if self.monitors.is_empty() {
            Self::render_empty(frame, inner);
        } else {
            self.render_grid(frame, inner);
        }
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
