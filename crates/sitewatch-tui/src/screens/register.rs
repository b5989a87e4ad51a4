//! Registration form: url, title and optional email.
//!
//! Tab/BackTab cycle fields, Enter submits. Submission is unavailable while
//! the url is empty; a rejected email keeps every field as typed.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use sitewatch_core::RegistrationForm;
use sitewatch_core::registration::FormField;

use crate::action::{Action, Focus, Notification};
use crate::component::Component;
use crate::theme;

const FIELDS: [(FormField, &str); 3] = [
    (FormField::Url, "URL"),
    (FormField::Title, "Title"),
    (FormField::Email, "Email"),
];

pub struct RegisterScreen {
    focused: bool,
    form: RegistrationForm,
    active: FormField,
}

impl RegisterScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            form: RegistrationForm::new(),
            active: FormField::default(),
        }
    }

    fn submit(&mut self) -> Option<Action> {
        if !self.form.can_submit() {
            return None;
        }
        match self.form.take_submission() {
            Ok(website) => {
                self.active = FormField::Url;
                Some(Action::Register(website))
            }
            Err(e) => Some(Action::Notify(Notification::error(e.to_string()))),
        }
    }
}

impl Component for RegisterScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::Focus(Focus::Monitors)),
            KeyCode::Tab | KeyCode::Down => {
                self.active = self.active.next();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.active = self.active.prev();
                None
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => {
                self.form.field_mut(self.active).pop();
                None
            }
            KeyCode::Char(c)
                if key.modifiers == KeyModifiers::NONE || key.modifiers == KeyModifiers::SHIFT =>
            {
                self.form.field_mut(self.active).push(c);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Register a website ")
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

        let label = theme::body();
        let active_label = Style::default()
            .fg(theme::ELECTRIC_YELLOW)
            .add_modifier(Modifier::BOLD);
        let value = Style::default().fg(theme::NEON_CYAN);

        let mut lines: Vec<Line> = FIELDS
            .iter()
            .map(|&(field, name)| {
                let is_active = self.focused && field == self.active;
                let marker = if is_active { "▸ " } else { "  " };
                let cursor = if is_active { "▎" } else { "" };
                let name_style = if is_active { active_label } else { label };
                Line::from(vec![
                    Span::styled(marker, name_style),
                    Span::styled(format!("{name:<7}"), name_style),
                    Span::styled(self.form.field(field).to_owned(), value),
                    Span::styled(cursor, Style::default().fg(theme::ELECTRIC_YELLOW)),
                ])
            })
            .collect();

        let submit = if self.form.can_submit() {
            theme::key_hint_key()
        } else {
            theme::key_disabled()
        };
        lines.push(Line::from(vec![
            Span::styled("  Enter", submit),
            Span::styled(" submit  ", theme::key_hint()),
            Span::styled("Tab", theme::key_hint_key()),
            Span::styled(" next field  ", theme::key_hint()),
            Span::styled("Esc", theme::key_hint_key()),
            Span::styled(" back", theme::key_hint()),
        ]));

        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn focused(&self) -> bool {
        self.focused
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}
