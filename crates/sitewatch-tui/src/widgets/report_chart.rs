//! Downtime report popup: a two-bar chart of uptime vs downtime checks.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use sitewatch_core::ReportSummary;

use crate::theme;

const POPUP_WIDTH: u16 = 56;
const POPUP_HEIGHT: u16 = 18;

pub struct ReportChart<'a> {
    summary: &'a ReportSummary,
}

impl<'a> ReportChart<'a> {
    pub fn new(summary: &'a ReportSummary) -> Self {
        Self { summary }
    }

    /// Centered popup area inside `area`.
    pub fn area(area: Rect) -> Rect {
        let width = POPUP_WIDTH.min(area.width.saturating_sub(4));
        let height = POPUP_HEIGHT.min(area.height.saturating_sub(2));
        let x = area.x + area.width.saturating_sub(width) / 2;
        let y = area.y + area.height.saturating_sub(height) / 2;
        Rect::new(x, y, width, height)
    }

    fn bars(&self) -> Vec<Bar<'static>> {
        self.summary
            .counters()
            .into_iter()
            .map(|(label, count)| {
                let color = if label == ReportSummary::UPTIME_LABEL {
                    theme::SUCCESS_GREEN
                } else {
                    theme::ERROR_RED
                };
                Bar::default()
                    .value(count as u64)
                    .label(Line::from(label))
                    .style(Style::default().fg(color))
                    .value_style(
                        Style::default()
                            .fg(theme::BG_DARK)
                            .bg(color)
                            .add_modifier(Modifier::BOLD),
                    )
            })
            .collect()
    }
}

impl Widget for ReportChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(format!(" {} ", self.summary.title()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(area);
        block.render(area, buf);

        let [chart_area, footer_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(2)]).areas(inner);

        let bars = self.bars();
        BarChart::default()
            .data(BarGroup::default().bars(&bars))
            .bar_width(12)
            .bar_gap(6)
            .max(self.summary.total().max(1) as u64)
            .render(chart_area, buf);

        let availability = match self.summary.uptime_ratio() {
            Some(ratio) => format!("{:.1}% available", ratio * 100.0),
            None => "No checks recorded yet".to_owned(),
        };
        let footer = vec![
            Line::from(Span::styled(
                format!(
                    " {availability} over {} checks",
                    self.summary.total()
                ),
                theme::body(),
            )),
            Line::from(vec![
                Span::styled(" Esc ", theme::key_hint_key()),
                Span::styled("close", theme::key_hint()),
            ]),
        ];
        Paragraph::new(footer).render(footer_area, buf);
    }
}
