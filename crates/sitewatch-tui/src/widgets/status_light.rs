//! Status light: ● colored by display state, ◐ while a start is pending.

use ratatui::style::Style;
use ratatui::text::Span;

use sitewatch_core::MonitorStatus;

use crate::theme;

/// | Glyph | Status             | Color           |
/// |-------|--------------------|-----------------|
/// | `◐`   | start in flight    | Electric Yellow |
/// | `●`   | up                 | Success Green   |
/// | `●`   | down               | Error Red       |
/// | `○`   | not monitored      | Border Gray     |
pub fn status_light(status: MonitorStatus) -> Span<'static> {
    if status.pending {
        return Span::styled("◐", Style::default().fg(theme::ELECTRIC_YELLOW));
    }
    let glyph = if status.display.is_monitored() { "●" } else { "○" };
    Span::styled(glyph, Style::default().fg(theme::state_color(status.display)))
}
