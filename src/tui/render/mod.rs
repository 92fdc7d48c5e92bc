pub mod content;
pub mod overflow_menu;
pub mod status_row;
pub mod tab_bar;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;

use crate::tabs::TabBar;

use super::app::App;
use super::theme::Theme;

/// Main render function: the strip fills the screen above the status row
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let [main, status] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

    let strip_area = app.strip_area(main);
    render_strip(frame, &mut app.bar, &app.theme, strip_area, app.menu_cursor);
    status_row::render_status_row(frame, app, status);
}

/// Lay the bar out in `area` and draw it: buttons, band, the selected
/// content and, on top, the overflow menu when open.
pub fn render_strip(
    frame: &mut Frame,
    bar: &mut TabBar<String>,
    theme: &Theme,
    area: Rect,
    menu_cursor: usize,
) {
    bar.layout(area);
    tab_bar::render_tab_bar(frame, bar, theme);
    content::render_content(frame, bar, theme);

    if let Some(menu) = bar.menu() {
        let thickness = bar.options().metrics.indicator_thickness;
        let rect = overflow_menu::menu_rect(menu, bar.placement(), thickness, area);
        overflow_menu::render_overflow_menu(frame, menu, menu_cursor, rect, theme);
    }
}

/// Plain text of a buffer, one line per row, trailing blanks trimmed.
pub fn buffer_to_string(buf: &Buffer) -> String {
    let w = buf.area.width.max(1) as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}
