use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tabs::arrange::cell_count;
use crate::tabs::overflow::OverflowMenu;
use crate::tabs::placement::Placement;
use crate::tui::theme::Theme;
use crate::util::unicode::display_width;

/// Where the menu floats: beside the overflow action, on the content side of
/// the indicator band, kept inside `area`.
pub fn menu_rect(menu: &OverflowMenu, placement: Placement, band: u16, area: Rect) -> Rect {
    let label_w = menu
        .entries
        .iter()
        .map(|e| display_width(&e.label))
        .max()
        .unwrap_or(0);
    // one space either side of the label, then the border
    let w = cell_count(label_w).saturating_add(4).min(area.width);
    let h = cell_count(menu.len()).saturating_add(2).min(area.height);

    let anchor = menu.anchor;
    let (w32, h32, band) = (i32::from(w), i32::from(h), i32::from(band));
    let (x, y) = match placement {
        Placement::Top => (i32::from(anchor.right()) - w32, i32::from(anchor.bottom()) + band),
        Placement::Bottom => (i32::from(anchor.right()) - w32, i32::from(anchor.y) - band - h32),
        Placement::Leading => (i32::from(anchor.right()) + band, i32::from(anchor.bottom()) - h32),
        Placement::Trailing => (i32::from(anchor.x) - band - w32, i32::from(anchor.bottom()) - h32),
    };

    let max_x = i32::from(area.right()) - w32;
    let max_y = i32::from(area.bottom()) - h32;
    let x = x.clamp(i32::from(area.x), max_x.max(i32::from(area.x)));
    let y = y.clamp(i32::from(area.y), max_y.max(i32::from(area.y)));
    Rect::new(x as u16, y as u16, w, h)
}

/// First entry shown when `rows` rows are available: the list scrolls just
/// enough to keep `cursor` on screen.
pub fn menu_scroll(len: usize, cursor: usize, rows: usize) -> usize {
    if rows == 0 {
        return 0;
    }
    let cursor = cursor.min(len.saturating_sub(1));
    (cursor + 1).saturating_sub(rows).min(len.saturating_sub(rows))
}

/// Menu entry under `pos`, if any, with the list scrolled for `cursor`.
pub fn entry_at(menu: &OverflowMenu, rect: Rect, cursor: usize, pos: Position) -> Option<usize> {
    let inner = rect.inner(ratatui::layout::Margin::new(1, 1));
    if !inner.contains(pos) {
        return None;
    }
    let scroll = menu_scroll(menu.len(), cursor, usize::from(inner.height));
    let j = scroll + usize::from(pos.y - inner.y);
    (j < menu.len()).then_some(j)
}

/// Render the open overflow menu with `cursor` highlighted
pub fn render_overflow_menu(
    frame: &mut Frame,
    menu: &OverflowMenu,
    cursor: usize,
    rect: Rect,
    theme: &Theme,
) {
    if rect.is_empty() {
        return;
    }
    let bg = theme.background;
    let inner_w = usize::from(rect.width.saturating_sub(2));
    let rows = usize::from(rect.height.saturating_sub(2));
    let scroll = menu_scroll(menu.len(), cursor, rows);

    let lines: Vec<Line> = menu
        .entries
        .iter()
        .enumerate()
        .skip(scroll)
        .take(rows)
        .map(|(j, entry)| {
            let style = if j == cursor {
                Style::default().fg(theme.text_bright).bg(theme.selection_bg)
            } else {
                Style::default().fg(theme.text).bg(bg)
            };
            let text = format!(" {}", entry.label);
            let pad = inner_w.saturating_sub(display_width(&text));
            Line::from(Span::styled(format!("{}{}", text, " ".repeat(pad)), style))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.primary).bg(bg))
        .style(Style::default().bg(bg));

    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}
