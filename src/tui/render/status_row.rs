use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tabs::fit::BarMode;
use crate::tui::app::App;
use crate::util::unicode::display_width;

const NAV_HINT: &str = "o more  a add  x close  p place  c compact  [ ] size  q quit";
const MENU_HINT: &str = "\u{2191}\u{2193} move  Enter select  Esc close";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mode = match app.bar.mode() {
        BarMode::Full => "all shown".to_string(),
        BarMode::Overflow(k) => format!("{} of {} shown", k, app.bar.len()),
    };
    let mut summary = format!(" {} \u{b7} {}", app.bar.placement().label(), mode);
    let last_event = app.last_event.borrow();
    if !last_event.is_empty() {
        summary.push_str(" \u{b7} ");
        summary.push_str(&last_event);
    }

    let mut spans = vec![Span::styled(
        summary,
        Style::default().fg(app.theme.text).bg(bg),
    )];

    let hint = if app.bar.menu().is_some() {
        MENU_HINT
    } else {
        NAV_HINT
    };
    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let hint_width = display_width(hint) + 1;
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(
            format!("{} ", hint),
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(status, area);
}
