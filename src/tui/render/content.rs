use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::tabs::TabBar;
use crate::tui::theme::Theme;

/// Render the selected tab's content into the content region
pub fn render_content(frame: &mut Frame, bar: &TabBar<String>, theme: &Theme) {
    let area = bar.geometry().content.intersection(frame.area());
    if area.is_empty() {
        return;
    }
    let bg = theme.background;

    let lines = match bar.selected_item() {
        Some(item) => vec![
            Line::from(Span::styled(
                item.label.clone(),
                Style::default()
                    .fg(theme.text_bright)
                    .bg(bg)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                item.content.clone(),
                Style::default().fg(theme.text).bg(bg),
            )),
        ],
        None => vec![Line::from(Span::styled(
            "No tab selected",
            Style::default().fg(theme.dim).bg(bg),
        ))],
    };

    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(bg))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
