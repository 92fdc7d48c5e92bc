use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::model::TabItem;
use crate::tabs::placement::Placement;
use crate::tabs::{BarOptions, TabBar};
use crate::tabs::host::TerminalHost;

pub const FIVE: [&str; 5] = ["Alpha", "Beta", "Gamma", "Delta", "Epsilon"];

/// Render into an in-memory buffer and return it.
pub fn render_to_buffer<F>(w: u16, h: u16, f: F) -> Buffer
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();
    terminal.backend().buffer().clone()
}

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let buf = render_to_buffer(w, h, f);
    crate::tui::render::buffer_to_string(&buf)
}

/// A bar over `labels` whose content is `"<label> content"`.
pub fn strip(labels: &[&str], placement: Placement, closable: bool) -> TabBar<String> {
    let items = labels
        .iter()
        .map(|label| TabItem::new(*label, format!("{} content", label)))
        .collect();
    let options = BarOptions {
        placement,
        closable,
        ..BarOptions::default()
    };
    TabBar::with_options(items, options, TerminalHost::default())
}
