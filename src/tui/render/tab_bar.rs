use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::tabs::TabBar;
use crate::tabs::button::{ActionButton, CLOSE_GLYPH, Importance, TabButton, TextAlign};
use crate::tabs::placement::IconPosition;
use crate::tui::theme::Theme;
use crate::util::unicode::{center_offset, display_width};

/// Render the laid-out bar: tab buttons, the add and overflow actions, and
/// the divider band carrying the selection indicator.
pub fn render_tab_bar<C>(frame: &mut Frame, bar: &TabBar<C>, theme: &Theme) {
    let geometry = *bar.geometry();
    let clip = geometry.area.intersection(frame.area());
    let buf = frame.buffer_mut();

    buf.set_style(geometry.bar.intersection(clip), Style::default().bg(theme.background));

    let padding = bar.options().metrics.padding;
    for (_, button) in bar.visible_buttons() {
        render_button(buf, button, padding, theme, clip);
    }
    if let Some(add) = bar.add_button() {
        render_action(buf, add, theme, clip);
    }
    if bar.overflow_button().visible {
        render_action(buf, bar.overflow_button(), theme, clip);
    }

    render_band(buf, bar, theme, clip);
}

/// Column of the close glyph inside a closable button
pub fn close_column(button: &TabButton, padding: u16) -> u16 {
    button
        .rect
        .right()
        .saturating_sub(padding)
        .saturating_sub(1)
}

fn render_button(buf: &mut Buffer, button: &TabButton, padding: u16, theme: &Theme, clip: Rect) {
    let rect = button.rect.intersection(clip);
    if rect.is_empty() {
        return;
    }
    let style = button_style(theme, button.importance, button.hovered, button.pressed);
    buf.set_style(rect, style);

    // Label (and an inline icon) share the space left of the close glyph
    let inner_x = button.rect.x.saturating_add(padding);
    let inner_w = button.rect.width.saturating_sub(padding.saturating_mul(2));
    let close_w = if button.closable {
        display_width(CLOSE_GLYPH) as u16 + 1
    } else {
        0
    };
    let label_w = inner_w.saturating_sub(close_w);

    let label_row = match (button.icon_position, &button.icon) {
        (IconPosition::Top, Some(icon)) => {
            put_aligned(buf, icon.glyph(), inner_x, button.rect.y, label_w, button.alignment, style, rect);
            button.rect.bottom().saturating_sub(1)
        }
        _ => button.rect.y,
    };

    let text = match (button.icon_position, &button.icon) {
        (IconPosition::Inline, Some(icon)) => format!("{} {}", icon.glyph(), button.label),
        _ => button.label.clone(),
    };
    put_aligned(buf, &text, inner_x, label_row, label_w, button.alignment, style, rect);

    if button.closable {
        let close_style = if button.hovered {
            style
        } else {
            style.fg(theme.dim).remove_modifier(Modifier::BOLD)
        };
        put(buf, CLOSE_GLYPH, close_column(button, padding), label_row, close_style, rect);
    }
}

fn render_action(buf: &mut Buffer, action: &ActionButton, theme: &Theme, clip: Rect) {
    let rect = action.rect.intersection(clip);
    if rect.is_empty() {
        return;
    }
    let style = button_style(theme, action.importance(), false, false);
    buf.set_style(rect, style);
    put_aligned(
        buf,
        action.glyph,
        action.rect.x,
        action.rect.y,
        action.rect.width,
        TextAlign::Center,
        style,
        rect,
    );
}

/// Divider across the band, with the indicator drawn over it.
fn render_band<C>(buf: &mut Buffer, bar: &TabBar<C>, theme: &Theme, clip: Rect) {
    let band = bar.geometry().band.intersection(clip);
    if band.is_empty() {
        return;
    }
    let vertical = bar.placement().is_vertical();
    let (divider, mark) = if vertical {
        ("\u{2502}", "\u{2503}")
    } else {
        ("\u{2500}", "\u{2501}")
    };

    fill(buf, band, divider, Style::default().fg(theme.separator).bg(theme.background));
    if let Some(indicator) = bar.indicator().rect {
        let rect = indicator.intersection(band);
        if !rect.is_empty() {
            fill(buf, rect, mark, Style::default().fg(theme.primary).bg(theme.background));
        }
    }
}

fn button_style(theme: &Theme, importance: Importance, hovered: bool, pressed: bool) -> Style {
    let style = match importance {
        Importance::High => Style::default()
            .fg(theme.text_bright)
            .bg(theme.selection_bg)
            .add_modifier(Modifier::BOLD),
        Importance::Medium => Style::default().fg(theme.text).bg(theme.background),
        Importance::Low => Style::default().fg(theme.dim).bg(theme.background),
    };
    if pressed {
        style.add_modifier(Modifier::REVERSED)
    } else if hovered {
        style.add_modifier(Modifier::UNDERLINED)
    } else {
        style
    }
}

#[allow(clippy::too_many_arguments)]
fn put_aligned(
    buf: &mut Buffer,
    text: &str,
    x: u16,
    y: u16,
    width: u16,
    align: TextAlign,
    style: Style,
    clip: Rect,
) {
    let text_w = display_width(text);
    let width = width as usize;
    let offset = match align {
        TextAlign::Leading => 0,
        TextAlign::Center => center_offset(text_w, width),
        TextAlign::Trailing => width.saturating_sub(text_w),
    };
    let x = x.saturating_add(offset as u16);
    let visible = clip.right().saturating_sub(x).min(width.saturating_sub(offset) as u16);
    if y < clip.y || y >= clip.bottom() || x < clip.x || visible == 0 {
        return;
    }
    buf.set_stringn(x, y, text, visible as usize, style);
}

fn put(buf: &mut Buffer, text: &str, x: u16, y: u16, style: Style, clip: Rect) {
    if y < clip.y || y >= clip.bottom() || x < clip.x || x >= clip.right() {
        return;
    }
    let visible = clip.right() - x;
    buf.set_stringn(x, y, text, visible as usize, style);
}

fn fill(buf: &mut Buffer, rect: Rect, symbol: &str, style: Style) {
    for y in rect.top()..rect.bottom() {
        for x in rect.left()..rect.right() {
            buf[(x, y)].set_symbol(symbol).set_style(style);
        }
    }
}
