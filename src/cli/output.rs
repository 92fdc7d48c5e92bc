use std::fmt::Write;

use ratatui::layout::{Rect, Size};
use serde::Serialize;

use crate::tabs::TabBar;
use crate::tabs::button::Importance;
use crate::tabs::fit::BarMode;
use crate::tabs::placement::Placement;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RectJson {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl From<Rect> for RectJson {
    fn from(r: Rect) -> Self {
        RectJson {
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeJson {
    pub width: u16,
    pub height: u16,
}

impl From<Size> for SizeJson {
    fn from(s: Size) -> Self {
        SizeJson {
            width: s.width,
            height: s.height,
        }
    }
}

#[derive(Serialize)]
pub struct ButtonJson {
    pub index: usize,
    pub label: String,
    pub importance: Importance,
    pub rect: RectJson,
}

#[derive(Serialize)]
pub struct FitJson {
    pub placement: Placement,
    pub area: RectJson,
    pub min_size: SizeJson,
    /// "full" or "overflow"
    pub mode: &'static str,
    pub total: usize,
    pub visible: usize,
    pub selected: Option<usize>,
    pub buttons: Vec<ButtonJson>,
    pub hidden: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add: Option<RectJson>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overflow: Option<RectJson>,
    pub indicator: Option<RectJson>,
}

impl FitJson {
    pub fn from_bar<C>(bar: &TabBar<C>) -> Self {
        let buttons = bar
            .visible_buttons()
            .enumerate()
            .map(|(index, (_, button))| ButtonJson {
                index,
                label: button.label.clone(),
                importance: button.importance,
                rect: button.rect.into(),
            })
            .collect();
        let overflow = bar.overflow_button();
        FitJson {
            placement: bar.placement(),
            area: bar.geometry().area.into(),
            min_size: bar.min_size().into(),
            mode: match bar.mode() {
                BarMode::Full => "full",
                BarMode::Overflow(_) => "overflow",
            },
            total: bar.len(),
            visible: bar.visible_count(),
            selected: bar.selected(),
            buttons,
            hidden: bar.hidden_items().iter().map(|i| i.label.clone()).collect(),
            add: bar.add_button().map(|b| b.rect.into()),
            overflow: overflow.visible.then(|| overflow.rect.into()),
            indicator: bar.indicator().rect.map(Into::into),
        }
    }
}

#[derive(Serialize)]
pub struct RenderJson {
    pub width: u16,
    pub height: u16,
    pub lines: Vec<String>,
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

fn rect_text(r: &RectJson) -> String {
    format!("{}x{} at ({}, {})", r.width, r.height, r.x, r.y)
}

/// Human-readable fit report
pub fn format_fit_text(fit: &FitJson) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} bar in {}x{}: {} of {} tabs shown ({})",
        fit.placement.label(),
        fit.area.width,
        fit.area.height,
        fit.visible,
        fit.total,
        fit.mode
    );
    let label_w = fit
        .buttons
        .iter()
        .map(|b| crate::util::unicode::display_width(&b.label))
        .max()
        .unwrap_or(0);
    for button in &fit.buttons {
        let marker = if fit.selected == Some(button.index) {
            "*"
        } else {
            " "
        };
        let pad = label_w - crate::util::unicode::display_width(&button.label);
        let _ = writeln!(
            out,
            " {} {}{}  {}",
            marker,
            button.label,
            " ".repeat(pad),
            rect_text(&button.rect)
        );
    }
    if !fit.hidden.is_empty() {
        let _ = writeln!(out, "hidden: {}", fit.hidden.join(", "));
    }
    if let Some(add) = &fit.add {
        let _ = writeln!(out, "add: {}", rect_text(add));
    }
    if let Some(overflow) = &fit.overflow {
        let _ = writeln!(out, "overflow: {}", rect_text(overflow));
    }
    match &fit.indicator {
        Some(indicator) => {
            let _ = writeln!(out, "indicator: {}", rect_text(indicator));
        }
        None => {
            let _ = writeln!(out, "indicator: hidden");
        }
    }
    out
}
