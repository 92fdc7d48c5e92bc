use ratatui::layout::Rect;

use super::placement::Placement;

/// Where the current selection lives relative to the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    Unselected,
    /// Selected tab has a button in the bar
    Visible(usize),
    /// Selected tab is only reachable through the overflow menu
    Overflowed(usize),
}

impl SelectionState {
    pub fn resolve(current: Option<usize>, visible: usize) -> Self {
        match current {
            None => SelectionState::Unselected,
            Some(i) if i < visible => SelectionState::Visible(i),
            Some(i) => SelectionState::Overflowed(i),
        }
    }
}

/// The highlight under (or beside) the selected tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Indicator {
    /// `None` when nothing is selected
    pub rect: Option<Rect>,
    /// The host should animate towards `rect` rather than jump
    pub animate: bool,
}

impl Indicator {
    pub fn hidden() -> Self {
        Indicator::default()
    }

    pub fn is_visible(&self) -> bool {
        self.rect.is_some()
    }
}

/// Place the indicator strip for `anchor` (the selected button, or the
/// overflow action when the selection is hidden in the menu).
///
/// Top bars get a strip just below the bar, bottom bars just above it,
/// leading bars just to the right and trailing bars just to the left.
pub fn position(placement: Placement, bar: Rect, anchor: Rect, thickness: u16) -> Rect {
    match placement {
        Placement::Top => Rect::new(anchor.x, bar.bottom(), anchor.width, thickness),
        Placement::Bottom => Rect::new(
            anchor.x,
            bar.y.saturating_sub(thickness),
            anchor.width,
            thickness,
        ),
        Placement::Leading => Rect::new(bar.right(), anchor.y, thickness, anchor.height),
        Placement::Trailing => Rect::new(
            bar.x.saturating_sub(thickness),
            anchor.y,
            thickness,
            anchor.height,
        ),
    }
}
