use indexmap::IndexMap;
use ratatui::layout::{Rect, Size};

use crate::model::{Icon, TabId, TabItem};

use super::host::Host;
use super::placement::IconPosition;

/// Glyph of the overflow action
pub const OVERFLOW_GLYPH: &str = "⋯";
/// Glyph of the add-tab action
pub const ADD_GLYPH: &str = "+";
/// Close marker drawn after the label of closable tabs
pub const CLOSE_GLYPH: &str = "×";

/// What activating a control asks the bar to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabAction {
    Select(TabId),
    Close(TabId),
    OpenOverflow,
    AddTab,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Importance {
    Low,
    #[default]
    Medium,
    High,
}

/// Where a label sits when its button is wider than the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    Leading,
    #[default]
    Center,
    Trailing,
}

/// Stable identity of a cached button. Two lookups for the same tab return the
/// same handle for as long as the tab stays in the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ButtonHandle(u64);

/// Rendered control for one tab.
#[derive(Debug, Clone)]
pub struct TabButton {
    handle: ButtonHandle,
    pub on_tapped: TabAction,
    pub on_closed: TabAction,
    pub label: String,
    pub icon: Option<Icon>,
    pub icon_position: IconPosition,
    pub importance: Importance,
    pub alignment: TextAlign,
    pub closable: bool,
    /// Pointer state owned by the host; survives relayout
    pub hovered: bool,
    pub pressed: bool,
    /// Laid-out geometry from the last pass
    pub rect: Rect,
}

impl TabButton {
    fn new(handle: ButtonHandle, id: TabId) -> Self {
        TabButton {
            handle,
            on_tapped: TabAction::Select(id),
            on_closed: TabAction::Close(id),
            label: String::new(),
            icon: None,
            icon_position: IconPosition::Inline,
            importance: Importance::Medium,
            alignment: TextAlign::Center,
            closable: false,
            hovered: false,
            pressed: false,
            rect: Rect::default(),
        }
    }

    pub fn handle(&self) -> ButtonHandle {
        self.handle
    }

    pub fn min_size(&self, host: &dyn Host, padding: u16) -> Size {
        measure(
            &self.label,
            self.icon.as_ref(),
            self.icon_position,
            self.closable,
            host,
            padding,
        )
    }
}

/// Minimum size of a tab button with the given content.
pub fn measure(
    label: &str,
    icon: Option<&Icon>,
    icon_position: IconPosition,
    closable: bool,
    host: &dyn Host,
    padding: u16,
) -> Size {
    let mut label_w = host.text_width(label);
    if closable {
        label_w = label_w
            .saturating_add(1)
            .saturating_add(host.text_width(CLOSE_GLYPH));
    }
    let icon = icon.map(|icon| host.icon_size(icon));

    let (content_w, height) = match (icon_position, icon) {
        (_, None) => (label_w, 1),
        (IconPosition::Inline, Some(icon)) => (
            icon.width.saturating_add(1).saturating_add(label_w),
            icon.height.max(1),
        ),
        (IconPosition::Top, Some(icon)) => (icon.width.max(label_w), icon.height.saturating_add(1)),
    };
    Size::new(content_w.saturating_add(padding.saturating_mul(2)), height)
}

/// The overflow and add controls: a glyph and an action, no tab behind them.
#[derive(Debug, Clone)]
pub struct ActionButton {
    pub glyph: &'static str,
    pub action: TabAction,
    pub visible: bool,
    pub rect: Rect,
}

impl ActionButton {
    pub fn overflow() -> Self {
        ActionButton {
            glyph: OVERFLOW_GLYPH,
            action: TabAction::OpenOverflow,
            visible: false,
            rect: Rect::default(),
        }
    }

    pub fn add() -> Self {
        ActionButton {
            glyph: ADD_GLYPH,
            action: TabAction::AddTab,
            visible: true,
            rect: Rect::default(),
        }
    }

    pub fn importance(&self) -> Importance {
        Importance::Low
    }

    pub fn min_size(&self, host: &dyn Host, padding: u16) -> Size {
        Size::new(
            host.text_width(self.glyph)
                .saturating_add(padding.saturating_mul(2)),
            1,
        )
    }
}

/// Buttons keyed by tab identity, so indices can shift without losing a
/// button's transient state.
#[derive(Debug, Default)]
pub struct ButtonCache {
    buttons: IndexMap<TabId, TabButton>,
    next_handle: u64,
}

impl ButtonCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the button for `item`, creating one wired to select/close it.
    /// Only identity is cached; callers refresh the visual fields every pass.
    pub fn get_or_create<C>(&mut self, item: &TabItem<C>) -> &mut TabButton {
        let id = item.id();
        let next_handle = &mut self.next_handle;
        self.buttons.entry(id).or_insert_with(|| {
            *next_handle += 1;
            TabButton::new(ButtonHandle(*next_handle), id)
        })
    }

    pub fn get(&self, id: TabId) -> Option<&TabButton> {
        self.buttons.get(&id)
    }

    pub fn get_mut(&mut self, id: TabId) -> Option<&mut TabButton> {
        self.buttons.get_mut(&id)
    }

    pub fn evict(&mut self, id: TabId) -> Option<TabButton> {
        self.buttons.shift_remove(&id)
    }

    /// Drop every entry whose tab is no longer live. Returns how many went.
    pub fn prune(&mut self, is_live: impl Fn(TabId) -> bool) -> usize {
        let before = self.buttons.len();
        self.buttons.retain(|id, _| is_live(*id));
        let pruned = before - self.buttons.len();
        if pruned > 0 {
            tracing::trace!(pruned, remaining = self.buttons.len(), "pruned button cache");
        }
        pruned
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }
}
