use std::fmt;

use crate::model::TabItem;

pub type ItemCallback<C> = Box<dyn FnMut(&TabItem<C>)>;
pub type ChangedCallback<C> = Box<dyn FnMut(Option<&TabItem<C>>)>;
pub type RequestCallback<C> = Box<dyn FnMut() -> Option<TabItem<C>>>;

/// Notification slots. Every slot is optional and an empty slot is a no-op.
pub struct TabCallbacks<C> {
    /// Any selection change; `None` when the selection was cleared
    pub on_changed: Option<ChangedCallback<C>>,
    pub on_selected: Option<ItemCallback<C>>,
    pub on_unselected: Option<ItemCallback<C>>,
    /// Supplies the tab created by the add action
    pub on_item_requested: Option<RequestCallback<C>>,
    pub on_removed: Option<ItemCallback<C>>,
}

impl<C> Default for TabCallbacks<C> {
    fn default() -> Self {
        TabCallbacks {
            on_changed: None,
            on_selected: None,
            on_unselected: None,
            on_item_requested: None,
            on_removed: None,
        }
    }
}

impl<C> fmt::Debug for TabCallbacks<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabCallbacks")
            .field("on_changed", &self.on_changed.is_some())
            .field("on_selected", &self.on_selected.is_some())
            .field("on_unselected", &self.on_unselected.is_some())
            .field("on_item_requested", &self.on_item_requested.is_some())
            .field("on_removed", &self.on_removed.is_some())
            .finish()
    }
}

impl<C> TabCallbacks<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_changed(mut self, f: impl FnMut(Option<&TabItem<C>>) + 'static) -> Self {
        self.on_changed = Some(Box::new(f));
        self
    }

    pub fn on_selected(mut self, f: impl FnMut(&TabItem<C>) + 'static) -> Self {
        self.on_selected = Some(Box::new(f));
        self
    }

    pub fn on_unselected(mut self, f: impl FnMut(&TabItem<C>) + 'static) -> Self {
        self.on_unselected = Some(Box::new(f));
        self
    }

    pub fn on_item_requested(mut self, f: impl FnMut() -> Option<TabItem<C>> + 'static) -> Self {
        self.on_item_requested = Some(Box::new(f));
        self
    }

    pub fn on_removed(mut self, f: impl FnMut(&TabItem<C>) + 'static) -> Self {
        self.on_removed = Some(Box::new(f));
        self
    }

    pub(crate) fn changed(&mut self, item: Option<&TabItem<C>>) {
        if let Some(f) = self.on_changed.as_mut() {
            f(item);
        }
    }

    pub(crate) fn selected(&mut self, item: &TabItem<C>) {
        if let Some(f) = self.on_selected.as_mut() {
            f(item);
        }
    }

    pub(crate) fn unselected(&mut self, item: &TabItem<C>) {
        if let Some(f) = self.on_unselected.as_mut() {
            f(item);
        }
    }

    pub(crate) fn removed(&mut self, item: &TabItem<C>) {
        if let Some(f) = self.on_removed.as_mut() {
            f(item);
        }
    }

    pub(crate) fn request_item(&mut self) -> Option<TabItem<C>> {
        self.on_item_requested.as_mut().and_then(|f| f())
    }
}
