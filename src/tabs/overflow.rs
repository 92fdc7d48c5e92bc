use ratatui::layout::Rect;

use crate::model::TabItem;
use crate::util::unicode::truncate_to_width;

/// Identity of one opened menu. Each open gets a fresh id, so a host can tell
/// a reopened menu from the one it was showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuId(pub(crate) u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    /// Absolute index of the tab in the collection
    pub index: usize,
}

/// Floating list of the tabs that did not fit.
#[derive(Debug, Clone)]
pub struct OverflowMenu {
    id: MenuId,
    /// Control the menu hangs off (the overflow action)
    pub anchor: Rect,
    /// Visible count the entries were built against
    pub first_hidden: usize,
    pub entries: Vec<MenuEntry>,
}

impl OverflowMenu {
    /// Build the menu for every tab from `first_hidden` on, in collection order.
    pub fn build<C>(
        id: MenuId,
        items: &[TabItem<C>],
        first_hidden: usize,
        anchor: Rect,
        max_label_width: usize,
    ) -> Self {
        let entries = items
            .iter()
            .enumerate()
            .skip(first_hidden)
            .map(|(index, item)| MenuEntry {
                label: truncate_to_width(&item.label, max_label_width),
                index,
            })
            .collect();
        OverflowMenu {
            id,
            anchor,
            first_hidden,
            entries,
        }
    }

    pub fn id(&self) -> MenuId {
        self.id
    }

    pub fn entry(&self, j: usize) -> Option<&MenuEntry> {
        self.entries.get(j)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_map_to_absolute_indices() {
        let items: Vec<TabItem<()>> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(|l| TabItem::new(*l, ()))
            .collect();
        let menu = OverflowMenu::build(MenuId(1), &items, 3, Rect::default(), 24);
        assert_eq!(menu.len(), 2);
        assert_eq!(menu.entry(0).map(|e| e.label.as_str()), Some("d"));
        assert_eq!(menu.entry(1).map(|e| e.index), Some(4));
        assert!(menu.entry(2).is_none());
    }

    #[test]
    fn test_long_labels_truncated() {
        let items = vec![TabItem::new("a very long tab label", ())];
        let menu = OverflowMenu::build(MenuId(1), &items, 0, Rect::default(), 6);
        assert_eq!(menu.entries[0].label, "a ver…");
    }
}
