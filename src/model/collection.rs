use super::config::RemovalPolicy;
use super::item::{TabId, TabItem};

/// A change of the selected index. Indices refer to the collection after the
/// operation that produced the change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    pub previous: Option<usize>,
    pub current: Option<usize>,
}

/// Result of removing an item from the collection.
#[derive(Debug)]
pub struct Removal<C> {
    pub item: TabItem<C>,
    pub index: usize,
    /// The removed item was the selected one
    pub was_selected: bool,
    /// Selected index after removal
    pub current: Option<usize>,
}

/// Ordered tabs plus the selected index.
///
/// Insertion order is display order. `current` is either `None` or a valid
/// index into `items`; every mutator keeps it that way.
#[derive(Debug)]
pub struct TabCollection<C> {
    items: Vec<TabItem<C>>,
    current: Option<usize>,
}

impl<C> Default for TabCollection<C> {
    fn default() -> Self {
        TabCollection {
            items: Vec::new(),
            current: None,
        }
    }
}

impl<C> TabCollection<C> {
    /// Build a collection with the first item selected (if any).
    pub fn new(items: Vec<TabItem<C>>) -> Self {
        let current = if items.is_empty() { None } else { Some(0) };
        TabCollection { items, current }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TabItem<C>> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut TabItem<C>> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TabItem<C>> {
        self.items.iter()
    }

    pub fn items(&self) -> &[TabItem<C>] {
        &self.items
    }

    pub fn position(&self, id: TabId) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn contains(&self, id: TabId) -> bool {
        self.position(id).is_some()
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn current_item(&self) -> Option<&TabItem<C>> {
        self.current.and_then(|i| self.items.get(i))
    }

    /// Append at the end. Selection is left alone.
    pub fn push(&mut self, item: TabItem<C>) -> TabId {
        let id = item.id();
        self.items.push(item);
        id
    }

    /// Insert before `index` (clamped to the end). The selected item stays selected.
    pub fn insert(&mut self, index: usize, item: TabItem<C>) -> TabId {
        let id = item.id();
        let index = index.min(self.items.len());
        self.items.insert(index, item);
        if let Some(c) = self.current
            && index <= c
        {
            self.current = Some(c + 1);
        }
        id
    }

    /// Select by index. Out-of-range or already-selected indices are a no-op.
    pub fn select(&mut self, index: usize) -> Option<SelectionChange> {
        if index >= self.items.len() || self.current == Some(index) {
            return None;
        }
        let previous = self.current.replace(index);
        Some(SelectionChange {
            previous,
            current: Some(index),
        })
    }

    pub fn unselect(&mut self) -> Option<SelectionChange> {
        let previous = self.current.take()?;
        Some(SelectionChange {
            previous: Some(previous),
            current: None,
        })
    }

    /// Remove the item at `index`, re-resolving the selection per `policy`
    /// when the removed item was selected.
    pub fn remove(&mut self, index: usize, policy: RemovalPolicy) -> Option<Removal<C>> {
        if index >= self.items.len() {
            return None;
        }
        let item = self.items.remove(index);
        let was_selected = self.current == Some(index);

        match self.current {
            Some(c) if c > index => self.current = Some(c - 1),
            Some(c) if c == index => {
                self.current = if self.items.is_empty() {
                    None
                } else {
                    match policy {
                        RemovalPolicy::SelectNext => Some(index.min(self.items.len() - 1)),
                        // Removing the first item falls through to its successor
                        RemovalPolicy::SelectPrevious => Some(index.saturating_sub(1)),
                        RemovalPolicy::Clear => None,
                    }
                };
            }
            _ => {}
        }

        Some(Removal {
            item,
            index,
            was_selected,
            current: self.current,
        })
    }
}
