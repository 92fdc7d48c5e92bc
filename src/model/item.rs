use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_TAB_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a tab item. Allocated once per constructed item and never reused,
/// so two items with the same label are still distinct tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TabId(u64);

impl TabId {
    fn next() -> Self {
        TabId(NEXT_TAB_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tab#{}", self.0)
    }
}

/// Icon reference. In the terminal host this is a short glyph string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Icon(pub String);

impl Icon {
    pub fn new(glyph: impl Into<String>) -> Self {
        Icon(glyph.into())
    }

    pub fn glyph(&self) -> &str {
        &self.0
    }
}

/// A single tab: a label, an optional icon and the caller's content payload.
///
/// Not `Clone`: a tab is identified by its [`TabId`], and a copy with the
/// same id would break that.
#[derive(Debug)]
pub struct TabItem<C> {
    id: TabId,
    pub label: String,
    pub icon: Option<Icon>,
    pub content: C,
}

impl<C> TabItem<C> {
    pub fn new(label: impl Into<String>, content: C) -> Self {
        TabItem {
            id: TabId::next(),
            label: label.into(),
            icon: None,
            content,
        }
    }

    pub fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    /// Consume the item and hand the content back to the caller.
    pub fn into_content(self) -> C {
        self.content
    }
}
