//! The adaptive tab bar.
//!
//! [`TabBar`] owns the tab collection, the button cache and the single open
//! overflow menu. Every mutation that changes what the bar shows runs a
//! layout pass straight away (once an area is known), so geometry and the
//! indicator are always current before the next event is handled.

pub mod arrange;
pub mod button;
pub mod callbacks;
pub mod fit;
pub mod host;
pub mod indicator;
pub mod overflow;
pub mod placement;

use std::collections::HashSet;

use ratatui::layout::{Rect, Size};

use crate::model::{
    MetricsConfig, RemovalPolicy, SelectionChange, TabCollection, TabId, TabItem, TabStripConfig,
};
use crate::util::unicode::truncate_to_width;

use button::{ActionButton, ButtonCache, Importance, TabAction, TabButton, TextAlign};
use callbacks::TabCallbacks;
use fit::{BarMode, BarPlan, FitParams, FitSearch};
use host::{Host, TerminalHost};
use indicator::{Indicator, SelectionState};
use overflow::{MenuId, OverflowMenu};
use placement::{Axis, Placement};

/// Behaviour switches for a bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarOptions {
    pub placement: Placement,
    pub closable: bool,
    pub show_add_button: bool,
    pub on_remove: RemovalPolicy,
    pub fit_search: FitSearch,
    pub max_label_width: usize,
    pub label_align: TextAlign,
    pub metrics: MetricsConfig,
}

impl Default for BarOptions {
    fn default() -> Self {
        BarOptions::from(&TabStripConfig::default())
    }
}

impl From<&TabStripConfig> for BarOptions {
    fn from(config: &TabStripConfig) -> Self {
        BarOptions {
            placement: config.bar.placement,
            closable: config.bar.closable,
            show_add_button: config.bar.show_add_button,
            on_remove: config.bar.on_remove,
            fit_search: config.bar.fit_search,
            max_label_width: config.bar.max_label_width,
            label_align: config.bar.label_align,
            metrics: config.metrics,
        }
    }
}

/// Regions of the last laid-out area
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BarGeometry {
    pub area: Rect,
    pub bar: Rect,
    /// Strip between bar and content holding the divider and the indicator
    pub band: Rect,
    pub content: Rect,
}

pub struct TabBar<C> {
    tabs: TabCollection<C>,
    cache: ButtonCache,
    options: BarOptions,
    host: Box<dyn Host>,
    callbacks: TabCallbacks<C>,
    add_button: ActionButton,
    overflow: ActionButton,
    menu: Option<OverflowMenu>,
    menus_opened: u64,
    plan: BarPlan,
    geometry: BarGeometry,
    indicator: Indicator,
    /// A user-initiated selection is waiting for the next pass to animate it
    transitioning: bool,
    area: Option<Rect>,
}

impl<C> TabBar<C> {
    pub fn new(items: Vec<TabItem<C>>) -> Self {
        Self::with_options(items, BarOptions::default(), TerminalHost::default())
    }

    pub fn with_options(
        items: Vec<TabItem<C>>,
        options: BarOptions,
        host: impl Host + 'static,
    ) -> Self {
        let mut bar = TabBar {
            tabs: TabCollection::new(items),
            cache: ButtonCache::new(),
            options,
            host: Box::new(host),
            callbacks: TabCallbacks::default(),
            add_button: ActionButton::add(),
            overflow: ActionButton::overflow(),
            menu: None,
            menus_opened: 0,
            plan: fit::plan(
                &FitParams {
                    placement: Placement::Top,
                    form_factor: Default::default(),
                    spacing: 0,
                    add: None,
                    overflow: Size::new(0, 0),
                },
                &[],
                0,
            ),
            geometry: BarGeometry::default(),
            indicator: Indicator::hidden(),
            transitioning: false,
            area: None,
        };
        bar.provisional_plan();
        bar
    }

    pub fn with_callbacks(mut self, callbacks: TabCallbacks<C>) -> Self {
        self.callbacks = callbacks;
        self
    }

    pub fn callbacks_mut(&mut self) -> &mut TabCallbacks<C> {
        &mut self.callbacks
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn items(&self) -> &[TabItem<C>] {
        self.tabs.items()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.tabs.current()
    }

    pub fn selected_item(&self) -> Option<&TabItem<C>> {
        self.tabs.current_item()
    }

    pub fn options(&self) -> &BarOptions {
        &self.options
    }

    pub fn placement(&self) -> Placement {
        self.options.placement
    }

    pub fn mode(&self) -> BarMode {
        self.plan.mode()
    }

    pub fn plan(&self) -> &BarPlan {
        &self.plan
    }

    pub fn visible_count(&self) -> usize {
        self.plan.visible
    }

    pub fn hidden_count(&self) -> usize {
        self.tabs.len() - self.plan.visible.min(self.tabs.len())
    }

    pub fn hidden_items(&self) -> &[TabItem<C>] {
        &self.tabs.items()[self.plan.visible.min(self.tabs.len())..]
    }

    /// Tabs with a button in the bar, with their buttons
    pub fn visible_buttons(&self) -> impl Iterator<Item = (&TabItem<C>, &TabButton)> {
        self.tabs
            .iter()
            .take(self.plan.visible)
            .filter_map(|item| self.cache.get(item.id()).map(|button| (item, button)))
    }

    pub fn button(&self, id: TabId) -> Option<&TabButton> {
        self.cache.get(id)
    }

    pub fn button_mut(&mut self, id: TabId) -> Option<&mut TabButton> {
        self.cache.get_mut(id)
    }

    pub fn cached_buttons(&self) -> usize {
        self.cache.len()
    }

    /// The add action, when enabled
    pub fn add_button(&self) -> Option<&ActionButton> {
        self.add_button.visible.then_some(&self.add_button)
    }

    pub fn overflow_button(&self) -> &ActionButton {
        &self.overflow
    }

    pub fn indicator(&self) -> &Indicator {
        &self.indicator
    }

    pub fn geometry(&self) -> &BarGeometry {
        &self.geometry
    }

    pub fn menu(&self) -> Option<&OverflowMenu> {
        self.menu.as_ref()
    }

    pub fn selection_state(&self) -> SelectionState {
        SelectionState::resolve(self.tabs.current(), self.plan.visible)
    }

    /// Smallest size the bar can be laid out in: one tab (plus the overflow
    /// action when there are more) and the indicator strip.
    pub fn min_size(&self) -> Size {
        let params = self.fit_params();
        let sizes = self.measure_tabs();
        let plan = fit::plan(&params, &sizes, sizes.len().min(1));
        let thickness = self.options.metrics.indicator_thickness;
        match self.options.placement.axis() {
            Axis::Horizontal => Size::new(
                plan.min_size.width,
                plan.min_size.height.saturating_add(thickness),
            ),
            Axis::Vertical => Size::new(
                plan.min_size.width.saturating_add(thickness),
                plan.min_size.height,
            ),
        }
    }

    // -----------------------------------------------------------------------
    // Layout
    // -----------------------------------------------------------------------

    /// Fit the bar into `area`, place every control and reposition the indicator.
    pub fn layout(&mut self, area: Rect) {
        self.area = Some(area);

        let live: HashSet<TabId> = self.tabs.iter().map(TabItem::id).collect();
        self.cache.prune(|id| live.contains(&id));

        let sizes = self.refresh_buttons();
        let params = self.fit_params();
        let plan = fit::fit(
            &params,
            &sizes,
            Size::new(area.width, area.height),
            self.options.fit_search,
        );

        self.geometry = split_area(
            self.options.placement,
            area,
            plan.min_size,
            self.options.metrics.indicator_thickness,
        );
        let rects = plan.arrange(self.geometry.bar, &params, &sizes);

        for (i, item) in self.tabs.iter().enumerate() {
            if let Some(button) = self.cache.get_mut(item.id()) {
                button.rect = rects.tabs.get(i).copied().unwrap_or_default();
            }
        }
        self.add_button.visible = self.options.show_add_button;
        self.add_button.rect = rects.add.unwrap_or_default();
        self.overflow.visible = plan.has_overflow();
        self.overflow.rect = rects.overflow.unwrap_or_default();

        if self
            .menu
            .as_ref()
            .is_some_and(|menu| menu.first_hidden != plan.visible || !plan.has_overflow())
        {
            self.close_menu("visible count changed");
        }
        if let Some(menu) = self.menu.as_mut() {
            menu.anchor = self.overflow.rect;
        }

        self.plan = plan;
        self.update_indicator();
    }

    fn relayout(&mut self) {
        match self.area {
            Some(area) => self.layout(area),
            None => self.provisional_plan(),
        }
    }

    /// Shape used before the first layout pass: one tab, the rest in overflow.
    fn provisional_plan(&mut self) {
        let sizes = self.refresh_buttons();
        self.plan = fit::plan(&self.fit_params(), &sizes, 1);
        self.overflow.visible = self.plan.has_overflow();
        self.add_button.visible = self.options.show_add_button;
    }

    fn fit_params(&self) -> FitParams {
        let padding = self.options.metrics.padding;
        FitParams {
            placement: self.options.placement,
            form_factor: self.host.form_factor(),
            spacing: self.options.metrics.spacing,
            add: self
                .options
                .show_add_button
                .then(|| self.add_button.min_size(self.host.as_ref(), padding)),
            overflow: self.overflow.min_size(self.host.as_ref(), padding),
        }
    }

    /// Bring every tab's button up to date and return the button sizes.
    fn refresh_buttons(&mut self) -> Vec<Size> {
        let icon_position = self
            .options
            .placement
            .icon_position(self.host.form_factor());
        let padding = self.options.metrics.padding;
        let current = self.tabs.current();

        let mut sizes = Vec::with_capacity(self.tabs.len());
        for (i, item) in self.tabs.iter().enumerate() {
            let button = self.cache.get_or_create(item);
            button.label = truncate_to_width(&item.label, self.options.max_label_width);
            button.icon = item.icon.clone();
            button.icon_position = icon_position;
            button.importance = if current == Some(i) {
                Importance::High
            } else {
                Importance::Medium
            };
            button.alignment = self.options.label_align;
            button.closable = self.options.closable;
            sizes.push(button.min_size(self.host.as_ref(), padding));
        }
        sizes
    }

    fn measure_tabs(&self) -> Vec<Size> {
        let icon_position = self
            .options
            .placement
            .icon_position(self.host.form_factor());
        self.tabs
            .iter()
            .map(|item| {
                button::measure(
                    &truncate_to_width(&item.label, self.options.max_label_width),
                    item.icon.as_ref(),
                    icon_position,
                    self.options.closable,
                    self.host.as_ref(),
                    self.options.metrics.padding,
                )
            })
            .collect()
    }

    fn update_indicator(&mut self) {
        let animate = std::mem::take(&mut self.transitioning);
        let anchor = match self.selection_state() {
            SelectionState::Unselected => None,
            SelectionState::Visible(i) => self
                .tabs
                .get(i)
                .and_then(|item| self.cache.get(item.id()))
                .map(|button| button.rect),
            SelectionState::Overflowed(_) => Some(self.overflow.rect),
        };
        self.indicator = Indicator {
            rect: anchor.map(|anchor| {
                indicator::position(
                    self.options.placement,
                    self.geometry.bar,
                    anchor,
                    self.options.metrics.indicator_thickness,
                )
            }),
            animate,
        };
    }

    // -----------------------------------------------------------------------
    // Configuration changes
    // -----------------------------------------------------------------------

    pub fn set_placement(&mut self, placement: Placement) {
        if self.options.placement != placement {
            self.options.placement = placement;
            self.relayout();
        }
    }

    pub fn set_options(&mut self, options: BarOptions) {
        self.options = options;
        self.relayout();
    }

    pub fn set_host(&mut self, host: impl Host + 'static) {
        self.host = Box::new(host);
        self.relayout();
    }

    // -----------------------------------------------------------------------
    // Collection mutators
    // -----------------------------------------------------------------------

    /// Append a tab. The selection does not move.
    pub fn append(&mut self, item: TabItem<C>) -> TabId {
        let id = self.tabs.push(item);
        self.structure_changed();
        id
    }

    pub fn insert(&mut self, index: usize, item: TabItem<C>) -> TabId {
        let id = self.tabs.insert(index, item);
        self.structure_changed();
        id
    }

    /// Edit a tab in place; the next pass picks up label and icon changes.
    pub fn update(&mut self, id: TabId, f: impl FnOnce(&mut TabItem<C>)) -> bool {
        let Some(item) = self.tabs.position(id).and_then(|i| self.tabs.get_mut(i)) else {
            return false;
        };
        f(item);
        self.relayout();
        true
    }

    pub fn remove(&mut self, id: TabId) -> Option<TabItem<C>> {
        let index = self.tabs.position(id)?;
        self.remove_index(index)
    }

    /// Remove the tab at `index` and hand it back. Out of range is a no-op.
    pub fn remove_index(&mut self, index: usize) -> Option<TabItem<C>> {
        let removal = self.tabs.remove(index, self.options.on_remove)?;
        self.cache.evict(removal.item.id());
        tracing::debug!(
            tab = %removal.item.id(),
            index,
            was_selected = removal.was_selected,
            current = ?removal.current,
            "removed tab"
        );

        if removal.was_selected {
            self.callbacks.unselected(&removal.item);
            let current = removal.current.and_then(|i| self.tabs.get(i));
            self.callbacks.changed(current);
            if let Some(item) = current {
                self.callbacks.selected(item);
            }
        }
        self.callbacks.removed(&removal.item);

        self.structure_changed();
        Some(removal.item)
    }

    /// Ask the host for a new tab (the add action), append it and select it.
    pub fn request_new_tab(&mut self) -> Option<TabId> {
        let item = self.callbacks.request_item()?;
        let id = self.append(item);
        self.select(id);
        Some(id)
    }

    fn structure_changed(&mut self) {
        self.close_menu("collection changed");
        self.transitioning = false;
        self.relayout();
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Select by index. Out-of-range or already-selected indices are ignored.
    pub fn select_index(&mut self, index: usize) -> bool {
        let Some(change) = self.tabs.select(index) else {
            return false;
        };
        self.transitioning = true;
        self.notify_selection(change);
        self.relayout();
        true
    }

    /// Select by identity. Unknown ids are ignored.
    pub fn select(&mut self, id: TabId) -> bool {
        match self.tabs.position(id) {
            Some(index) => self.select_index(index),
            None => false,
        }
    }

    pub fn unselect(&mut self) -> bool {
        let Some(change) = self.tabs.unselect() else {
            return false;
        };
        self.notify_selection(change);
        self.relayout();
        true
    }

    fn notify_selection(&mut self, change: SelectionChange) {
        if let Some(item) = change.previous.and_then(|i| self.tabs.get(i)) {
            self.callbacks.unselected(item);
        }
        let current = change.current.and_then(|i| self.tabs.get(i));
        self.callbacks.changed(current);
        if let Some(item) = current {
            self.callbacks.selected(item);
        }
    }

    // -----------------------------------------------------------------------
    // Actions and the overflow menu
    // -----------------------------------------------------------------------

    /// Run the action a control was wired to. Returns whether anything happened.
    pub fn activate(&mut self, action: TabAction) -> bool {
        match action {
            TabAction::Select(id) => self.select(id),
            TabAction::Close(id) => self.remove(id).is_some(),
            TabAction::OpenOverflow => self.open_overflow_menu().is_some(),
            TabAction::AddTab => self.request_new_tab().is_some(),
        }
    }

    /// Build the menu of hidden tabs, replacing any menu already open.
    /// Returns `None` when nothing is hidden.
    pub fn open_overflow_menu(&mut self) -> Option<&OverflowMenu> {
        if self.hidden_count() == 0 {
            return None;
        }
        self.close_menu("replaced");
        self.menus_opened += 1;
        let menu = OverflowMenu::build(
            MenuId(self.menus_opened),
            self.tabs.items(),
            self.plan.visible,
            self.overflow.rect,
            self.options.max_label_width,
        );
        tracing::debug!(entries = menu.len(), first_hidden = menu.first_hidden, "opened overflow menu");
        self.menu = Some(menu);
        self.menu.as_ref()
    }

    /// Pick entry `j` of the open menu: select its tab and close the menu.
    pub fn choose_menu_entry(&mut self, j: usize) -> bool {
        let Some(index) = self.menu.as_ref().and_then(|m| m.entry(j)).map(|e| e.index) else {
            return false;
        };
        self.select_index(index);
        self.close_menu("entry chosen");
        true
    }

    /// Close the menu without choosing (outside click, escape).
    pub fn dismiss_menu(&mut self) -> bool {
        self.close_menu("dismissed")
    }

    fn close_menu(&mut self, reason: &str) -> bool {
        match self.menu.take() {
            Some(menu) => {
                tracing::debug!(menu = menu.id().0, reason, "closed overflow menu");
                true
            }
            None => false,
        }
    }
}

impl<C> std::fmt::Debug for TabBar<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TabBar")
            .field("len", &self.tabs.len())
            .field("selected", &self.tabs.current())
            .field("mode", &self.plan.mode())
            .field("geometry", &self.geometry)
            .field("menu_open", &self.menu.is_some())
            .finish()
    }
}

/// Carve `area` into bar, indicator band and content for `placement`.
fn split_area(placement: Placement, area: Rect, bar: Size, thickness: u16) -> BarGeometry {
    match placement {
        Placement::Top | Placement::Bottom => {
            let bar_h = bar.height.min(area.height);
            let band_h = thickness.min(area.height - bar_h);
            let content_h = area.height - bar_h - band_h;
            let (bar_y, band_y, content_y) = if placement == Placement::Top {
                (area.y, area.y + bar_h, area.y + bar_h + band_h)
            } else {
                (area.y + content_h + band_h, area.y + content_h, area.y)
            };
            BarGeometry {
                area,
                bar: Rect::new(area.x, bar_y, area.width, bar_h),
                band: Rect::new(area.x, band_y, area.width, band_h),
                content: Rect::new(area.x, content_y, area.width, content_h),
            }
        }
        Placement::Leading | Placement::Trailing => {
            let bar_w = bar.width.min(area.width);
            let band_w = thickness.min(area.width - bar_w);
            let content_w = area.width - bar_w - band_w;
            let (bar_x, band_x, content_x) = if placement == Placement::Leading {
                (area.x, area.x + bar_w, area.x + bar_w + band_w)
            } else {
                (area.x + content_w + band_w, area.x + content_w, area.x)
            };
            BarGeometry {
                area,
                bar: Rect::new(bar_x, area.y, bar_w, area.height),
                band: Rect::new(band_x, area.y, band_w, area.height),
                content: Rect::new(content_x, area.y, content_w, area.height),
            }
        }
    }
}

#[cfg(test)]
mod tests;
