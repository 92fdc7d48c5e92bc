use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::item::{Icon, TabItem};
use crate::tabs::button::TextAlign;
use crate::tabs::fit::FitSearch;
use crate::tabs::placement::{FormFactor, Placement};

/// Configuration from tabstrip.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TabStripConfig {
    #[serde(default)]
    pub bar: BarConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    #[serde(default)]
    pub ui: UiConfig,
    /// Initial tabs for the demo and the CLI
    #[serde(default)]
    pub tabs: Vec<TabConfig>,
}

/// What happens to the selection when the selected tab is removed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RemovalPolicy {
    /// Select the tab that slides into the removed slot (or the new last tab)
    #[default]
    SelectNext,
    /// Select the tab before the removed one (or the new first tab)
    SelectPrevious,
    /// Leave nothing selected
    Clear,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarConfig {
    #[serde(default)]
    pub placement: Placement,
    #[serde(default)]
    pub form_factor: FormFactor,
    /// Show a close marker on every tab button
    #[serde(default = "default_true")]
    pub closable: bool,
    /// Append an "add tab" button after the tab buttons
    #[serde(default = "default_true")]
    pub show_add_button: bool,
    #[serde(default)]
    pub on_remove: RemovalPolicy,
    #[serde(default)]
    pub fit_search: FitSearch,
    /// Labels wider than this (in cells) are truncated with an ellipsis
    #[serde(default = "default_max_label_width")]
    pub max_label_width: usize,
    /// Label position inside buttons wider than their label (side bars)
    #[serde(default)]
    pub label_align: TextAlign,
}

impl Default for BarConfig {
    fn default() -> Self {
        BarConfig {
            placement: Placement::default(),
            form_factor: FormFactor::default(),
            closable: true,
            show_add_button: true,
            on_remove: RemovalPolicy::default(),
            fit_search: FitSearch::default(),
            max_label_width: default_max_label_width(),
            label_align: TextAlign::default(),
        }
    }
}

/// Scalar theme values used by layout, all in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_one")]
    pub padding: u16,
    #[serde(default = "default_one")]
    pub spacing: u16,
    #[serde(default = "default_one")]
    pub indicator_thickness: u16,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        MetricsConfig {
            padding: 1,
            spacing: 1,
            indicator_thickness: 1,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Color overrides, e.g. `primary = "#FB4196"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabConfig {
    pub label: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub content: String,
}

impl TabConfig {
    pub fn to_item(&self) -> TabItem<String> {
        let item = TabItem::new(self.label.clone(), self.content.clone());
        match &self.icon {
            Some(glyph) => item.with_icon(Icon::new(glyph.clone())),
            None => item,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_one() -> u16 {
    1
}

fn default_max_label_width() -> usize {
    24
}
