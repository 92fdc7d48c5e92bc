//! Adaptive tab bar for terminal UIs.
//!
//! The core lives in [`tabs`]: a [`tabs::TabBar`] lays out as many tab
//! buttons as fit its area and routes the rest into an overflow menu.
//! [`tui`] is an interactive demo built on it and [`cli`] prints layouts
//! for scripting.

pub mod cli;
pub mod io;
pub mod model;
pub mod tabs;
pub mod tui;
pub mod util;
