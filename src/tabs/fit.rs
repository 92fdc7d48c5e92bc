//! Adaptive fit: how many tabs the bar can show directly.
//!
//! A candidate bar holds the first `i` tab buttons (plus the add button when
//! enabled) and, when `i < N`, the overflow action on the trailing edge. The
//! chosen count is the largest `i` whose bar fits the extent along the
//! placement's axis, never less than one while any tab exists.

use ratatui::layout::{Rect, Size};
use serde::{Deserialize, Serialize};

use super::arrange::{Arrangement, Edge, cell_count};
use super::placement::{Axis, FormFactor, Placement};

/// How candidate counts are searched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FitSearch {
    /// Scan from N down to 1, one measurement per candidate
    #[default]
    Linear,
    /// Binary search over 1..N-1 after checking N; relies on fit being monotonic
    Bisect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarMode {
    /// Every tab has a button, the overflow action is hidden
    Full,
    /// The first `n` tabs have buttons, the rest live in the overflow menu
    Overflow(usize),
}

/// Inputs to a fit pass that do not depend on the candidate count.
#[derive(Debug, Clone, Copy)]
pub struct FitParams {
    pub placement: Placement,
    pub form_factor: FormFactor,
    pub spacing: u16,
    /// Add button size, `None` when the add button is disabled
    pub add: Option<Size>,
    pub overflow: Size,
}

/// A candidate (or chosen) bar shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarPlan {
    pub total: usize,
    pub visible: usize,
    pub buttons: Arrangement,
    pub bar: Arrangement,
    /// Minimum size of the button container
    pub buttons_min: Size,
    /// Minimum size of the whole bar
    pub min_size: Size,
}

/// Where everything in a bar plan lands inside the bar rect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanRects {
    pub tabs: Vec<Rect>,
    pub add: Option<Rect>,
    pub overflow: Option<Rect>,
}

impl BarPlan {
    pub fn mode(&self) -> BarMode {
        if self.visible < self.total {
            BarMode::Overflow(self.visible)
        } else {
            BarMode::Full
        }
    }

    pub fn has_overflow(&self) -> bool {
        self.visible < self.total
    }

    pub fn hidden(&self) -> usize {
        self.total - self.visible
    }

    pub fn fits(&self, extent: Size, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.min_size.width <= extent.width,
            Axis::Vertical => self.min_size.height <= extent.height,
        }
    }

    pub fn arrange(&self, bar: Rect, params: &FitParams, tab_sizes: &[Size]) -> PlanRects {
        let mut bar_children = vec![self.buttons_min];
        if self.has_overflow() {
            bar_children.push(params.overflow);
        }
        let bar_rects = self.bar.arrange(bar, &bar_children, params.spacing);

        let children = button_children(params, &tab_sizes[..self.visible]);
        let mut rects = self.buttons.arrange(bar_rects[0], &children, params.spacing);
        let add = if params.add.is_some() { rects.pop() } else { None };

        PlanRects {
            tabs: rects,
            add,
            overflow: bar_rects.get(1).copied(),
        }
    }
}

fn button_children(params: &FitParams, visible_sizes: &[Size]) -> Vec<Size> {
    let mut children = visible_sizes.to_vec();
    if let Some(add) = params.add {
        children.push(add);
    }
    children
}

/// Shape of a bar showing the first `visible` of `tab_sizes.len()` tabs.
pub fn plan(params: &FitParams, tab_sizes: &[Size], visible: usize) -> BarPlan {
    let total = tab_sizes.len();
    let visible = visible.min(total);
    let vertical = params.placement.is_vertical();

    let buttons = if params.form_factor == FormFactor::Compact {
        let cells = cell_count(visible.max(1));
        if vertical {
            Arrangement::GridRows(cells)
        } else {
            Arrangement::GridColumns(cells)
        }
    } else if vertical {
        Arrangement::Column
    } else {
        Arrangement::Row
    };

    let children = button_children(params, &tab_sizes[..visible]);
    let buttons_min = buttons.min_size(&children, params.spacing);

    let (bar, min_size) = if visible < total {
        let edge = if vertical { Edge::Bottom } else { Edge::Right };
        let bar = Arrangement::Border(edge);
        let min = bar.min_size(&[buttons_min, params.overflow], params.spacing);
        (bar, min)
    } else {
        (Arrangement::Stack, buttons_min)
    };

    BarPlan {
        total,
        visible,
        buttons,
        bar,
        buttons_min,
        min_size,
    }
}

/// Pick the bar for `extent`.
pub fn fit(params: &FitParams, tab_sizes: &[Size], extent: Size, search: FitSearch) -> BarPlan {
    let total = tab_sizes.len();
    if total == 0 {
        return plan(params, tab_sizes, 0);
    }
    let axis = params.placement.axis();
    let mut measured = 0usize;
    let mut candidate = |i: usize| {
        measured += 1;
        plan(params, tab_sizes, i)
    };

    let chosen = match search {
        FitSearch::Linear => {
            let mut chosen = None;
            for i in (1..=total).rev() {
                let p = candidate(i);
                if p.fits(extent, axis) || i == 1 {
                    chosen = Some(p);
                    break;
                }
            }
            chosen.unwrap_or_else(|| plan(params, tab_sizes, 1))
        }
        FitSearch::Bisect => {
            let full = candidate(total);
            if full.fits(extent, axis) || total == 1 {
                full
            } else {
                // every candidate below N carries the overflow action, so the
                // required extent grows with the count
                let (mut lo, mut hi) = (1usize, total - 1);
                while lo < hi {
                    let mid = (lo + hi).div_ceil(2);
                    if candidate(mid).fits(extent, axis) {
                        lo = mid;
                    } else {
                        hi = mid - 1;
                    }
                }
                candidate(lo)
            }
        }
    };

    tracing::debug!(
        total,
        visible = chosen.visible,
        measured,
        ?search,
        extent = ?(extent.width, extent.height),
        "fit pass"
    );
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(placement: Placement) -> FitParams {
        FitParams {
            placement,
            form_factor: FormFactor::Desktop,
            spacing: 1,
            add: Some(Size::new(3, 1)),
            overflow: Size::new(3, 1),
        }
    }

    /// " Alpha ", " Beta ", " Gamma ", " Delta ", " Epsilon "
    fn five_tabs() -> Vec<Size> {
        [7, 6, 7, 7, 9].iter().map(|w| Size::new(*w, 1)).collect()
    }

    #[test]
    fn test_everything_fits() {
        let p = fit(&params(Placement::Top), &five_tabs(), Size::new(80, 10), FitSearch::Linear);
        assert_eq!(p.visible, 5);
        assert_eq!(p.mode(), BarMode::Full);
        assert_eq!(p.bar, Arrangement::Stack);
        // 7+6+7+7+9+3 plus five gaps
        assert_eq!(p.min_size, Size::new(44, 1));
    }

    #[test]
    fn test_exact_boundaries() {
        let tabs = five_tabs();
        let p = params(Placement::Top);
        assert_eq!(fit(&p, &tabs, Size::new(44, 1), FitSearch::Linear).visible, 5);
        assert_eq!(fit(&p, &tabs, Size::new(43, 1), FitSearch::Linear).visible, 4);
        // four tabs + add + overflow: 30 + 4 gaps + gap + 3
        assert_eq!(fit(&p, &tabs, Size::new(38, 1), FitSearch::Linear).visible, 4);
        assert_eq!(fit(&p, &tabs, Size::new(37, 1), FitSearch::Linear).visible, 3);
        assert_eq!(fit(&p, &tabs, Size::new(30, 1), FitSearch::Linear).visible, 3);
    }

    #[test]
    fn test_never_below_one() {
        let p = fit(&params(Placement::Top), &five_tabs(), Size::new(2, 1), FitSearch::Linear);
        assert_eq!(p.visible, 1);
        assert_eq!(p.mode(), BarMode::Overflow(1));
    }

    #[test]
    fn test_no_tabs() {
        let p = fit(&params(Placement::Top), &[], Size::new(2, 1), FitSearch::Linear);
        assert_eq!(p.visible, 0);
        assert_eq!(p.mode(), BarMode::Full);
        assert!(!p.has_overflow());
        assert_eq!(p.min_size, Size::new(3, 1));
    }

    #[test]
    fn test_vertical_uses_height() {
        let p = params(Placement::Leading);
        let tabs = five_tabs();
        // five rows, add row, five gaps
        assert_eq!(fit(&p, &tabs, Size::new(1, 11), FitSearch::Linear).visible, 5);
        // k rows + add + overflow: 2k + 3 rows
        assert_eq!(fit(&p, &tabs, Size::new(1, 10), FitSearch::Linear).visible, 3);
        assert_eq!(plan(&p, &tabs, 3).bar, Arrangement::Border(Edge::Bottom));
    }

    #[test]
    fn test_compact_uses_grid() {
        let mut p = params(Placement::Top);
        p.form_factor = FormFactor::Compact;
        assert_eq!(plan(&p, &five_tabs(), 3).buttons, Arrangement::GridColumns(3));
        p.placement = Placement::Trailing;
        assert_eq!(plan(&p, &five_tabs(), 0).buttons, Arrangement::GridRows(1));
    }

    #[test]
    fn test_bisect_matches_linear() {
        let tabs: Vec<Size> = (0..23).map(|i| Size::new(4 + (i % 5) as u16, 1)).collect();
        for placement in Placement::ALL {
            let p = params(placement);
            for extent in 0..200u16 {
                let size = Size::new(extent, extent / 4);
                assert_eq!(
                    fit(&p, &tabs, size, FitSearch::Linear).visible,
                    fit(&p, &tabs, size, FitSearch::Bisect).visible,
                    "extent {} placement {:?}",
                    extent,
                    placement
                );
            }
        }
    }

    #[test]
    fn test_arrange_overflow_on_right() {
        let p = params(Placement::Top);
        let tabs = five_tabs();
        let plan = fit(&p, &tabs, Size::new(40, 1), FitSearch::Linear);
        let rects = plan.arrange(Rect::new(0, 0, 40, 1), &p, &tabs);
        assert_eq!(rects.tabs.len(), 4);
        assert_eq!(rects.tabs[1], Rect::new(8, 0, 6, 1));
        assert_eq!(rects.add, Some(Rect::new(31, 0, 3, 1)));
        assert_eq!(rects.overflow, Some(Rect::new(37, 0, 3, 1)));
    }

    #[test]
    fn test_arrange_without_add_button() {
        let mut p = params(Placement::Top);
        p.add = None;
        let tabs = five_tabs();
        let plan = plan(&p, &tabs, 5);
        let rects = plan.arrange(Rect::new(0, 0, 80, 1), &p, &tabs);
        assert_eq!(rects.tabs.len(), 5);
        assert_eq!(rects.add, None);
        assert_eq!(rects.overflow, None);
    }
}
