//! Arrangement strategies for bar containers.
//!
//! Pure geometry: given the minimum sizes of the visible children, report the
//! container's minimum size, or place the children inside an area. Hidden
//! children are simply not passed in.

use ratatui::layout::{Rect, Size};

/// Edge reserved by a border arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Right,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrangement {
    /// Every child fills the whole area
    Stack,
    /// Left to right at minimum width, full height
    Row,
    /// Top to bottom at minimum height, full width
    Column,
    /// Fixed column count, filled row by row
    GridColumns(u16),
    /// Fixed row count, filled column by column
    GridRows(u16),
    /// Child 0 fills what is left after child 1 takes the reserved edge
    Border(Edge),
}

impl Arrangement {
    pub fn min_size(&self, children: &[Size], spacing: u16) -> Size {
        if children.is_empty() {
            return Size::new(0, 0);
        }
        let gaps = spacing.saturating_mul(cell_count(children.len()).saturating_sub(1));
        match *self {
            Arrangement::Stack => Size::new(max_width(children), max_height(children)),
            Arrangement::Row => Size::new(
                sum(children.iter().map(|c| c.width)).saturating_add(gaps),
                max_height(children),
            ),
            Arrangement::Column => Size::new(
                max_width(children),
                sum(children.iter().map(|c| c.height)).saturating_add(gaps),
            ),
            Arrangement::GridColumns(cols) => {
                let (cols, rows) = grid_shape_by_columns(cols, children.len());
                grid_min(children, cols, rows, spacing)
            }
            Arrangement::GridRows(rows) => {
                let (cols, rows) = grid_shape_by_rows(rows, children.len());
                grid_min(children, cols, rows, spacing)
            }
            Arrangement::Border(edge) => {
                let center = children[0];
                let Some(reserved) = children.get(1) else {
                    return center;
                };
                match edge {
                    Edge::Right => Size::new(
                        center
                            .width
                            .saturating_add(spacing)
                            .saturating_add(reserved.width),
                        center.height.max(reserved.height),
                    ),
                    Edge::Bottom => Size::new(
                        center.width.max(reserved.width),
                        center
                            .height
                            .saturating_add(spacing)
                            .saturating_add(reserved.height),
                    ),
                }
            }
        }
    }

    /// Place `children` inside `area`. Returns one rect per child, in order.
    pub fn arrange(&self, area: Rect, children: &[Size], spacing: u16) -> Vec<Rect> {
        match *self {
            Arrangement::Stack => vec![area; children.len()],
            Arrangement::Row => {
                let mut x = area.x;
                children
                    .iter()
                    .map(|c| {
                        let rect = Rect::new(x, area.y, c.width, area.height);
                        x = x.saturating_add(c.width).saturating_add(spacing);
                        rect
                    })
                    .collect()
            }
            Arrangement::Column => {
                let mut y = area.y;
                children
                    .iter()
                    .map(|c| {
                        let rect = Rect::new(area.x, y, area.width, c.height);
                        y = y.saturating_add(c.height).saturating_add(spacing);
                        rect
                    })
                    .collect()
            }
            Arrangement::GridColumns(cols) => {
                let (cols, rows) = grid_shape_by_columns(cols, children.len());
                (0..children.len())
                    .map(|i| {
                        let per_row = usize::from(cols);
                        let (col, row) = (cell_count(i % per_row), cell_count(i / per_row));
                        grid_cell(area, cols, rows, spacing, col, row)
                    })
                    .collect()
            }
            Arrangement::GridRows(rows) => {
                let (cols, rows) = grid_shape_by_rows(rows, children.len());
                (0..children.len())
                    .map(|i| {
                        let per_col = usize::from(rows);
                        let (col, row) = (cell_count(i / per_col), cell_count(i % per_col));
                        grid_cell(area, cols, rows, spacing, col, row)
                    })
                    .collect()
            }
            Arrangement::Border(edge) => {
                let Some(reserved) = children.get(1) else {
                    return vec![area; children.len()];
                };
                let (center, edge_rect) = match edge {
                    Edge::Right => {
                        let w = reserved.width.min(area.width);
                        (
                            Rect::new(
                                area.x,
                                area.y,
                                area.width.saturating_sub(w).saturating_sub(spacing),
                                area.height,
                            ),
                            Rect::new(area.right() - w, area.y, w, area.height),
                        )
                    }
                    Edge::Bottom => {
                        let h = reserved.height.min(area.height);
                        (
                            Rect::new(
                                area.x,
                                area.y,
                                area.width,
                                area.height.saturating_sub(h).saturating_sub(spacing),
                            ),
                            Rect::new(area.x, area.bottom() - h, area.width, h),
                        )
                    }
                };
                vec![center, edge_rect]
            }
        }
    }
}

fn sum(values: impl Iterator<Item = u16>) -> u16 {
    values.fold(0u16, |acc, v| acc.saturating_add(v))
}

fn max_width(children: &[Size]) -> u16 {
    children.iter().map(|c| c.width).max().unwrap_or(0)
}

fn max_height(children: &[Size]) -> u16 {
    children.iter().map(|c| c.height).max().unwrap_or(0)
}

/// A child count or index as cells, saturating at `u16::MAX`.
pub fn cell_count(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

fn grid_shape_by_columns(cols: u16, count: usize) -> (u16, u16) {
    let cols = cols.max(1);
    let rows = cell_count(count.div_ceil(usize::from(cols))).max(1);
    (cols, rows)
}

fn grid_shape_by_rows(rows: u16, count: usize) -> (u16, u16) {
    let rows = rows.max(1);
    let cols = cell_count(count.div_ceil(usize::from(rows))).max(1);
    (cols, rows)
}

fn grid_min(children: &[Size], cols: u16, rows: u16, spacing: u16) -> Size {
    Size::new(
        max_width(children)
            .saturating_mul(cols)
            .saturating_add(spacing.saturating_mul(cols - 1)),
        max_height(children)
            .saturating_mul(rows)
            .saturating_add(spacing.saturating_mul(rows - 1)),
    )
}

fn grid_cell(area: Rect, cols: u16, rows: u16, spacing: u16, col: u16, row: u16) -> Rect {
    let cell_w = area.width.saturating_sub(spacing.saturating_mul(cols - 1)) / cols;
    let cell_h = area.height.saturating_sub(spacing.saturating_mul(rows - 1)) / rows;
    Rect::new(
        area.x.saturating_add(col.saturating_mul(cell_w.saturating_add(spacing))),
        area.y.saturating_add(row.saturating_mul(cell_h.saturating_add(spacing))),
        cell_w,
        cell_h,
    )
}
