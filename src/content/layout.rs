// src/content/layout.rs - grid coordinates and the placement contract shared by editor and renderer

use serde::{Deserialize, Serialize};

/// Column count of the full-width grid.
pub const GRID_COLUMNS: u32 = 12;
/// Smallest width/height (in grid units) a widget may have.
pub const MIN_WIDGET_SIZE: u32 = 2;
/// Rows a post may extend to; anything reaching further down is rejected.
pub const MAX_GRID_ROWS: u32 = 10_000;
pub const ROW_HEIGHT_PX: u32 = 30;
pub const MARGIN_PX: u32 = 10;
pub const CONTAINER_PADDING_PX: u32 = 20;

/// Breakpoints ordered from widest to narrowest: (name, min width in px, columns).
pub const BREAKPOINTS: &[(&str, u32, u32)] = &[
    ("lg", 1200, 12),
    ("md", 996, 10),
    ("sm", 768, 6),
    ("xs", 480, 4),
    ("xxs", 0, 2),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// CSS grid placement: 1-based start lines plus spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridPlacement {
    pub column_start: u32,
    pub column_span: u32,
    pub row_start: u32,
    pub row_span: u32,
}

impl GridPlacement {
    pub fn to_css(&self) -> String {
        format!(
            "grid-column-start: {}; grid-column-end: span {}; grid-row-start: {}; grid-row-end: span {};",
            self.column_start, self.column_span, self.row_start, self.row_span
        )
    }
}

impl Layout {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn placement(&self) -> GridPlacement {
        GridPlacement {
            column_start: self.x.saturating_add(1),
            column_span: self.w,
            row_start: self.y.saturating_add(1),
            row_span: self.h,
        }
    }

    /// First row below this widget.
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    pub fn overlaps(&self, other: &Layout) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Squeeze the layout into a grid of `cols` columns.
    pub fn fit_to(&self, cols: u32) -> Layout {
        let w = self.w.min(cols);
        let x = self.x.min(cols.saturating_sub(w));
        Layout { x, y: self.y, w, h: self.h }
    }

    /// Enforce the minimum size and keep the widget inside `cols` columns and the row limit.
    pub fn clamped(&self, cols: u32) -> Layout {
        let min = MIN_WIDGET_SIZE.min(cols);
        let h = self.h.clamp(MIN_WIDGET_SIZE, MAX_GRID_ROWS);
        let sized = Layout {
            w: self.w.max(min),
            h,
            y: self.y.min(MAX_GRID_ROWS - h),
            ..*self
        };
        sized.fit_to(cols)
    }

    /// Returns the reason this layout is out of bounds on the full grid, if any.
    pub fn bounds_violation(&self) -> Option<String> {
        if self.w < MIN_WIDGET_SIZE || self.h < MIN_WIDGET_SIZE {
            return Some(format!(
                "widget size {}x{} is below the minimum of {}x{}",
                self.w, self.h, MIN_WIDGET_SIZE, MIN_WIDGET_SIZE
            ));
        }
        if self.x > GRID_COLUMNS || self.w > GRID_COLUMNS - self.x {
            return Some(format!(
                "widget spans columns {}..{} but the grid has {} columns",
                self.x,
                self.right(),
                GRID_COLUMNS
            ));
        }
        match self.y.checked_add(self.h) {
            Some(bottom) if bottom <= MAX_GRID_ROWS => None,
            _ => Some(format!(
                "widget spans rows {}..{} but a post may use at most {} rows",
                self.y,
                self.bottom(),
                MAX_GRID_ROWS
            )),
        }
    }
}

pub fn columns_for_width(width: u32) -> u32 {
    BREAKPOINTS
        .iter()
        .find(|(_, min_width, _)| width >= *min_width)
        .map(|(_, _, cols)| *cols)
        .unwrap_or(MIN_WIDGET_SIZE)
}

pub fn breakpoint_for_width(width: u32) -> &'static str {
    BREAKPOINTS
        .iter()
        .find(|(_, min_width, _)| width >= *min_width)
        .map(|(name, _, _)| *name)
        .unwrap_or("xxs")
}

/// Move every layout up as far as it goes without overlapping the ones already placed.
///
/// Items are settled in `(y, x)` order; the returned vector keeps the input order.
pub fn compact_vertical(layouts: &[Layout]) -> Vec<Layout> {
    let mut order: Vec<usize> = (0..layouts.len()).collect();
    order.sort_by_key(|&i| (layouts[i].y, layouts[i].x, i));

    let mut placed: Vec<Layout> = Vec::with_capacity(layouts.len());
    let mut out = layouts.to_vec();

    for i in order {
        let mut item = layouts[i];
        while item.y > 0 {
            let candidate = Layout { y: item.y - 1, ..item };
            if placed.iter().any(|p| p.overlaps(&candidate)) {
                break;
            }
            item = candidate;
        }
        // Pushed down past anything it still collides with.
        while let Some(blocker) = placed.iter().find(|p| p.overlaps(&item)) {
            item.y = blocker.bottom();
        }
        placed.push(item);
        out[i] = item;
    }
    out
}

/// Fit every layout into the grid for `width` pixels and compact the result.
pub fn responsive_layouts(layouts: &[Layout], width: u32) -> Vec<Layout> {
    let cols = columns_for_width(width);
    if cols == GRID_COLUMNS {
        return layouts.to_vec();
    }
    let fitted: Vec<Layout> = layouts.iter().map(|l| l.fit_to(cols)).collect();
    compact_vertical(&fitted)
}
