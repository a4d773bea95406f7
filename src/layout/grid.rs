//! Image grid placement and crop/fit math.
//!
//! Given N images the grid is near-square (`rows = ceil(sqrt(N))`,
//! `cols = ceil(N / rows)`), with two exceptions: center-family layouts and
//! the credit strip always use a 1xN row, and `image_fill` swaps the grid
//! axes to prefer side-by-side placement over stacking. The total grid
//! footprint, gutters included, always equals the image area.

use crate::config::{Dimensions, Layout};
use crate::model::Rect;

use super::offsets::{image_area, text_offsets};

/// Caption aspect ratio (width over height) of a credit strip cell.
pub const CREDIT_ASPECT: f32 = 1.0 / 1.1;

/// Credit strip height as a fraction of the bottom margin.
pub const CREDIT_HEIGHT_FRACTION: f32 = 0.8;

/// Grid dimensions for a number of images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    /// Cells per row.
    pub cols: usize,
    /// Number of rows.
    pub rows: usize,
}

/// Compute the grid shape for `count` images.
///
/// `strip` forces a single row regardless of layout (used for credit
/// images).
pub fn grid_shape(count: usize, layout: Layout, strip: bool) -> GridShape {
    if count == 0 {
        return GridShape { cols: 0, rows: 0 };
    }
    if strip || layout.is_center_family() {
        return GridShape {
            cols: count,
            rows: 1,
        };
    }

    let root = (count as f32).sqrt();
    let (rows, cols) = if root.fract() > 0.0 {
        let rows = root as usize + 1;
        (rows, count.div_ceil(rows))
    } else {
        (root as usize, root as usize)
    };

    if layout == Layout::ImageFill {
        // side-by-side beats stacking on full-bleed pages
        GridShape {
            cols: rows,
            rows: cols,
        }
    } else {
        GridShape { cols, rows }
    }
}

/// Cell rectangles for the main image grid.
///
/// With `packed` false, one internal margin is subtracted from every cell
/// after the first per axis, creating visible gutters without growing the
/// footprint past the image area.
pub fn image_grid_cells(
    count: usize,
    layout: Layout,
    d: &Dimensions,
    has_text: bool,
    packed: bool,
) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let area = image_area(layout, d, has_text);
    let shape = grid_shape(count, layout, false);
    cells_in_area(count, shape, area, packed, d.internal_margin)
}

/// Cell rectangles for the credit strip: a single packed row pinned to the
/// bottom margin and centered horizontally on the text area.
pub fn credit_cells(count: usize, layout: Layout, d: &Dimensions) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let base = text_offsets(layout, d, false);
    let strip_h = CREDIT_HEIGHT_FRACTION * d.page_margins.y1;
    let total_w = strip_h * CREDIT_ASPECT * count as f32;
    let x0 = base.x0 + base.w() / 2.0 - total_w / 2.0;
    let y0 = d.page_height - d.page_margins.y1;
    let area = Rect::from_size(x0, y0, total_w, strip_h);
    let shape = GridShape {
        cols: count,
        rows: 1,
    };
    cells_in_area(count, shape, area, true, d.internal_margin)
}

fn cells_in_area(
    count: usize,
    shape: GridShape,
    area: Rect,
    packed: bool,
    margin: f32,
) -> Vec<Rect> {
    let cell_w = area.w() / shape.cols as f32;
    let cell_h = area.h() / shape.rows as f32;
    (0..count)
        .map(|i| {
            let px = (i % shape.cols) as f32;
            let py = (i / shape.cols) as f32;
            let mx = if px >= 1.0 && !packed { margin } else { 0.0 };
            let my = if py >= 1.0 && !packed { margin } else { 0.0 };
            Rect::from_size(
                area.x0 + px * cell_w + mx,
                area.y0 + py * cell_h + my,
                cell_w - mx,
                cell_h - my,
            )
        })
        .collect()
}

/// Fit an image of the given aspect ratio (width over height) inside a
/// cell, preserving the full image: one axis matches the cell, the other
/// shrinks proportionally, centered.
pub fn contain_rect(cell: Rect, aspect: f32) -> Rect {
    debug_assert!(aspect > 0.0, "image aspect ratio must be positive");
    let cell_aspect = cell.aspect();
    if cell_aspect < aspect {
        // image wider than the cell
        let h = cell.w() / aspect;
        Rect::from_size(cell.x0, cell.y0 + (cell.h() - h) / 2.0, cell.w(), h)
    } else {
        let w = cell.h() * aspect;
        Rect::from_size(cell.x0 + (cell.w() - w) / 2.0, cell.y0, w, cell.h())
    }
}

/// Scale an image of the given aspect ratio up to exactly fill a cell,
/// centered. The result extends past the cell on one axis; the backend
/// clips it to the cell rectangle.
pub fn cover_rect(cell: Rect, aspect: f32) -> Rect {
    debug_assert!(aspect > 0.0, "image aspect ratio must be positive");
    let cell_aspect = cell.aspect();
    if cell_aspect < aspect {
        // image wider than the cell: match height, overflow horizontally
        let w = cell.h() * aspect;
        Rect::from_size(cell.x0 + (cell.w() - w) / 2.0, cell.y0, w, cell.h())
    } else {
        let h = cell.w() / aspect;
        Rect::from_size(cell.x0, cell.y0 + (cell.h() - h) / 2.0, cell.w(), h)
    }
}
