//! Body text column slots.

use crate::model::Rect;

/// Rectangle of one column slot inside the text area.
///
/// The text width is divided into `columns` equal slots with one gutter per
/// gap, so slot widths plus gutters sum exactly to the text area width.
/// Every slot spans the full text height: columns are independently
/// top-anchored, not continuations of a single flow.
pub fn column_offsets(text: Rect, columns: usize, column: usize, gutter: f32) -> Rect {
    let n = columns.max(1);
    debug_assert!(column < n, "column {column} out of {n}");
    let slot_w = (text.w() - gutter * (n as f32 - 1.0)) / n as f32;
    let x0 = text.x0 + column as f32 * (slot_w + gutter);
    Rect::new(x0, text.y0, x0 + slot_w, text.y1)
}
