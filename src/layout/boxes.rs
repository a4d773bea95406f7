//! Callout box sizing and stacking.

use crate::config::Dimensions;
use crate::model::Rect;

/// Rectangles for a page's callout boxes, in document order.
///
/// Each box is half the page width, centered, with a height driven by its
/// line count. Boxes anchor to the bottom margin; every box after the first
/// pushes all earlier boxes upward by its own height plus one internal
/// margin, so the last box in document order sits on the anchor.
pub fn callout_box_rects(line_counts: &[usize], d: &Dimensions) -> Vec<Rect> {
    let width = 0.5 * d.page_width;
    let x0 = d.page_width / 2.0 - width / 2.0;

    let mut rects: Vec<Rect> = line_counts
        .iter()
        .map(|&count| {
            let h = d.em * count as f32 + 2.0 * d.internal_margin;
            let y0 = d.page_height - d.page_margins.y1 - h;
            Rect::from_size(x0, y0, width, h)
        })
        .collect();

    for i in 0..rects.len() {
        let lift: f32 = rects[i + 1..]
            .iter()
            .map(|r| r.h() + d.internal_margin)
            .sum();
        let r = rects[i];
        rects[i] = Rect::from_size(r.x0, r.y0 - lift, r.w(), r.h());
    }

    rects
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 0.01;

    fn dims() -> Dimensions {
        Dimensions::default()
    }

    #[test]
    fn test_single_box_anchors_to_bottom_margin() {
        let d = dims();
        let rects = callout_box_rects(&[2], &d);
        assert_eq!(rects.len(), 1);

        let expected_h = d.em * 2.0 + 2.0 * d.internal_margin;
        assert!((rects[0].h() - expected_h).abs() < TOLERANCE);
        assert!((rects[0].y1 - (d.page_height - d.page_margins.y1)).abs() < TOLERANCE);
        assert!((rects[0].w() - d.page_width / 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_later_boxes_push_earlier_ones_up() {
        let d = dims();
        let rects = callout_box_rects(&[1, 3], &d);

        // last box sits on the anchor
        assert!((rects[1].y1 - (d.page_height - d.page_margins.y1)).abs() < TOLERANCE);
        // first box sits one internal margin above it
        assert!((rects[0].y1 - (rects[1].y0 - d.internal_margin)).abs() < TOLERANCE);
        assert!(!rects[0].overlaps(&rects[1]));
    }

    #[test]
    fn test_three_boxes_stack_without_overlap() {
        let d = dims();
        let rects = callout_box_rects(&[1, 1, 1], &d);
        for pair in rects.windows(2) {
            assert!(pair[0].y1 <= pair[1].y0 + TOLERANCE);
            assert!(!pair[0].overlaps(&pair[1]));
        }
    }

    #[test]
    fn test_no_boxes() {
        assert!(callout_box_rects(&[], &dims()).is_empty());
    }
}
