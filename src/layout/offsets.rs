//! Per-layout rectangle formulas.
//!
//! Each layout maps to a fixed formula over the page dimensions and
//! margins. This is a pure lookup, exhaustive over [`Layout`]; unknown
//! layout names were already collapsed to [`Layout::ImageFill`] when the
//! configuration was resolved.

use crate::config::{Dimensions, Layout};
use crate::model::Rect;

/// Region the title line is anchored to.
///
/// For half layouts the title moves out of the image half; for everything
/// else it spans the page between the margins.
pub fn page_offsets(layout: Layout, d: &Dimensions) -> Rect {
    let m = &d.page_margins;
    let (x0, x1) = match layout {
        Layout::ImageLeftHalf => (d.page_width / 2.0 + m.x0, d.page_width - m.x1),
        Layout::ImageRightHalf => (m.x0, d.page_width / 2.0 - m.x1),
        _ => (m.x0, d.page_width - m.x1),
    };
    Rect::new(x0, m.y0, x1, d.page_height - m.y1)
}

/// Region body text flows into, below the title line.
///
/// Center-family layouts halve the drawable height when images share the
/// page, pushing the text into the bottom half with one internal-margin
/// gutter between the halves.
pub fn text_offsets(layout: Layout, d: &Dimensions, has_images: bool) -> Rect {
    let m = &d.page_margins;
    let y1 = d.page_height - m.y1;
    match layout {
        Layout::ImageCenter => {
            let mut y0 = m.y0 + d.em_title;
            if has_images {
                let drawable = d.page_height - m.y0 - d.em_title - m.y1;
                y0 += d.internal_margin / 2.0 + drawable / 2.0;
            }
            Rect::new(m.x0, y0, d.page_width - m.x1, y1)
        }
        Layout::ImageLeftHalf | Layout::ImageLeftSmall => Rect::new(
            d.page_width / 2.0 + m.x0,
            m.y0 + d.em_title,
            d.page_width - m.x1,
            y1,
        ),
        Layout::ImageRightHalf | Layout::ImageRightSmall => Rect::new(
            m.x0,
            m.y0 + d.em_title,
            d.page_width / 2.0 - m.x1,
            y1,
        ),
        Layout::ImageFill => Rect::new(m.x0, m.y0 + d.em_title, d.page_width - m.x1, y1),
    }
}

/// Region the main image grid covers.
///
/// Half layouts bleed their image half to the page edge; small layouts
/// stay inside the margins; fill covers the whole page.
pub fn image_area(layout: Layout, d: &Dimensions, has_text: bool) -> Rect {
    let m = &d.page_margins;
    match layout {
        Layout::ImageCenter => {
            let y0 = m.y0 + d.em_title;
            let y1 = if has_text {
                let drawable = d.page_height - m.y0 - d.em_title - m.y1;
                y0 + drawable / 2.0 - d.internal_margin / 2.0
            } else {
                d.page_height - m.y1
            };
            Rect::new(m.x0, y0, d.page_width - m.x1, y1)
        }
        Layout::ImageLeftHalf => Rect::new(0.0, 0.0, d.page_width / 2.0, d.page_height),
        Layout::ImageLeftSmall => Rect::new(
            m.x0,
            m.y0 + d.em_title,
            d.page_width / 2.0 - m.x1,
            d.page_height - m.y1,
        ),
        Layout::ImageRightHalf => {
            Rect::new(d.page_width / 2.0, 0.0, d.page_width, d.page_height)
        }
        Layout::ImageRightSmall => Rect::new(
            d.page_width / 2.0 + m.x0,
            m.y0 + d.em_title,
            d.page_width - m.x1,
            d.page_height - m.y1,
        ),
        Layout::ImageFill => Rect::new(0.0, 0.0, d.page_width, d.page_height),
    }
}
